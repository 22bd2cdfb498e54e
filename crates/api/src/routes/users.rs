//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /      -> list (public, sanitized)
/// POST   /      -> create (public registration)
/// GET    /{id}  -> get_by_id (requires auth)
/// PATCH  /{id}  -> update (self only)
/// DELETE /{id}  -> delete (self only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list).post(users::create))
        .route(
            "/{id}",
            get(users::get_by_id)
                .patch(users::update)
                .delete(users::delete),
        )
}
