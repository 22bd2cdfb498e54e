pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login        login (public)
/// /auth/me           current account (requires auth)
///
/// /tasks             list, create (requires auth)
/// /tasks/{id}        get, update, delete (requires auth, owner-scoped)
///
/// /users             list (public), register (public)
/// /users/{id}        get (requires auth), update, delete (self only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/tasks", tasks::router())
        .nest("/users", users::router())
}
