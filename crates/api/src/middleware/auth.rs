//! Bearer-token authentication gate.
//!
//! The gate is an Axum extractor: any handler that takes a [`Principal`]
//! parameter only runs after the request's token has been verified. It is
//! stateless across requests and performs no store lookup -- verification
//! is pure crypto plus a clock comparison.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use taskhive_core::error::CoreError;
use taskhive_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Verified identity extracted from a Bearer token in the `Authorization`
/// header.
///
/// Lives only for the request that carried the token, and is derived
/// entirely from the token's claims. The `username`/`email` copies are
/// issuance-time snapshots; handlers that need live account state must
/// re-fetch by `id`.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(principal: Principal) -> AppResult<Json<()>> {
///     tracing::debug!(user_id = principal.id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Principal {
    /// The user's internal database id (from `claims.sub`).
    pub id: DbId,
    /// Username at token issuance time.
    pub username: String,
    /// Email at token issuance time.
    pub email: String,
}

impl FromRequestParts<AppState> for Principal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "No authorization header found".into(),
                ))
            })?;

        // Expected shape: "<scheme> <token>" with a non-empty token.
        let token = auth_header
            .split_once(' ')
            .map(|(_scheme, token)| token)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Invalid authorization format".into(),
                ))
            })?;

        // Signature and expiry failures are deliberately collapsed into a
        // single rejection so callers get no forgery oracle.
        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| AppError::Core(CoreError::Unauthorized("Invalid token".into())))?;

        Ok(Principal {
            id: claims.sub,
            username: claims.username,
            email: claims.email,
        })
    }
}
