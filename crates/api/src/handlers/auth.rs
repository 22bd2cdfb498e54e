//! Handlers for the `/auth` resource (login, current user).

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use taskhive_core::error::CoreError;
use taskhive_core::types::DbId;
use taskhive_db::models::user::UserResponse;
use taskhive_db::repositories::UserRepo;

use crate::auth::jwt::generate_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::Principal;
use crate::state::AppState;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login response: the token plus a public projection of the
/// account. The password hash never appears here.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub id: DbId,
    pub username: String,
    pub email: String,
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password and receive a signed token.
///
/// An unknown email yields 404 while a wrong password yields 401. The
/// split leaks account existence; it is kept deliberately to preserve the
/// public API contract.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    // 1. Look up the account by its login key.
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| AppError::NotFound("Email not found".into()))?;

    // 2. Verify the password. Argon2 is CPU-bound, so it runs on the
    //    blocking pool rather than stalling the async workers.
    let stored_hash = user.password_hash.clone();
    let password = input.password;
    let password_valid = tokio::task::spawn_blocking(move || {
        verify_password(&password, &stored_hash)
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Password verification task failed: {e}")))?
    .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid credentials".into(),
        )));
    }

    // 3. Issue the token. Login performs no writes; `updated_at` is
    //    untouched.
    let token = generate_token(user.id, &user.username, &user.email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(LoginResponse {
        token,
        id: user.id,
        username: user.username,
        email: user.email,
    }))
}

/// GET /api/v1/auth/me
///
/// Return the account behind the presented token. The claims' denormalized
/// username/email are not trusted here: the account is re-fetched by id so
/// a token that outlives its account (or its edits) reflects reality.
pub async fn me(
    State(state): State<AppState>,
    principal: Principal,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, principal.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: principal.id,
        }))?;

    Ok(Json(user.into()))
}
