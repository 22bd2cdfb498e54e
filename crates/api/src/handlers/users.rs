//! Handlers for the `/users` resource.
//!
//! Registration and the sanitized listing are public; everything else
//! sits behind the authentication gate. Update and delete are
//! self-scoped: acting on any other account is rejected with 401, a
//! deliberate asymmetry with the task routes' 404 shaping (an account id
//! in the URL is not a secret the way a task id is).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use taskhive_core::error::CoreError;
use taskhive_core::ownership::ensure_self;
use taskhive_core::types::DbId;
use taskhive_db::models::user::{CreateUser, UpdateUser, UserResponse};
use taskhive_db::repositories::UserRepo;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::Principal;
use crate::state::AppState;

/// Request body for `POST /users` (registration).
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request body for `PATCH /users/{id}`. All fields optional; the
/// password arrives in plaintext and is re-hashed before storage.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Hash a plaintext password on the blocking pool.
///
/// Argon2 hashing is CPU-bound; running it inline would stall unrelated
/// requests sharing the async workers.
async fn hash_on_blocking_pool(password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::InternalError(format!("Password hashing task failed: {e}")))?
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
}

/// POST /api/v1/users
///
/// Public registration. Email is the unique login key.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest("Email already in use".into()));
    }

    let password_hash = hash_on_blocking_pool(input.password).await?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            email: input.email,
            password_hash,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/v1/users
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _principal: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user.into()))
}

/// PATCH /api/v1/users/{id}
///
/// Self-scoped: a principal may only update its own account.
pub async fn update(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    ensure_self(principal.id, id)?;

    // Empty strings count as absent: a blank username must not be
    // committed and a blank password must never reach the hasher.
    let username = input.username.filter(|s| !s.is_empty());
    let email = input.email.filter(|s| !s.is_empty());
    let password = input.password.filter(|s| !s.is_empty());

    if username.is_none() && email.is_none() && password.is_none() {
        return Err(AppError::BadRequest(
            "There must be at least 1 update value (email, password, username)".into(),
        ));
    }

    let password_hash = match password {
        Some(plaintext) => Some(hash_on_blocking_pool(plaintext).await?),
        None => None,
    };

    let changes = UpdateUser {
        username,
        email,
        password_hash,
    };

    let user = UserRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user.into()))
}

/// DELETE /api/v1/users/{id}
///
/// Self-scoped: a principal may only delete its own account.
pub async fn delete(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_self(principal.id, id)?;

    let deleted = UserRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }

    Ok(StatusCode::NO_CONTENT)
}
