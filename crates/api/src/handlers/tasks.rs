//! Handlers for the `/tasks` resource.
//!
//! Every route requires an authenticated [`Principal`]; every repository
//! call is owner-scoped. A task belonging to another user is reported as
//! 404, never 403, so cross-tenant probing cannot confirm a task exists.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use taskhive_core::error::CoreError;
use taskhive_core::types::DbId;
use taskhive_db::models::task::{CreateTask, Task, UpdateTask};
use taskhive_db::repositories::TaskRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Principal;
use crate::state::AppState;

/// POST /api/v1/tasks
///
/// The author is stamped from the principal; the body cannot choose an
/// owner.
pub async fn create(
    State(state): State<AppState>,
    principal: Principal,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let task = TaskRepo::create(&state.pool, &input, principal.id).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/v1/tasks
///
/// Lists only the principal's own tasks; the filter is applied at the
/// query level, not after the fetch.
pub async fn list(
    State(state): State<AppState>,
    principal: Principal,
) -> AppResult<Json<Vec<Task>>> {
    let tasks = TaskRepo::list_by_author(&state.pool, principal.id).await?;
    Ok(Json(tasks))
}

/// GET /api/v1/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<DbId>,
) -> AppResult<Json<Task>> {
    let task = TaskRepo::find_owned_by_id(&state.pool, id, principal.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(task))
}

/// PATCH /api/v1/tasks/{id}
pub async fn update(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<Task>> {
    if !input.has_effective_fields() {
        return Err(AppError::BadRequest(
            "There must be at least 1 update value (title, description, completed)".into(),
        ));
    }

    let task = TaskRepo::update_owned(&state.pool, id, principal.id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(task))
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    // Confirm existence and ownership before mutating.
    TaskRepo::find_owned_by_id(&state.pool, id, principal.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;

    // The ownership check just passed, so an unaffected delete means the
    // row vanished underneath us -- a store race, not a client error.
    let deleted = TaskRepo::delete_owned(&state.pool, id, principal.id).await?;
    if !deleted {
        return Err(AppError::InternalError(format!(
            "Failed to delete task {id}: no rows affected"
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}
