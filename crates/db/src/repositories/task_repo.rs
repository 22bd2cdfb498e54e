//! Repository for the `tasks` table.
//!
//! Every read/write except `create` carries `author_id` in the WHERE
//! clause. Ownership is therefore enforced by the query itself: a task
//! owned by someone else yields zero rows, the same as a task that does
//! not exist.

use sqlx::PgPool;
use taskhive_core::types::DbId;

use crate::models::task::{CreateTask, Task, UpdateTask};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, completed, author_id, created_at, updated_at";

/// Provides owner-scoped CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task owned by `author_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTask,
        author_id: DbId,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (title, description, author_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(author_id)
            .fetch_one(pool)
            .await
    }

    /// List the tasks owned by `author_id`, most recently created first.
    pub async fn list_by_author(pool: &PgPool, author_id: DbId) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks WHERE author_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(author_id)
            .fetch_all(pool)
            .await
    }

    /// Find a task by id, scoped to its owner.
    ///
    /// Returns `None` both when the task does not exist and when it is
    /// owned by a different user.
    pub async fn find_owned_by_id(
        pool: &PgPool,
        id: DbId,
        author_id: DbId,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1 AND author_id = $2");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(author_id)
            .fetch_optional(pool)
            .await
    }

    /// Update an owned task. Only present fields in `input` are applied;
    /// `updated_at` is refreshed on any change. The description is
    /// nullable, so it uses a presence flag instead of COALESCE: an
    /// explicit `Some(None)` sets the column to NULL.
    ///
    /// Returns `None` when the task is absent or owned by another user.
    pub async fn update_owned(
        pool: &PgPool,
        id: DbId,
        author_id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($3, title),
                description = CASE WHEN $4 THEN $5 ELSE description END,
                completed = COALESCE($6, completed),
                updated_at = NOW()
             WHERE id = $1 AND author_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(author_id)
            .bind(&input.title)
            .bind(input.description.is_some())
            .bind(input.description.as_ref().and_then(|d| d.as_deref()))
            .bind(input.completed)
            .fetch_optional(pool)
            .await
    }

    /// Delete an owned task. Returns `true` if a row was removed.
    pub async fn delete_owned(
        pool: &PgPool,
        id: DbId,
        author_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND author_id = $2")
            .bind(id)
            .bind(author_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
