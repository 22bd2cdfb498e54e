//! Task entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskhive_core::types::{DbId, Timestamp};

/// Full task row from the `tasks` table.
///
/// `author_id` is set once at creation from the authenticated principal
/// and never changes afterwards.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub author_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new task. The author is taken from the request's
/// principal, never from the body.
#[derive(Debug, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
}

/// DTO for updating an existing task. All fields are optional.
///
/// `description` is double-wrapped so the nullable column can be cleared:
/// an absent field deserializes to `None` (leave unchanged), an explicit
/// JSON `null` to `Some(None)` (set NULL).
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
}

/// Deserialize a present-but-possibly-null field into `Some(Option<T>)`.
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl UpdateTask {
    /// True when at least one field would actually change the row.
    /// Clearing the description (`Some(None)`) counts as a change.
    pub fn has_effective_fields(&self) -> bool {
        self.title.is_some() || self.description.is_some() || self.completed.is_some()
    }
}
