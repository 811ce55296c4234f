//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Store-assigned identifier.
    pub id: uuid::Uuid,
    /// Task label.
    pub text: String,
    /// Completion flag.
    pub completed: bool,
    /// Deadline exactly as entered.
    pub deadline: String,
    /// Insertion timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for task records. The identifier and insertion timestamp
/// are assigned by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task label.
    pub text: String,
    /// Completion flag.
    pub completed: bool,
    /// Deadline exactly as entered.
    pub deadline: String,
}

/// Partial update model. `None` fields are left untouched.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset {
    /// Replacement label.
    pub text: Option<String>,
    /// Replacement completion flag.
    pub completed: Option<bool>,
    /// Replacement deadline.
    pub deadline: Option<String>,
}

impl TaskChangeset {
    /// Returns `true` when no column would be written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_none() && self.completed.is_none() && self.deadline.is_none()
    }
}
