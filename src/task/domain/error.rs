//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
///
/// These are raised at the input boundary; the collection controller only
/// ever receives values that already passed validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task label is empty after trimming.
    #[error("task text must not be empty")]
    EmptyText,

    /// No deadline was supplied.
    #[error("task deadline must not be empty")]
    EmptyDeadline,

    /// The deadline could not be parsed into a point in time.
    #[error("invalid deadline '{0}', expected a date and time such as 2030-01-01T09:30")]
    InvalidDeadline(String),

    /// A store-assigned identifier was empty.
    #[error("task identifier must not be empty")]
    EmptyTaskId,
}
