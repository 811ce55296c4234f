//! Outcome reports for collection operations.

use crate::task::{domain::TaskId, ports::TaskStoreError};
use std::fmt;

/// Collection operation a notification refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskOperation {
    /// Bulk load from the store.
    Load,
    /// Task creation.
    Add,
    /// Label/deadline edit.
    Edit,
    /// Completion toggle.
    ToggleComplete,
    /// Task removal.
    Delete,
}

impl TaskOperation {
    /// Returns a short lowercase name for messages and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Add => "add",
            Self::Edit => "edit",
            Self::ToggleComplete => "toggle",
            Self::Delete => "delete",
        }
    }
}

/// Transient, user-facing report of how an operation ended.
///
/// Store failures are delivered as values of this type rather than as
/// errors, so a failure never interrupts the caller's flow.
#[derive(Debug, Clone)]
pub enum Notification {
    /// The store accepted the operation.
    Succeeded {
        /// Operation that ran.
        operation: TaskOperation,
        /// Task the operation addressed, if any.
        task_id: Option<TaskId>,
    },
    /// The store rejected the operation or could not be reached.
    Failed {
        /// Operation that ran.
        operation: TaskOperation,
        /// Task the operation addressed, if any.
        task_id: Option<TaskId>,
        /// Reason reported by the store.
        error: TaskStoreError,
    },
}

impl Notification {
    /// Returns the operation this notification reports on.
    #[must_use]
    pub const fn operation(&self) -> TaskOperation {
        match self {
            Self::Succeeded { operation, .. } | Self::Failed { operation, .. } => *operation,
        }
    }

    /// Returns the addressed task, if any.
    #[must_use]
    pub const fn task_id(&self) -> Option<&TaskId> {
        match self {
            Self::Succeeded { task_id, .. } | Self::Failed { task_id, .. } => task_id.as_ref(),
        }
    }

    /// Returns `true` for [`Notification::Succeeded`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// Returns the store error of a failed operation.
    #[must_use]
    pub const fn error(&self) -> Option<&TaskStoreError> {
        match self {
            Self::Succeeded { .. } => None,
            Self::Failed { error, .. } => Some(error),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded { operation, .. } => write!(f, "{} succeeded", operation.as_str()),
            Self::Failed {
                operation, error, ..
            } => write!(f, "{} failed: {error}", operation.as_str()),
        }
    }
}
