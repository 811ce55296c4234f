//! Port for the remote store holding task records.

use crate::task::domain::{Task, TaskDraft, TaskId, TaskPatch};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Name of the logical collection that holds task records.
pub const TASKS_COLLECTION: &str = "tasks";

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Remote task persistence contract.
///
/// Every operation is a single request/response against the store.
/// Implementations do not retry, and have no effect beyond the remote
/// record they address.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Fetches every persisted task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] on transport or permission failure.
    async fn list_all(&self) -> TaskStoreResult<Vec<Task>>;

    /// Persists a new, incomplete task and returns the identifier the store
    /// assigned to it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] on transport or permission failure.
    async fn create(&self, draft: &TaskDraft) -> TaskStoreResult<TaskId>;

    /// Writes the fields present in `patch` to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist, or
    /// another [`TaskStoreError`] on transport failure.
    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> TaskStoreResult<()>;

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist, or
    /// another [`TaskStoreError`] on transport failure.
    async fn delete(&self, id: &TaskId) -> TaskStoreResult<()>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The addressed task does not exist in the store.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The store refused the operation.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The store did not answer within the configured limit.
    #[error("task store did not respond within {0:?}")]
    Timeout(Duration),

    /// Transport or persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns `true` for [`TaskStoreError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
