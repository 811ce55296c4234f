//! Store decorator that bounds every remote call with a deadline.

use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;

use crate::task::{
    domain::{Task, TaskDraft, TaskId, TaskPatch},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Wraps a [`TaskStore`] so that a call which has not resolved after
/// `limit` fails with [`TaskStoreError::Timeout`].
///
/// The inner call is dropped on expiry; whether the remote side applied it
/// is unknown.
#[derive(Debug, Clone)]
pub struct TimeoutTaskStore<S> {
    inner: S,
    limit: Duration,
}

impl<S> TimeoutTaskStore<S>
where
    S: TaskStore,
{
    /// Wraps `inner` with the given per-call limit.
    #[must_use]
    pub const fn new(inner: S, limit: Duration) -> Self {
        Self { inner, limit }
    }

    /// Returns the per-call limit.
    #[must_use]
    pub const fn limit(&self) -> Duration {
        self.limit
    }

    /// Returns the wrapped store.
    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = TaskStoreResult<T>> + Send,
    ) -> TaskStoreResult<T> {
        tokio::time::timeout(self.limit, call).await.unwrap_or_else(|_| {
            tracing::warn!(operation, limit = ?self.limit, "task store call timed out");
            Err(TaskStoreError::Timeout(self.limit))
        })
    }
}

#[async_trait]
impl<S> TaskStore for TimeoutTaskStore<S>
where
    S: TaskStore,
{
    async fn list_all(&self) -> TaskStoreResult<Vec<Task>> {
        self.bounded("list_all", self.inner.list_all()).await
    }

    async fn create(&self, draft: &TaskDraft) -> TaskStoreResult<TaskId> {
        self.bounded("create", self.inner.create(draft)).await
    }

    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> TaskStoreResult<()> {
        self.bounded("update", self.inner.update(id, patch)).await
    }

    async fn delete(&self, id: &TaskId) -> TaskStoreResult<()> {
        self.bounded("delete", self.inner.delete(id)).await
    }
}
