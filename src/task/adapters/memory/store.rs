//! In-memory task store standing in for the remote store.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::task::{
    domain::{Task, TaskDraft, TaskId, TaskPatch},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
///
/// Records are kept in creation order and identifiers are random, opaque
/// strings, mirroring a document store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<Vec<Task>>>,
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `tasks`.
    #[must_use]
    pub fn with_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        Self {
            state: Arc::new(RwLock::new(tasks.into_iter().collect())),
        }
    }

    /// Returns a copy of every stored record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] if the lock is poisoned.
    pub fn records(&self) -> TaskStoreResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.clone())
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn list_all(&self) -> TaskStoreResult<Vec<Task>> {
        self.records()
    }

    async fn create(&self, draft: &TaskDraft) -> TaskStoreResult<TaskId> {
        let mut state = self.state.write().map_err(poisoned)?;
        let id = TaskId::new(Uuid::new_v4().simple().to_string())
            .map_err(TaskStoreError::persistence)?;
        state.push(Task::new(id.clone(), draft.clone()));
        Ok(id)
    }

    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let task = state
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or_else(|| TaskStoreError::NotFound(id.clone()))?;
        task.apply_patch(patch);
        Ok(())
    }

    async fn delete(&self, id: &TaskId) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let position = state
            .iter()
            .position(|task| task.id() == id)
            .ok_or_else(|| TaskStoreError::NotFound(id.clone()))?;
        state.remove(position);
        Ok(())
    }
}

fn poisoned(err: impl std::fmt::Display) -> TaskStoreError {
    TaskStoreError::persistence(std::io::Error::other(format!("task store lock poisoned: {err}")))
}
