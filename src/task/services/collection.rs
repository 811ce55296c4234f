//! Orchestration of the in-memory task collection against the remote store.

use crate::task::{
    domain::{SortOrder, Task, TaskDraft, TaskId, TaskPatch, sort_tasks},
    ports::{TaskStore, TaskStoreError},
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, instrument, warn};

use super::{Notification, TaskOperation};

/// Owner of the canonical task collection.
///
/// `add`, `edit` and `delete` change the collection only after the store
/// confirms them. `toggle_complete` flips the flag before the store call
/// and keeps the flip when that call fails, so after a failed toggle the
/// local flag and the stored flag may disagree.
///
/// Every committed change is published on a watch channel; readers obtained
/// through [`subscribe`](Self::subscribe) see snapshots but cannot write.
pub struct TaskCollectionController<S>
where
    S: TaskStore,
{
    store: Arc<S>,
    tasks: watch::Sender<Vec<Task>>,
}

impl<S> TaskCollectionController<S>
where
    S: TaskStore,
{
    /// Creates a controller with an empty collection.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            tasks: watch::Sender::new(Vec::new()),
        }
    }

    /// Returns a receiver that observes every committed collection state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Task>> {
        self.tasks.subscribe()
    }

    /// Returns a copy of the collection in insertion order.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.borrow().clone()
    }

    /// Returns a copy of the task with `id`, if present locally.
    #[must_use]
    pub fn find(&self, id: &TaskId) -> Option<Task> {
        self.tasks.borrow().iter().find(|task| task.id() == id).cloned()
    }

    /// Returns the collection ordered by `order`, evaluated at `now`.
    #[must_use]
    pub fn current_view(&self, order: SortOrder, now: DateTime<Utc>) -> Vec<Task> {
        sort_tasks(&self.tasks.borrow(), order, now)
    }

    /// Replaces the collection with every task held by the store.
    ///
    /// On failure the previous collection is kept.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Notification {
        match self.store.list_all().await {
            Ok(fetched) => {
                let loaded = without_duplicate_ids(fetched);
                info!(count = loaded.len(), "loaded tasks");
                self.tasks.send_replace(loaded);
                succeeded(TaskOperation::Load, None)
            }
            Err(error) => failed(TaskOperation::Load, None, error),
        }
    }

    /// Creates a task in the store and appends it locally with the
    /// identifier the store assigned.
    #[instrument(skip(self, draft), fields(text = draft.text()))]
    pub async fn add(&mut self, draft: TaskDraft) -> Notification {
        match self.store.create(&draft).await {
            Ok(id) => {
                let task = Task::new(id.clone(), draft);
                self.tasks.send_modify(|tasks| {
                    if let Some(existing) = tasks.iter_mut().find(|current| current.id() == &id) {
                        warn!(task_id = %id, "store reused an identifier; replacing local task");
                        *existing = task;
                    } else {
                        tasks.push(task);
                    }
                });
                info!(task_id = %id, "task added");
                succeeded(TaskOperation::Add, Some(id))
            }
            Err(error) => failed(TaskOperation::Add, None, error),
        }
    }

    /// Writes a new label and deadline to the store, then to the local task.
    #[instrument(skip(self, id, draft), fields(task_id = %id))]
    pub async fn edit(&mut self, id: &TaskId, draft: TaskDraft) -> Notification {
        if let Err(error) = self.store.update(id, &TaskPatch::edit(&draft)).await {
            return failed(TaskOperation::Edit, Some(id.clone()), error);
        }

        let applied = self.tasks.send_if_modified(|tasks| {
            let Some(task) = tasks.iter_mut().find(|task| task.id() == id) else {
                return false;
            };
            task.apply_edit(draft);
            true
        });
        if !applied {
            warn!("edited task is not in the local collection");
        }
        info!("task edited");
        succeeded(TaskOperation::Edit, Some(id.clone()))
    }

    /// Flips the local completion flag immediately, then persists it.
    ///
    /// A store failure is reported but the local flip stays in place.
    #[instrument(skip(self, id), fields(task_id = %id))]
    pub async fn toggle_complete(&mut self, id: &TaskId) -> Notification {
        let mut flipped = None;
        self.tasks.send_if_modified(|tasks| {
            flipped = tasks
                .iter_mut()
                .find(|task| task.id() == id)
                .map(Task::toggle_completed);
            flipped.is_some()
        });

        let Some(completed) = flipped else {
            return failed(
                TaskOperation::ToggleComplete,
                Some(id.clone()),
                TaskStoreError::NotFound(id.clone()),
            );
        };

        match self.store.update(id, &TaskPatch::completion(completed)).await {
            Ok(()) => {
                info!(completed, "task completion persisted");
                succeeded(TaskOperation::ToggleComplete, Some(id.clone()))
            }
            Err(error) => {
                warn!(completed, "keeping local completion flag the store did not accept");
                failed(TaskOperation::ToggleComplete, Some(id.clone()), error)
            }
        }
    }

    /// Removes a task from the store, then from the local collection.
    #[instrument(skip(self, id), fields(task_id = %id))]
    pub async fn delete(&mut self, id: &TaskId) -> Notification {
        if let Err(error) = self.store.delete(id).await {
            return failed(TaskOperation::Delete, Some(id.clone()), error);
        }

        self.tasks.send_if_modified(|tasks| {
            let before = tasks.len();
            tasks.retain(|task| task.id() != id);
            tasks.len() != before
        });
        info!("task deleted");
        succeeded(TaskOperation::Delete, Some(id.clone()))
    }
}

const fn succeeded(operation: TaskOperation, task_id: Option<TaskId>) -> Notification {
    Notification::Succeeded { operation, task_id }
}

fn failed(
    operation: TaskOperation,
    task_id: Option<TaskId>,
    error: TaskStoreError,
) -> Notification {
    warn!(operation = operation.as_str(), error = %error, "task store operation failed");
    Notification::Failed {
        operation,
        task_id,
        error,
    }
}

/// Keeps the first occurrence of each identifier.
fn without_duplicate_ids(tasks: Vec<Task>) -> Vec<Task> {
    let mut unique: Vec<Task> = Vec::with_capacity(tasks.len());
    for task in tasks {
        if unique.iter().any(|kept| kept.id() == task.id()) {
            warn!(task_id = %task.id(), "ignoring duplicate task identifier from store");
        } else {
            unique.push(task);
        }
    }
    unique
}
