//! Interactive flows that collect input before mutating the collection.
//!
//! A cancelled form or a declined confirmation performs no mutation and
//! yields no notification.

use crate::task::{
    domain::TaskId,
    ports::{Confirmation, PromptRequest, PromptResponse, TaskPrompt, TaskStore, TaskStoreError},
};
use tracing::debug;

use super::{Notification, TaskCollectionController, TaskOperation};

/// Asks for a new task and adds it when the form is submitted.
pub async fn prompt_add<S, P>(
    controller: &mut TaskCollectionController<S>,
    prompt: &P,
) -> Option<Notification>
where
    S: TaskStore,
    P: TaskPrompt + ?Sized,
{
    match prompt.request_task(PromptRequest::NewTask).await {
        PromptResponse::Submitted(draft) => Some(controller.add(draft).await),
        PromptResponse::Cancelled => {
            debug!("add cancelled");
            None
        }
    }
}

/// Asks for new values for the task with `id`, pre-filled with its current
/// ones, and applies the edit when the form is submitted.
///
/// Reports [`TaskStoreError::NotFound`] without prompting when the task is
/// not in the local collection.
pub async fn prompt_edit<S, P>(
    controller: &mut TaskCollectionController<S>,
    prompt: &P,
    id: &TaskId,
) -> Option<Notification>
where
    S: TaskStore,
    P: TaskPrompt + ?Sized,
{
    let Some(task) = controller.find(id) else {
        return Some(missing(TaskOperation::Edit, id));
    };

    match prompt.request_task(PromptRequest::edit(&task)).await {
        PromptResponse::Submitted(draft) => Some(controller.edit(id, draft).await),
        PromptResponse::Cancelled => {
            debug!(task_id = %id, "edit cancelled");
            None
        }
    }
}

/// Asks for confirmation and deletes the task with `id` when given.
///
/// Reports [`TaskStoreError::NotFound`] without prompting when the task is
/// not in the local collection.
pub async fn prompt_delete<S, P>(
    controller: &mut TaskCollectionController<S>,
    prompt: &P,
    id: &TaskId,
) -> Option<Notification>
where
    S: TaskStore,
    P: TaskPrompt + ?Sized,
{
    let Some(task) = controller.find(id) else {
        return Some(missing(TaskOperation::Delete, id));
    };

    match prompt.confirm_delete(&task).await {
        Confirmation::Confirmed => Some(controller.delete(id).await),
        Confirmation::Declined => {
            debug!(task_id = %id, "delete declined");
            None
        }
    }
}

fn missing(operation: TaskOperation, id: &TaskId) -> Notification {
    Notification::Failed {
        operation,
        task_id: Some(id.clone()),
        error: TaskStoreError::NotFound(id.clone()),
    }
}
