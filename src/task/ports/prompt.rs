//! Port for the interactive surface that collects task input.

use crate::task::domain::{Task, TaskDraft};
use async_trait::async_trait;

/// What the surface is being asked to collect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptRequest {
    /// A blank form for a new task.
    NewTask,
    /// A form pre-filled with the current values of an existing task.
    EditTask {
        /// Current label.
        text: String,
        /// Current deadline, as entered.
        deadline: String,
    },
}

impl PromptRequest {
    /// Builds an edit request pre-filled from `task`.
    #[must_use]
    pub fn edit(task: &Task) -> Self {
        Self::EditTask {
            text: task.text().to_owned(),
            deadline: task.deadline().as_str().to_owned(),
        }
    }
}

/// Outcome of a task form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse {
    /// The user submitted values that passed validation.
    Submitted(TaskDraft),
    /// The user dismissed the form.
    Cancelled,
}

/// Outcome of a yes/no confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// The user agreed.
    Confirmed,
    /// The user declined or dismissed the dialog.
    Declined,
}

/// Modal input surface.
///
/// Implementations own validation: they keep the form open until
/// [`TaskDraft::new`] accepts the values, or report cancellation.
#[async_trait]
pub trait TaskPrompt: Send + Sync {
    /// Asks for a label and deadline.
    async fn request_task(&self, request: PromptRequest) -> PromptResponse;

    /// Asks whether `task` should be permanently deleted.
    async fn confirm_delete(&self, task: &Task) -> Confirmation;
}
