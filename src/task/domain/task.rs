//! Task entity, validated input drafts, and partial field updates.

use super::{Deadline, TaskDomainError, TaskId};
use serde::{Deserialize, Serialize};

/// A tracked task: a label, a completion flag, and a deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    text: String,
    completed: bool,
    deadline: Deadline,
}

/// Parameter object for reconstructing a task held by the remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Store-assigned identifier.
    pub id: TaskId,
    /// Persisted label.
    pub text: String,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted deadline.
    pub deadline: Deadline,
}

impl Task {
    /// Creates a freshly added task from the identifier the store assigned.
    ///
    /// New tasks always start incomplete.
    #[must_use]
    pub fn new(id: TaskId, draft: TaskDraft) -> Self {
        Self {
            id,
            text: draft.text,
            completed: false,
            deadline: draft.deadline,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            text: data.text,
            completed: data.completed,
            deadline: data.deadline,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the task label.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns whether the task is marked complete.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the task deadline.
    #[must_use]
    pub const fn deadline(&self) -> &Deadline {
        &self.deadline
    }

    /// Replaces label and deadline with the values of an edit.
    pub fn apply_edit(&mut self, draft: TaskDraft) {
        self.text = draft.text;
        self.deadline = draft.deadline;
    }

    /// Flips the completion flag and returns the new value.
    pub const fn toggle_completed(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }

    /// Applies every field present in `patch`.
    pub fn apply_patch(&mut self, patch: &TaskPatch) {
        if let Some(text) = &patch.text {
            text.clone_into(&mut self.text);
        }
        if let Some(deadline) = &patch.deadline {
            self.deadline = deadline.clone();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }
}

/// Validated label and deadline supplied by the input surface.
///
/// Holding a `TaskDraft` proves both fields are non-empty and the deadline
/// parsed, so the controller never sees invalid input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    text: String,
    deadline: Deadline,
}

impl TaskDraft {
    /// Validates raw form values.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyText`] when the label is blank, or the
    /// deadline parsing errors described on [`Deadline::parse`].
    pub fn new(text: impl Into<String>, deadline: &str) -> Result<Self, TaskDomainError> {
        let parsed = Deadline::parse(deadline)?;
        Self::from_parts(text, parsed)
    }

    /// Builds a draft from an already parsed deadline.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyText`] when the label is blank.
    pub fn from_parts(text: impl Into<String>, deadline: Deadline) -> Result<Self, TaskDomainError> {
        let raw = text.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(TaskDomainError::EmptyText);
        }
        Ok(Self {
            text: normalized.to_owned(),
            deadline,
        })
    }

    /// Returns the validated label.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the validated deadline.
    #[must_use]
    pub const fn deadline(&self) -> &Deadline {
        &self.deadline
    }
}

/// Partial update of a stored task. Only present fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Replacement label.
    pub text: Option<String>,
    /// Replacement deadline.
    pub deadline: Option<Deadline>,
    /// Replacement completion flag.
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Patch writing the label and deadline of an edit.
    #[must_use]
    pub fn edit(draft: &TaskDraft) -> Self {
        Self {
            text: Some(draft.text.clone()),
            deadline: Some(draft.deadline.clone()),
            completed: None,
        }
    }

    /// Patch writing only the completion flag.
    #[must_use]
    pub const fn completion(completed: bool) -> Self {
        Self {
            text: None,
            deadline: None,
            completed: Some(completed),
        }
    }

    /// Returns `true` when no field would be written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_none() && self.deadline.is_none() && self.completed.is_none()
    }
}
