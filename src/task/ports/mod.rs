//! Port contracts for the task tracker.
//!
//! Ports define infrastructure-agnostic interfaces used by task services:
//! the remote task store and the interactive input surface.

pub mod prompt;
pub mod store;

pub use prompt::{Confirmation, PromptRequest, PromptResponse, TaskPrompt};
pub use store::{TASKS_COLLECTION, TaskStore, TaskStoreError, TaskStoreResult};
