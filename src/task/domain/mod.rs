//! Domain model for the task tracker.
//!
//! Tasks, their deadlines and countdown arithmetic, and the ordering rules
//! used to present a collection. Everything here is pure: no I/O, no clock
//! reads, no infrastructure types.

mod deadline;
mod error;
mod ids;
mod ordering;
mod task;

pub use deadline::{Deadline, EXPIRED_MARKER, format_remaining, remaining};
pub use error::TaskDomainError;
pub use ids::TaskId;
pub use ordering::{SortDirection, SortKey, SortOrder, sort_tasks};
pub use task::{PersistedTaskData, Task, TaskDraft, TaskPatch};
