//! Application services for the task tracker.

mod board;
mod collection;
mod notification;
mod prompt_flow;
mod session;
mod ticker;

pub use board::{TaskBoard, TaskRowView, TaskStatus, project};
pub use collection::TaskCollectionController;
pub use notification::{Notification, TaskOperation};
pub use prompt_flow::{prompt_add, prompt_delete, prompt_edit};
pub use session::{SessionController, TrackerSession};
pub use ticker::Ticker;
