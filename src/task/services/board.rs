//! Derived, display-ready projection of the task collection.
//!
//! Nothing here is stored: rows are recomputed from the latest collection
//! snapshot and the clock every time they are requested.

use crate::task::domain::{
    SortKey, SortOrder, Task, TaskId, format_remaining, remaining, sort_tasks,
};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Display state of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Incomplete with time left.
    Pending,
    /// Incomplete and past its deadline.
    Expired,
    /// Marked complete, regardless of deadline.
    Completed,
}

/// One rendered task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRowView {
    /// Task identifier.
    pub id: TaskId,
    /// Task label.
    pub text: String,
    /// Completion flag.
    pub completed: bool,
    /// Deadline date as `{day}/{month}/{year}`.
    pub deadline_label: String,
    /// Countdown such as `1h 1m 1s`, or the expired marker.
    pub remaining_label: String,
    /// Display state.
    pub status: TaskStatus,
}

impl TaskRowView {
    /// Renders `task` as of `now`.
    #[must_use]
    pub fn render(task: &Task, now: DateTime<Utc>) -> Self {
        let left = remaining(task.deadline(), now);
        let status = if task.is_completed() {
            TaskStatus::Completed
        } else if left <= TimeDelta::zero() {
            TaskStatus::Expired
        } else {
            TaskStatus::Pending
        };

        Self {
            id: task.id().clone(),
            text: task.text().to_owned(),
            completed: task.is_completed(),
            deadline_label: task.deadline().date_label(),
            remaining_label: format_remaining(left),
            status,
        }
    }
}

/// Orders `tasks` and renders every row as of `now`.
#[must_use]
pub fn project(tasks: &[Task], order: SortOrder, now: DateTime<Utc>) -> Vec<TaskRowView> {
    sort_tasks(tasks, order, now)
        .iter()
        .map(|task| TaskRowView::render(task, now))
        .collect()
}

/// Read side of the tracker: follows collection snapshots and timer ticks
/// and renders frames on demand.
pub struct TaskBoard<C>
where
    C: Clock + Send + Sync,
{
    tasks: watch::Receiver<Vec<Task>>,
    ticks: watch::Receiver<u64>,
    clock: Arc<C>,
    order: SortOrder,
}

impl<C> TaskBoard<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a board in the default order.
    #[must_use]
    pub fn new(tasks: watch::Receiver<Vec<Task>>, ticks: watch::Receiver<u64>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            ticks,
            clock,
            order: SortOrder::default(),
        }
    }

    /// Returns the active order.
    #[must_use]
    pub const fn order(&self) -> SortOrder {
        self.order
    }

    /// Applies a click on the column for `key`.
    pub fn select_sort_key(&mut self, key: SortKey) {
        self.order = self.order.clicked(key);
        debug!(key = ?self.order.key, direction = ?self.order.direction, "sort order changed");
    }

    /// Renders the latest snapshot at the current clock reading.
    #[must_use]
    pub fn frame(&self) -> Vec<TaskRowView> {
        project(&self.tasks.borrow(), self.order, self.clock.utc())
    }

    /// Waits for a tick or a collection change and renders a new frame.
    ///
    /// Returns `None` once the controller or the ticker has gone away.
    pub async fn next_frame(&mut self) -> Option<Vec<TaskRowView>> {
        let open = tokio::select! {
            changed = self.tasks.changed() => changed.is_ok(),
            ticked = self.ticks.changed() => ticked.is_ok(),
        };
        if !open {
            debug!("board source closed");
            return None;
        }
        Some(self.frame())
    }
}
