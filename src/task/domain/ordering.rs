//! Ordering of task collections for display.
//!
//! Sorting copies the input and uses a stable sort, so tasks that compare
//! equal keep their original relative order in both directions.

use super::{Task, remaining};
use chrono::{DateTime, Utc};
use feruca::Collator;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Field a task list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Task label, in locale collation order.
    Label,
    /// Parsed deadline instant.
    Deadline,
    /// Time left until the deadline at the moment of sorting.
    RemainingTime,
}

/// Direction a task list is ordered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Active key and direction of a task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortOrder {
    /// Field being ordered by.
    pub key: SortKey,
    /// Direction of the ordering.
    pub direction: SortDirection,
}

impl SortOrder {
    /// Creates a sort order.
    #[must_use]
    pub const fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Returns the order after the user selects `clicked`.
    ///
    /// Selecting the active key flips the direction; selecting another key
    /// switches to it in ascending order.
    #[must_use]
    pub fn clicked(self, clicked: SortKey) -> Self {
        if self.key == clicked {
            Self::new(self.key, self.direction.flipped())
        } else {
            Self::new(clicked, SortDirection::Ascending)
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        Self::new(SortKey::RemainingTime, SortDirection::Ascending)
    }
}

/// Returns a copy of `tasks` ordered by `order`.
///
/// `now` is shared by every comparison in the pass, so remaining-time
/// ordering is consistent within one call. Labels are collated with the
/// Unicode Collation Algorithm using CLDR root tailoring: accents and case
/// only break ties between otherwise equal letters, and lowercase sorts
/// before uppercase.
#[must_use]
pub fn sort_tasks(tasks: &[Task], order: SortOrder, now: DateTime<Utc>) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    let mut collator = Collator::default();
    sorted.sort_by(|left, right| {
        let ordering = match order.key {
            SortKey::Label => collator.collate(left.text(), right.text()),
            SortKey::Deadline => left.deadline().instant().cmp(&right.deadline().instant()),
            SortKey::RemainingTime => {
                remaining(left.deadline(), now).cmp(&remaining(right.deadline(), now))
            }
        };
        order.direction.apply(ordering)
    });
    sorted
}
