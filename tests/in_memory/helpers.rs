//! Shared test helpers for in-memory integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use taskclock::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{Deadline, PersistedTaskData, Task, TaskDraft, TaskId, TaskPatch},
    ports::{
        Confirmation, PromptRequest, PromptResponse, TaskPrompt, TaskStore, TaskStoreResult,
    },
};

/// Clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Builds a UTC instant.
///
/// # Panics
///
/// Panics if the components do not form a valid date and time.
#[must_use]
pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, second)
        .single()
        .expect("valid instant")
}

/// Parses a deadline as UTC so results do not depend on the host zone.
///
/// # Panics
///
/// Panics if `raw` is not a supported deadline.
#[must_use]
pub fn deadline(raw: &str) -> Deadline {
    Deadline::parse_in(raw, &chrono::Utc).expect("valid deadline")
}

/// Builds a draft with a UTC deadline.
///
/// # Panics
///
/// Panics if `text` is blank or `raw_deadline` is invalid.
#[must_use]
pub fn draft(text: &str, raw_deadline: &str) -> TaskDraft {
    TaskDraft::from_parts(text, deadline(raw_deadline)).expect("valid draft")
}

/// Builds an identifier.
///
/// # Panics
///
/// Panics if `value` is blank.
#[must_use]
pub fn id(value: &str) -> TaskId {
    TaskId::new(value).expect("valid id")
}

/// Builds a stored task.
#[must_use]
pub fn task(task_id: &str, text: &str, raw_deadline: &str, completed: bool) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: id(task_id),
        text: text.to_owned(),
        completed,
        deadline: deadline(raw_deadline),
    })
}

/// Returns identifiers in order.
#[must_use]
pub fn ids(tasks: &[Task]) -> Vec<String> {
    tasks.iter().map(|t| t.id().as_str().to_owned()).collect()
}

/// Provides a store holding three incomplete tasks.
#[fixture]
pub fn store() -> InMemoryTaskStore {
    InMemoryTaskStore::with_tasks(vec![
        task("rent", "Pay rent", "2030-01-05T10:00", false),
        task("dentist", "Book dentist", "2030-01-02T10:00", false),
        task("passport", "Renew passport", "2030-01-09T10:00", false),
    ])
}

/// Store whose calls never resolve.
pub struct HangingStore;

#[async_trait]
impl TaskStore for HangingStore {
    async fn list_all(&self) -> TaskStoreResult<Vec<Task>> {
        std::future::pending().await
    }

    async fn create(&self, _draft: &TaskDraft) -> TaskStoreResult<TaskId> {
        std::future::pending().await
    }

    async fn update(&self, _id: &TaskId, _patch: &TaskPatch) -> TaskStoreResult<()> {
        std::future::pending().await
    }

    async fn delete(&self, _id: &TaskId) -> TaskStoreResult<()> {
        std::future::pending().await
    }
}

/// Prompt that replays queued answers and records the requests it saw.
#[derive(Default)]
pub struct QueuedPrompt {
    responses: Mutex<Vec<PromptResponse>>,
    confirmations: Mutex<Vec<Confirmation>>,
    seen: Mutex<Vec<PromptRequest>>,
}

impl QueuedPrompt {
    /// Queues a form answer.
    ///
    /// # Panics
    ///
    /// Panics if the queue lock is poisoned.
    pub fn answer(&self, response: PromptResponse) {
        self.responses.lock().expect("responses lock").push(response);
    }

    /// Queues a confirmation answer.
    ///
    /// # Panics
    ///
    /// Panics if the queue lock is poisoned.
    pub fn confirm(&self, answer: Confirmation) {
        self.confirmations.lock().expect("confirmations lock").push(answer);
    }

    /// Returns every form request seen so far.
    ///
    /// # Panics
    ///
    /// Panics if the record lock is poisoned.
    #[must_use]
    pub fn seen(&self) -> Vec<PromptRequest> {
        self.seen.lock().expect("seen lock").clone()
    }
}

#[async_trait]
impl TaskPrompt for QueuedPrompt {
    async fn request_task(&self, request: PromptRequest) -> PromptResponse {
        self.seen.lock().expect("seen lock").push(request);
        let mut queued = self.responses.lock().expect("responses lock");
        if queued.is_empty() {
            PromptResponse::Cancelled
        } else {
            queued.remove(0)
        }
    }

    async fn confirm_delete(&self, _task: &Task) -> Confirmation {
        let mut queued = self.confirmations.lock().expect("confirmations lock");
        if queued.is_empty() {
            Confirmation::Declined
        } else {
            queued.remove(0)
        }
    }
}

/// Shares a store between the code under test and assertions.
#[must_use]
pub fn shared(store: &InMemoryTaskStore) -> Arc<InMemoryTaskStore> {
    Arc::new(store.clone())
}
