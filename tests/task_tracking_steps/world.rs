//! Shared world state for task tracking BDD scenarios.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rstest::fixture;
use taskclock::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{Deadline, SortOrder, Task, TaskDraft, TaskId, TaskPatch},
    ports::{
        Confirmation, PromptRequest, PromptResponse, TaskPrompt, TaskStore, TaskStoreError,
        TaskStoreResult,
    },
    services::{Notification, TaskCollectionController, TaskRowView, project},
};

/// In-memory store that can be told to reject updates.
#[derive(Clone, Default)]
pub struct ScenarioStore {
    pub inner: InMemoryTaskStore,
    pub reject_updates: Arc<AtomicBool>,
}

#[async_trait]
impl TaskStore for ScenarioStore {
    async fn list_all(&self) -> TaskStoreResult<Vec<Task>> {
        self.inner.list_all().await
    }

    async fn create(&self, draft: &TaskDraft) -> TaskStoreResult<TaskId> {
        self.inner.create(draft).await
    }

    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> TaskStoreResult<()> {
        if self.reject_updates.load(Ordering::SeqCst) {
            return Err(TaskStoreError::PermissionDenied(
                "updates are disabled".to_owned(),
            ));
        }
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: &TaskId) -> TaskStoreResult<()> {
        self.inner.delete(id).await
    }
}

/// Prompt that dismisses every form and gives one fixed confirmation.
pub struct AnsweringPrompt(pub Confirmation);

#[async_trait]
impl TaskPrompt for AnsweringPrompt {
    async fn request_task(&self, _request: PromptRequest) -> PromptResponse {
        PromptResponse::Cancelled
    }

    async fn confirm_delete(&self, _task: &Task) -> Confirmation {
        self.0
    }
}

/// Controller type used by the BDD world.
pub type ScenarioController = TaskCollectionController<ScenarioStore>;

/// Scenario world for task tracking behaviour tests.
pub struct TrackingWorld {
    pub store: ScenarioStore,
    pub controller: Option<ScenarioController>,
    pub order: SortOrder,
    pub now: DateTime<Utc>,
    pub last_notification: Option<Notification>,
    pub last_frame: Vec<TaskRowView>,
}

impl TrackingWorld {
    /// Creates a world with an empty store and the clock at the start of 2030.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: ScenarioStore::default(),
            controller: None,
            order: SortOrder::default(),
            now: DateTime::<Utc>::from_timestamp(1_893_456_000, 0).unwrap_or_default(),
            last_notification: None,
            last_frame: Vec::new(),
        }
    }

    /// Returns the controller, loading it from the store on first use.
    pub fn controller(&mut self) -> Result<&mut ScenarioController, eyre::Report> {
        if self.controller.is_none() {
            let mut controller = TaskCollectionController::new(Arc::new(self.store.clone()));
            let loaded = run_async(controller.load());
            eyre::ensure!(loaded.is_success(), "initial load failed: {loaded}");
            self.controller = Some(controller);
        }
        self.controller
            .as_mut()
            .ok_or_else(|| eyre::eyre!("controller missing after load"))
    }

    /// Renders the board at the world's clock reading.
    pub fn render(&mut self) -> Result<Vec<TaskRowView>, eyre::Report> {
        let (order, now) = (self.order, self.now);
        let tasks = self.controller()?.tasks();
        let frame = project(&tasks, order, now);
        self.last_frame.clone_from(&frame);
        Ok(frame)
    }

    /// Finds the identifier of the local task with label `text`.
    pub fn id_of(&mut self, text: &str) -> Result<TaskId, eyre::Report> {
        self.controller()?
            .tasks()
            .iter()
            .find(|task| task.text() == text)
            .map(|task| task.id().clone())
            .ok_or_else(|| eyre::eyre!("no task labelled {text:?}"))
    }
}

impl Default for TrackingWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TrackingWorld {
    TrackingWorld::default()
}

/// Builds a draft whose deadline is read as UTC.
pub fn utc_draft(text: &str, raw_deadline: &str) -> Result<TaskDraft, eyre::Report> {
    let deadline = Deadline::parse_in(raw_deadline, &Utc)?;
    Ok(TaskDraft::from_parts(text, deadline)?)
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
