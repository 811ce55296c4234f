//! In-memory integration tests for collection operations.

use taskclock::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{SortDirection, SortKey, SortOrder},
    ports::TaskStoreError,
    services::{TaskCollectionController, TaskOperation},
};
use rstest::rstest;

use super::helpers::{at, draft, id, ids, shared, store};

type Controller = TaskCollectionController<InMemoryTaskStore>;

async fn loaded(store: &InMemoryTaskStore) -> Result<Controller, eyre::Report> {
    let mut controller = TaskCollectionController::new(shared(store));
    let notification = controller.load().await;
    eyre::ensure!(notification.is_success(), "load failed: {notification}");
    Ok(controller)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn local_collection_mirrors_store_after_each_operation(
    store: InMemoryTaskStore,
) -> Result<(), eyre::Report> {
    let mut controller = loaded(&store).await?;

    let added = controller.add(draft("Water plants", "2030-01-03T08:00")).await;
    let new_id = added
        .task_id()
        .cloned()
        .ok_or_else(|| eyre::eyre!("add did not report an id"))?;
    eyre::ensure!(controller.tasks() == store.records()?, "diverged after add");

    let edited = controller
        .edit(&id("rent"), draft("Pay council tax", "2030-01-06T10:00"))
        .await;
    eyre::ensure!(edited.is_success(), "edit failed: {edited}");
    eyre::ensure!(controller.tasks() == store.records()?, "diverged after edit");

    let toggled = controller.toggle_complete(&new_id).await;
    eyre::ensure!(toggled.is_success(), "toggle failed: {toggled}");
    eyre::ensure!(controller.tasks() == store.records()?, "diverged after toggle");

    let deleted = controller.delete(&id("dentist")).await;
    eyre::ensure!(deleted.is_success(), "delete failed: {deleted}");
    eyre::ensure!(controller.tasks() == store.records()?, "diverged after delete");

    assert_eq!(
        ids(&controller.tasks()),
        vec!["rent".to_owned(), "passport".to_owned(), new_id.as_str().to_owned()]
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reload_picks_up_changes_made_elsewhere(
    store: InMemoryTaskStore,
) -> Result<(), eyre::Report> {
    let mut controller = loaded(&store).await?;
    let mut other = loaded(&store).await?;

    let removed = other.delete(&id("passport")).await;
    eyre::ensure!(removed.is_success(), "delete failed: {removed}");
    assert_eq!(controller.tasks().len(), 3);

    let reloaded = controller.load().await;
    assert!(reloaded.is_success());
    assert_eq!(ids(&controller.tasks()), vec!["rent", "dentist"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn operations_on_missing_tasks_report_not_found(
    store: InMemoryTaskStore,
) -> Result<(), eyre::Report> {
    let mut controller = loaded(&store).await?;
    let ghost = id("ghost");

    let outcomes = [
        controller.edit(&ghost, draft("Anything", "2030-01-01T00:00")).await,
        controller.toggle_complete(&ghost).await,
        controller.delete(&ghost).await,
    ];

    let operations: Vec<_> = outcomes.iter().map(|n| n.operation()).collect();
    assert_eq!(
        operations,
        vec![TaskOperation::Edit, TaskOperation::ToggleComplete, TaskOperation::Delete]
    );
    assert!(
        outcomes
            .iter()
            .all(|n| n.error().is_some_and(TaskStoreError::is_not_found))
    );
    assert_eq!(controller.tasks(), store.records()?);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn views_follow_requested_order(store: InMemoryTaskStore) -> Result<(), eyre::Report> {
    let controller = loaded(&store).await?;
    let now = at(2030, 1, 1, 0, 0, 0);

    let soonest_first = controller.current_view(SortOrder::default(), now);
    let latest_first = controller.current_view(
        SortOrder::new(SortKey::Deadline, SortDirection::Descending),
        now,
    );
    let alphabetical = controller.current_view(
        SortOrder::new(SortKey::Label, SortDirection::Ascending),
        now,
    );

    assert_eq!(ids(&soonest_first), vec!["dentist", "rent", "passport"]);
    assert_eq!(ids(&latest_first), vec!["passport", "rent", "dentist"]);
    assert_eq!(ids(&alphabetical), vec!["dentist", "rent", "passport"]);
    Ok(())
}
