//! In-memory integration tests for prompt-driven mutations.

use taskclock::task::{
    adapters::memory::InMemoryTaskStore,
    ports::{Confirmation, PromptRequest, PromptResponse},
    services::{TaskCollectionController, prompt_add, prompt_delete, prompt_edit},
};
use rstest::rstest;

use super::helpers::{QueuedPrompt, draft, id, ids, shared, store};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn add_edit_and_delete_through_prompts(
    store: InMemoryTaskStore,
) -> Result<(), eyre::Report> {
    let mut controller = TaskCollectionController::new(shared(&store));
    eyre::ensure!(controller.load().await.is_success(), "initial load failed");
    let prompt = QueuedPrompt::default();

    prompt.answer(PromptResponse::Submitted(draft("Buy milk", "2030-01-01T18:00")));
    let added = prompt_add(&mut controller, &prompt)
        .await
        .ok_or_else(|| eyre::eyre!("submitted form produced no notification"))?;
    let milk = added
        .task_id()
        .cloned()
        .ok_or_else(|| eyre::eyre!("add did not report an id"))?;

    prompt.answer(PromptResponse::Submitted(draft("Buy oat milk", "2030-01-01T19:00")));
    let edited = prompt_edit(&mut controller, &prompt, &milk).await;
    eyre::ensure!(edited.is_some_and(|n| n.is_success()), "edit did not succeed");

    prompt.confirm(Confirmation::Declined);
    assert!(prompt_delete(&mut controller, &prompt, &id("rent")).await.is_none());
    prompt.confirm(Confirmation::Confirmed);
    let deleted = prompt_delete(&mut controller, &prompt, &id("rent")).await;
    eyre::ensure!(deleted.is_some_and(|n| n.is_success()), "delete did not succeed");

    assert_eq!(
        prompt.seen(),
        vec![
            PromptRequest::NewTask,
            PromptRequest::EditTask {
                text: "Buy milk".to_owned(),
                deadline: "2030-01-01T18:00".to_owned(),
            },
        ]
    );
    let stored = store.records()?;
    assert_eq!(controller.tasks(), stored);
    assert_eq!(
        ids(&stored),
        vec!["dentist".to_owned(), "passport".to_owned(), milk.as_str().to_owned()]
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dismissed_forms_leave_store_untouched(
    store: InMemoryTaskStore,
) -> Result<(), eyre::Report> {
    let before = store.records()?;
    let mut controller = TaskCollectionController::new(shared(&store));
    eyre::ensure!(controller.load().await.is_success(), "initial load failed");
    let prompt = QueuedPrompt::default();

    assert!(prompt_add(&mut controller, &prompt).await.is_none());
    assert!(prompt_edit(&mut controller, &prompt, &id("dentist")).await.is_none());

    assert_eq!(store.records()?, before);
    assert_eq!(controller.tasks(), before);
    Ok(())
}
