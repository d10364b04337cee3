//! In-memory integration tests for client creation, deletion and selection.

use std::sync::Arc;

use super::helpers::{
    coordinator, names, orders, session, start_tracker, store, stored_tasks,
};
use onboarding::{
    onboarding::{
        adapters::namespace,
        domain::{STANDARD_SEED_TASKS, Selection},
        services::OnboardingError,
    },
    session::Session,
    store::{adapters::memory::InMemoryDocumentStore, domain::StoreError},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn client_creation_writes_client_and_seed_tasks_together(
    store: Arc<InMemoryDocumentStore>,
    session: Session,
) -> Result<(), eyre::Report> {
    let mut tracker = start_tracker(&store, &session)?;

    let client_id = tracker.add_client("Acme Corp").await?;
    tracker.apply_pending()?;

    let clients = store.documents_in(&namespace::clients_collection(&session));
    let tasks = stored_tasks(&store, &session, &client_id).await?;
    eyre::ensure!(clients.len() == 1, "expected one client, found {}", clients.len());
    eyre::ensure!(
        names(&tasks) == STANDARD_SEED_TASKS.map(str::to_owned).to_vec(),
        "seed tasks out of template order: {:?}",
        names(&tasks)
    );
    eyre::ensure!(
        orders(&tasks) == (0..8).collect::<Vec<u32>>(),
        "seed orders should be 0..8, found {:?}",
        orders(&tasks)
    );
    eyre::ensure!(tracker.tasks() == tasks.as_slice(), "tracker shows stored tasks");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_client_creation_leaves_no_partial_data(
    store: Arc<InMemoryDocumentStore>,
    session: Session,
) -> Result<(), eyre::Report> {
    let mut tracker = start_tracker(&store, &session)?;
    store.fail_writes_with(StoreError::Unavailable("offline".to_owned()));

    let result = tracker.add_client("Acme Corp").await;
    store.clear_faults();
    let applied = tracker.apply_pending()?;

    eyre::ensure!(
        matches!(result, Err(OnboardingError::Write(_))),
        "expected a write failure, got {result:?}"
    );
    eyre::ensure!(applied == 0, "no snapshot should follow a rejected batch");
    eyre::ensure!(
        store
            .documents_in(&namespace::clients_collection(&session))
            .is_empty(),
        "no client should be stored"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cascade_delete_leaves_no_orphaned_tasks(
    store: Arc<InMemoryDocumentStore>,
    session: Session,
) -> Result<(), eyre::Report> {
    let client = coordinator(&store)
        .create_client_with_seed_tasks(&session, "Acme")
        .await?;

    let deleted = coordinator(&store)
        .delete_client_cascade(&session, client.id())
        .await?;

    let remaining = store.documents_in(&namespace::tasks_collection(&session, client.id()));
    eyre::ensure!(deleted == 8, "expected 8 deleted tasks, found {deleted}");
    eyre::ensure!(remaining.is_empty(), "tasks survived the cascade");
    eyre::ensure!(
        store
            .document(&namespace::client_document(&session, client.id()))
            .is_none(),
        "client survived the cascade"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removing_the_selected_client_selects_the_first_remaining(
    store: Arc<InMemoryDocumentStore>,
    session: Session,
) -> Result<(), eyre::Report> {
    let mut tracker = start_tracker(&store, &session)?;
    let first = tracker.add_client("First").await?;
    tracker.apply_pending()?;
    let second = tracker.add_client("Second").await?;
    tracker.apply_pending()?;
    eyre::ensure!(
        tracker.selection() == &Selection::Selected(second.clone()),
        "new client should be selected"
    );

    tracker.delete_client(&second).await?;
    tracker.apply_pending()?;
    eyre::ensure!(
        tracker.selection() == &Selection::Selected(first.clone()),
        "selection should fall back to the first client"
    );
    eyre::ensure!(
        tracker.tasks().iter().all(|task| task.client_id() == &first),
        "tasks should belong to the fallback client"
    );

    tracker.delete_client(&first).await?;
    tracker.apply_pending()?;
    eyre::ensure!(
        tracker.selection() == &Selection::NoneSelected,
        "selection should clear with the last client"
    );
    eyre::ensure!(tracker.tasks().is_empty(), "no tasks without a client");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lost_connection_stops_the_live_view(
    store: Arc<InMemoryDocumentStore>,
    session: Session,
) -> Result<(), eyre::Report> {
    let mut tracker = start_tracker(&store, &session)?;
    tracker.add_client("Acme").await?;
    tracker.apply_pending()?;

    store.break_listeners(&StoreError::Unavailable("connection reset".to_owned()));
    let error = tracker
        .next_event()
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("expected the feed to fail"))?;

    eyre::ensure!(error.is_fatal(), "fetch failures end the session");
    eyre::ensure!(
        matches!(error, OnboardingError::Fetch(StoreError::Unavailable(_))),
        "unexpected error {error:?}"
    );
    eyre::ensure!(tracker.failure() == Some(&error), "tracker keeps the failure");
    Ok(())
}
