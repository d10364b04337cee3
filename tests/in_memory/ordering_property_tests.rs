//! In-memory integration tests for task order density and reordering.

use std::sync::Arc;

use super::helpers::{
    coordinator, ensure_dense, names, ordering, session, store, stored_tasks,
};
use onboarding::{
    onboarding::{
        adapters::namespace,
        domain::{Client, ReorderRequest, SeedTemplate, TaskStatus},
        services::EntityStore,
    },
    session::Session,
    store::adapters::memory::InMemoryDocumentStore,
};
use rstest::rstest;

async fn client_with_tasks(
    store: &Arc<InMemoryDocumentStore>,
    session: &Session,
    tasks: &[&str],
) -> Result<Client, eyre::Report> {
    let template = SeedTemplate::new(tasks.iter().copied())?;
    Ok(coordinator(store)
        .with_seed_template(template)
        .create_client_with_seed_tasks(session, "Acme")
        .await?)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moving_first_to_third_renumbers_every_task(
    store: Arc<InMemoryDocumentStore>,
    session: Session,
) -> Result<(), eyre::Report> {
    let client = client_with_tasks(&store, &session, &["A", "B", "C", "D"]).await?;
    let displayed = stored_tasks(&store, &session, client.id()).await?;

    ordering(&store)
        .reorder_tasks(&session, client.id(), &displayed, ReorderRequest::new(0, 2))
        .await?;

    let stored = stored_tasks(&store, &session, client.id()).await?;
    eyre::ensure!(
        names(&stored) == ["B", "C", "A", "D"],
        "unexpected order {:?}",
        names(&stored)
    );
    ensure_dense(&stored)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn appends_and_reorders_keep_positions_a_permutation(
    store: Arc<InMemoryDocumentStore>,
    session: Session,
) -> Result<(), eyre::Report> {
    let client = client_with_tasks(&store, &session, &["seed"]).await?;
    let service = ordering(&store);
    let mut expected = vec!["seed".to_owned()];
    let mut state: usize = 7;

    for step in 0..12_usize {
        let displayed = stored_tasks(&store, &session, client.id()).await?;
        if step % 3 == 0 {
            let name = format!("task {step}");
            service
                .add_task(&session, client.id(), &name, &displayed)
                .await?;
            expected.push(name);
        } else {
            state = state.wrapping_mul(31).wrapping_add(17) % 101;
            let from = state % displayed.len();
            let to = (state / 7) % displayed.len();
            service
                .reorder_tasks(&session, client.id(), &displayed, ReorderRequest::new(from, to))
                .await?;
            let moved = expected.remove(from);
            expected.insert(to, moved);
        }

        let stored = stored_tasks(&store, &session, client.id()).await?;
        ensure_dense(&stored)?;
        eyre::ensure!(
            names(&stored) == expected,
            "step {step}: expected {expected:?}, found {:?}",
            names(&stored)
        );
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeating_a_status_changes_nothing_but_still_emits(
    store: Arc<InMemoryDocumentStore>,
    session: Session,
) -> Result<(), eyre::Report> {
    let client = client_with_tasks(&store, &session, &["A", "B"]).await?;
    let before = stored_tasks(&store, &session, client.id()).await?;
    let target = before
        .first()
        .ok_or_else(|| eyre::eyre!("expected a seeded task"))?;
    let mut feed = EntityStore::new(Arc::clone(&store)).subscribe_tasks(&session, client.id())?;
    let _initial = feed.recv().await;

    ordering(&store)
        .set_status(&session, client.id(), target.id(), TaskStatus::Pending)
        .await?;

    let emission = feed
        .try_recv()
        .ok_or_else(|| eyre::eyre!("expected one emission"))??;
    eyre::ensure!(feed.try_recv().is_none(), "expected exactly one emission");
    eyre::ensure!(emission == before, "task fields changed");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_positions_leave_gaps_until_the_next_reorder(
    store: Arc<InMemoryDocumentStore>,
    session: Session,
) -> Result<(), eyre::Report> {
    let client = client_with_tasks(&store, &session, &["A", "B", "C"]).await?;
    let displayed = stored_tasks(&store, &session, client.id()).await?;
    let middle = displayed
        .get(1)
        .ok_or_else(|| eyre::eyre!("expected three tasks"))?;

    ordering(&store)
        .delete_task(&session, client.id(), middle.id())
        .await?;
    let gapped = stored_tasks(&store, &session, client.id()).await?;
    eyre::ensure!(ensure_dense(&gapped).is_err(), "delete should not renumber");
    eyre::ensure!(
        store
            .documents_in(&namespace::tasks_collection(&session, client.id()))
            .len()
            == 2,
        "one task should be gone"
    );

    ordering(&store)
        .reorder_tasks(&session, client.id(), &gapped, ReorderRequest::new(1, 1))
        .await?;
    let repaired = stored_tasks(&store, &session, client.id()).await?;
    eyre::ensure!(names(&repaired) == ["A", "C"], "order should be kept");
    ensure_dense(&repaired)
}
