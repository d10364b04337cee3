//! Shared test helpers for in-memory onboarding integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use onboarding::{
    config::TrackerConfig,
    onboarding::{
        domain::{ClientId, Task},
        services::{ClientCoordinator, EntityStore, TaskOrderingService, Tracker},
    },
    session::{Session, UserId},
    store::{adapters::memory::InMemoryDocumentStore, domain::DocumentId},
};
use rstest::fixture;

/// Tracker over the in-memory store.
pub type TestTracker = Tracker<InMemoryDocumentStore, DefaultClock>;

/// Provides a fresh in-memory store for each test.
#[fixture]
pub fn store() -> Arc<InMemoryDocumentStore> {
    Arc::new(InMemoryDocumentStore::new())
}

/// Provides a session for a fixed anonymous user.
#[fixture]
pub fn session() -> Session {
    let id = DocumentId::new("integration-user").unwrap_or_else(|_| DocumentId::generate());
    Session::new(UserId::from_document_id(id))
}

/// Starts a tracker with the default configuration and applies the initial
/// snapshots.
///
/// # Errors
///
/// Returns an error if the tracker cannot start or a snapshot fails.
pub fn start_tracker(
    store: &Arc<InMemoryDocumentStore>,
    session: &Session,
) -> Result<TestTracker, eyre::Report> {
    let mut tracker = Tracker::start(
        session.clone(),
        Arc::clone(store),
        Arc::new(DefaultClock),
        &TrackerConfig::default(),
    )?;
    tracker.apply_pending()?;
    Ok(tracker)
}

/// Builds a coordinator over `store`.
#[must_use]
pub fn coordinator(
    store: &Arc<InMemoryDocumentStore>,
) -> ClientCoordinator<InMemoryDocumentStore, DefaultClock> {
    ClientCoordinator::new(Arc::clone(store), Arc::new(DefaultClock))
}

/// Builds a task ordering service over `store`.
#[must_use]
pub fn ordering(
    store: &Arc<InMemoryDocumentStore>,
) -> TaskOrderingService<InMemoryDocumentStore, DefaultClock> {
    TaskOrderingService::new(Arc::clone(store), Arc::new(DefaultClock))
}

/// Reads a client's tasks in display order.
///
/// # Errors
///
/// Returns an error if the read fails.
pub async fn stored_tasks(
    store: &Arc<InMemoryDocumentStore>,
    session: &Session,
    client_id: &ClientId,
) -> Result<Vec<Task>, eyre::Report> {
    Ok(EntityStore::new(Arc::clone(store))
        .load_tasks(session, client_id)
        .await?)
}

/// Returns task names in list order.
#[must_use]
pub fn names(tasks: &[Task]) -> Vec<String> {
    tasks
        .iter()
        .map(|task| task.name().as_str().to_owned())
        .collect()
}

/// Returns task positions in list order.
#[must_use]
pub fn orders(tasks: &[Task]) -> Vec<u32> {
    tasks.iter().map(Task::order).collect()
}

/// Checks that positions are exactly `0..tasks.len()` in list order.
///
/// # Errors
///
/// Returns an error describing the first mismatch.
pub fn ensure_dense(tasks: &[Task]) -> Result<(), eyre::Report> {
    let expected: Vec<u32> = (0_u32..).take(tasks.len()).collect();
    eyre::ensure!(
        orders(tasks) == expected,
        "expected dense positions {expected:?}, found {:?}",
        orders(tasks)
    );
    Ok(())
}
