//! Shared world state for client onboarding BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use onboarding::{
    config::TrackerConfig,
    onboarding::{
        domain::ClientId,
        services::{OnboardingError, Tracker},
    },
    session::{Session, UserId},
    store::{adapters::memory::InMemoryDocumentStore, domain::DocumentId},
};
use rstest::fixture;

/// Tracker type used by the BDD world.
pub type TestTracker = Tracker<InMemoryDocumentStore, DefaultClock>;

/// Scenario world for client onboarding behaviour tests.
pub struct OnboardingWorld {
    pub store: Arc<InMemoryDocumentStore>,
    pub session: Session,
    pub tracker: Option<TestTracker>,
    pub last_error: Option<OnboardingError>,
}

impl OnboardingWorld {
    /// Creates a world with an empty store and no running tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryDocumentStore::new()),
            session: Session::new(UserId::from_document_id(DocumentId::generate())),
            tracker: None,
            last_error: None,
        }
    }

    /// Starts the tracker and applies the initial snapshots.
    ///
    /// # Errors
    ///
    /// Returns an error if the tracker cannot start.
    pub fn start_tracker(&mut self) -> Result<(), eyre::Report> {
        let mut tracker = Tracker::start(
            self.session.clone(),
            Arc::clone(&self.store),
            Arc::new(DefaultClock),
            &TrackerConfig::default(),
        )?;
        tracker.apply_pending()?;
        self.tracker = Some(tracker);
        Ok(())
    }

    /// Returns the running tracker.
    ///
    /// # Errors
    ///
    /// Returns an error if no tracker has been started.
    pub fn tracker(&self) -> Result<&TestTracker, eyre::Report> {
        self.tracker
            .as_ref()
            .ok_or_else(|| eyre::eyre!("tracker has not been started in scenario world"))
    }

    /// Returns the running tracker mutably.
    ///
    /// # Errors
    ///
    /// Returns an error if no tracker has been started.
    pub fn tracker_mut(&mut self) -> Result<&mut TestTracker, eyre::Report> {
        self.tracker
            .as_mut()
            .ok_or_else(|| eyre::eyre!("tracker has not been started in scenario world"))
    }

    /// Finds a displayed client by name.
    ///
    /// # Errors
    ///
    /// Returns an error if no displayed client has that name.
    pub fn client_named(&self, name: &str) -> Result<ClientId, eyre::Report> {
        self.tracker()?
            .clients()
            .iter()
            .find(|client| client.name().as_str() == name)
            .map(|client| client.id().clone())
            .ok_or_else(|| eyre::eyre!("no client named {name} is displayed"))
    }
}

impl Default for OnboardingWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> OnboardingWorld {
    OnboardingWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
