//! Live view of one session: the client list, the selected client, and the
//! selected client's tasks.
//!
//! The tracker owns the client feed and at most one task feed. Every client
//! snapshot replaces the displayed list (dropping any provisional client),
//! reconciles the selection, and re-targets the task feed when the selection
//! moved. The old task feed is always cancelled before the new one opens, so
//! a late emission for one client can never overwrite another client's tasks.

use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{
    ClientCoordinator, ClientFeed, EntityStore, OnboardingError, OnboardingResult, TaskFeed,
    TaskOrderingService, error::write_failed,
};
use crate::{
    config::TrackerConfig,
    onboarding::domain::{
        Client, ClientId, ClientList, OnboardingDomainError, ReorderRequest, Selection, Task,
        TaskId, TaskPriority, TaskStatus,
    },
    session::{Session, ports::IdentityProvider},
    store::{domain::StoreError, ports::DocumentStore},
};

/// What changed after an emission was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerEvent {
    /// A client snapshot replaced the client list.
    ClientsUpdated {
        /// Whether reconciliation moved the selection.
        selection_changed: bool,
    },
    /// A task snapshot replaced the selected client's task list.
    TasksUpdated,
}

#[derive(Debug)]
struct ActiveTasks {
    client_id: ClientId,
    feed: TaskFeed,
}

enum Update {
    Clients(Option<OnboardingResult<Vec<Client>>>),
    Tasks(Option<OnboardingResult<Vec<Task>>>),
}

/// Session-scoped controller tying the feeds, the selection, and the write
/// services together.
pub struct Tracker<S, C>
where
    S: DocumentStore,
    C: Clock + Send + Sync,
{
    session: Session,
    entities: EntityStore<S>,
    coordinator: ClientCoordinator<S, C>,
    ordering: TaskOrderingService<S, C>,
    clients: ClientList,
    selection: Selection,
    client_feed: ClientFeed,
    task_feed: Option<ActiveTasks>,
    tasks: Vec<Task>,
    failure: Option<OnboardingError>,
}

impl<S, C> Tracker<S, C>
where
    S: DocumentStore,
    C: Clock + Send + Sync,
{
    /// Signs in through `provider` and starts a tracker for the new session.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingError::Initialization`] when sign-in fails, plus
    /// the errors of [`Self::start`].
    pub async fn connect(
        provider: &impl IdentityProvider,
        store: Arc<S>,
        clock: Arc<C>,
        config: &TrackerConfig,
    ) -> OnboardingResult<Self> {
        let session = Session::establish(provider).await.map_err(|err| {
            warn!(error = %err, "sign-in failed");
            OnboardingError::Initialization(err)
        })?;
        Self::start(session, store, clock, config)
    }

    /// Starts a tracker for an established session and opens the client
    /// feed. No client is selected until the first snapshot is applied.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingError::Validation`] for an unusable configuration
    /// and [`OnboardingError::Fetch`] when the client feed cannot be opened.
    pub fn start(
        session: Session,
        store: Arc<S>,
        clock: Arc<C>,
        config: &TrackerConfig,
    ) -> OnboardingResult<Self> {
        let template = config.seed_template()?;
        let entities = EntityStore::new(Arc::clone(&store));
        let client_feed = entities.subscribe_clients(&session)?;
        let coordinator = ClientCoordinator::new(Arc::clone(&store), Arc::clone(&clock))
            .with_seed_template(template)
            .with_max_batch_operations(config.max_batch_operations);
        let ordering = TaskOrderingService::new(store, clock)
            .with_max_batch_operations(config.max_batch_operations);
        info!(user = %session.user_id(), "tracker started");

        Ok(Self {
            session,
            entities,
            coordinator,
            ordering,
            clients: ClientList::new(),
            selection: Selection::NoneSelected,
            client_feed,
            task_feed: None,
            tasks: Vec::new(),
            failure: None,
        })
    }

    /// Returns the session the tracker works for.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the displayed clients, oldest first.
    #[must_use]
    pub fn clients(&self) -> &[Client] {
        self.clients.clients()
    }

    /// Returns `true` when the client is shown but not yet confirmed by a
    /// snapshot.
    #[must_use]
    pub fn is_provisional(&self, id: &ClientId) -> bool {
        self.clients.is_provisional(id)
    }

    /// Returns the current selection.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Returns the selected client, if any.
    #[must_use]
    pub fn selected_client(&self) -> Option<&Client> {
        self.selection
            .client_id()
            .and_then(|id| self.clients.get(id))
    }

    /// Returns the selected client's tasks in display order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the terminal failure, once a feed has broken.
    #[must_use]
    pub const fn failure(&self) -> Option<&OnboardingError> {
        self.failure.as_ref()
    }

    /// Waits for the next client or task emission and applies it.
    ///
    /// Client emissions are applied ahead of task emissions that are ready
    /// at the same time.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingError::Fetch`] when a feed breaks. The tracker
    /// then stays failed and returns the same error from every later call.
    pub async fn next_event(&mut self) -> OnboardingResult<TrackerEvent> {
        self.ensure_live()?;
        let update = match self.task_feed.as_mut() {
            Some(active) => tokio::select! {
                biased;
                clients = self.client_feed.recv() => Update::Clients(clients),
                tasks = active.feed.recv() => Update::Tasks(tasks),
            },
            None => Update::Clients(self.client_feed.recv().await),
        };
        self.apply(update)
    }

    /// Applies every emission already delivered, without waiting. Returns
    /// the number of emissions applied.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingError::Fetch`] when a feed breaks.
    pub fn apply_pending(&mut self) -> OnboardingResult<usize> {
        self.ensure_live()?;
        let mut applied = 0;
        loop {
            let pending = self
                .client_feed
                .try_recv()
                .map(|clients| Update::Clients(Some(clients)))
                .or_else(|| {
                    self.task_feed
                        .as_mut()
                        .and_then(|active| active.feed.try_recv())
                        .map(|tasks| Update::Tasks(Some(tasks)))
                });
            let Some(update) = pending else {
                return Ok(applied);
            };
            self.apply(update)?;
            applied += 1;
        }
    }

    /// Creates a client with its seed tasks and selects it right away.
    ///
    /// The client is shown provisionally until the next client snapshot,
    /// which replaces it unconditionally.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingError::Validation`] for a blank name and
    /// [`OnboardingError::Write`] when the batch is rejected; the list and
    /// selection are unchanged in both cases.
    pub async fn add_client(&mut self, name: &str) -> OnboardingResult<ClientId> {
        self.ensure_live()?;
        let client = self
            .coordinator
            .create_client_with_seed_tasks(&self.session, name)
            .await?;
        let id = client.id().clone();
        self.clients.add_provisional(client);
        self.set_selection(Selection::Selected(id.clone()))?;
        Ok(id)
    }

    /// Deletes a client and its tasks. The selection follows on the next
    /// client snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingError::Write`] when the cascade fails.
    pub async fn delete_client(&self, id: &ClientId) -> OnboardingResult<usize> {
        self.ensure_live()?;
        self.coordinator
            .delete_client_cascade(&self.session, id)
            .await
    }

    /// Renames a client.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingError::Validation`] for a blank name and
    /// [`OnboardingError::Write`] when the update fails.
    pub async fn rename_client(&self, id: &ClientId, name: &str) -> OnboardingResult<()> {
        self.ensure_live()?;
        self.coordinator
            .rename_client(&self.session, id, name)
            .await
    }

    /// Selects a displayed client and switches the task feed to it.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingError::Validation`] when the client is not
    /// displayed, or [`OnboardingError::Fetch`] when its task feed cannot be
    /// opened.
    pub fn select_client(&mut self, id: &ClientId) -> OnboardingResult<()> {
        self.ensure_live()?;
        let next = Selection::select(id, self.clients.clients())?;
        self.set_selection(next)
    }

    /// Appends a task to the selected client.
    ///
    /// The position comes from the client's stored tasks, so an append made
    /// before the task feed has caught up still lands last.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingError::Validation`] when no client is selected,
    /// the name is blank, or the client is at its task limit, and
    /// [`OnboardingError::Write`] when the tasks cannot be read or the
    /// create fails.
    pub async fn add_task(&self, name: &str) -> OnboardingResult<Task> {
        let client_id = self.selected_id()?;
        let current = self
            .entities
            .load_tasks(&self.session, &client_id)
            .await
            .map_err(|err| write_failed("add task", err))?;
        self.ordering
            .add_task(&self.session, &client_id, name, &current)
            .await
    }

    /// Deletes one of the selected client's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingError::Validation`] when no client is selected and
    /// [`OnboardingError::Write`] when the delete fails.
    pub async fn delete_task(&self, task_id: &TaskId) -> OnboardingResult<()> {
        let client_id = self.selected_id()?;
        self.ordering
            .delete_task(&self.session, &client_id, task_id)
            .await
    }

    /// Moves a task within the displayed task list.
    ///
    /// The displayed list is left as is; the resulting task snapshot brings
    /// the new order.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingError::Validation`] when no client is selected or
    /// an index is out of range, and [`OnboardingError::Write`] when the
    /// batch fails.
    pub async fn reorder_tasks(&self, request: ReorderRequest) -> OnboardingResult<Vec<Task>> {
        let client_id = self.selected_id()?;
        self.ordering
            .reorder_tasks(&self.session, &client_id, &self.tasks, request)
            .await
    }

    /// Sets the status of one of the selected client's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingError::Validation`] when no client is selected and
    /// [`OnboardingError::Write`] when the update fails.
    pub async fn set_status(&self, task_id: &TaskId, status: TaskStatus) -> OnboardingResult<()> {
        let client_id = self.selected_id()?;
        self.ordering
            .set_status(&self.session, &client_id, task_id, status)
            .await
    }

    /// Sets the priority of one of the selected client's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingError::Validation`] when no client is selected and
    /// [`OnboardingError::Write`] when the update fails.
    pub async fn set_priority(
        &self,
        task_id: &TaskId,
        priority: TaskPriority,
    ) -> OnboardingResult<()> {
        let client_id = self.selected_id()?;
        self.ordering
            .set_priority(&self.session, &client_id, task_id, priority)
            .await
    }

    /// Sets or clears the due date of one of the selected client's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingError::Validation`] when no client is selected and
    /// [`OnboardingError::Write`] when the update fails.
    pub async fn set_due_date(
        &self,
        task_id: &TaskId,
        due_date: Option<NaiveDate>,
    ) -> OnboardingResult<()> {
        let client_id = self.selected_id()?;
        self.ordering
            .set_due_date(&self.session, &client_id, task_id, due_date)
            .await
    }

    /// Renames one of the selected client's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingError::Validation`] when no client is selected or
    /// the name is blank, and [`OnboardingError::Write`] when the update
    /// fails.
    pub async fn rename_task(&self, task_id: &TaskId, name: &str) -> OnboardingResult<()> {
        let client_id = self.selected_id()?;
        self.ordering
            .rename_task(&self.session, &client_id, task_id, name)
            .await
    }

    fn ensure_live(&self) -> OnboardingResult<()> {
        self.failure.clone().map_or(Ok(()), Err)
    }

    fn selected_id(&self) -> OnboardingResult<ClientId> {
        self.ensure_live()?;
        self.selection
            .client_id()
            .cloned()
            .ok_or(OnboardingError::Validation(
                OnboardingDomainError::NoClientSelected,
            ))
    }

    fn apply(&mut self, update: Update) -> OnboardingResult<TrackerEvent> {
        match update {
            Update::Clients(Some(Ok(clients))) => self.apply_clients(clients),
            Update::Tasks(Some(Ok(tasks))) => {
                debug!(tasks = tasks.len(), "applied task snapshot");
                self.tasks = tasks;
                Ok(TrackerEvent::TasksUpdated)
            }
            Update::Clients(Some(Err(err))) | Update::Tasks(Some(Err(err))) => Err(self.fail(err)),
            Update::Clients(None) | Update::Tasks(None) => {
                Err(self.fail(OnboardingError::Fetch(StoreError::ListenerClosed)))
            }
        }
    }

    fn apply_clients(&mut self, clients: Vec<Client>) -> OnboardingResult<TrackerEvent> {
        debug!(clients = clients.len(), "applied client snapshot");
        self.clients.apply_snapshot(clients);
        let next = self.selection.reconcile(self.clients.clients());
        let selection_changed = next != self.selection;
        self.set_selection(next)?;
        Ok(TrackerEvent::ClientsUpdated { selection_changed })
    }

    fn set_selection(&mut self, next: Selection) -> OnboardingResult<()> {
        if next == self.selection {
            return Ok(());
        }
        self.selection = next;
        self.switch_task_feed()
    }

    fn switch_task_feed(&mut self) -> OnboardingResult<()> {
        if let Some(mut previous) = self.task_feed.take() {
            previous.feed.cancel();
            debug!(client = %previous.client_id, "cancelled task feed");
        }
        self.tasks.clear();

        let Some(client_id) = self.selection.client_id().cloned() else {
            return Ok(());
        };
        match self.entities.subscribe_tasks(&self.session, &client_id) {
            Ok(feed) => {
                self.task_feed = Some(ActiveTasks { client_id, feed });
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    fn fail(&mut self, err: OnboardingError) -> OnboardingError {
        warn!(error = %err, "live view failed");
        self.client_feed.cancel();
        if let Some(mut active) = self.task_feed.take() {
            active.feed.cancel();
        }
        self.failure = Some(err.clone());
        err
    }
}
