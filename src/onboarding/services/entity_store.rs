//! Live client and task feeds over the document store.
//!
//! Every emission is a full, decoded, display-ordered snapshot that replaces
//! whatever the consumer held before. A broken channel or an undecodable
//! document ends the feed with a single [`OnboardingError::Fetch`].

use std::sync::Arc;
use tracing::debug;

use super::{OnboardingError, OnboardingResult};
use crate::{
    onboarding::{
        adapters::{documents, namespace},
        domain::{Client, ClientId, Task, ordering},
    },
    session::Session,
    store::{
        domain::{Document, StoreResult},
        ports::{DocumentStore, SnapshotResult, Subscription},
    },
};

/// Live feed of decoded snapshots.
#[derive(Debug)]
pub struct Feed<T> {
    subscription: Subscription,
    decode: fn(&Document) -> StoreResult<T>,
    arrange: fn(&mut [T]),
}

/// Feed of the session user's clients, oldest first.
pub type ClientFeed = Feed<Client>;

/// Feed of one client's tasks in display order.
pub type TaskFeed = Feed<Task>;

impl<T> Feed<T> {
    /// Waits for the next snapshot.
    ///
    /// Returns `None` once the feed is cancelled or has failed.
    pub async fn recv(&mut self) -> Option<OnboardingResult<Vec<T>>> {
        let emission = self.subscription.recv().await?;
        Some(self.convert(emission))
    }

    /// Returns an already delivered snapshot without waiting.
    pub fn try_recv(&mut self) -> Option<OnboardingResult<Vec<T>>> {
        let emission = self.subscription.try_recv()?;
        Some(self.convert(emission))
    }

    /// Stops the feed and unregisters its listener.
    pub fn cancel(&mut self) {
        self.subscription.cancel();
    }

    /// Returns `true` while the feed can still emit.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.subscription.is_active()
    }

    fn convert(&mut self, emission: SnapshotResult) -> OnboardingResult<Vec<T>> {
        let documents = emission.map_err(OnboardingError::Fetch)?;
        let decoded = documents
            .iter()
            .map(self.decode)
            .collect::<StoreResult<Vec<T>>>();
        match decoded {
            Ok(mut items) => {
                (self.arrange)(&mut items);
                Ok(items)
            }
            Err(err) => {
                self.subscription.cancel();
                Err(OnboardingError::Fetch(err))
            }
        }
    }
}

fn arrange_clients(clients: &mut [Client]) {
    clients.sort_by(|left, right| {
        left.created_at()
            .cmp(&right.created_at())
            .then_with(|| left.id().cmp(right.id()))
    });
}

/// Read side of the onboarding data.
#[derive(Clone)]
pub struct EntityStore<S>
where
    S: DocumentStore,
{
    store: Arc<S>,
}

impl<S> EntityStore<S>
where
    S: DocumentStore,
{
    /// Creates an entity store over a document store.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Opens a live feed of the session user's clients.
    ///
    /// Each call opens an independent feed that starts with the current list.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingError::Fetch`] when the listener cannot be opened.
    pub fn subscribe_clients(&self, session: &Session) -> OnboardingResult<ClientFeed> {
        let subscription = self
            .store
            .subscribe(namespace::clients_query(session))
            .map_err(OnboardingError::Fetch)?;
        debug!(user = %session.user_id(), "subscribed to clients");
        Ok(Feed {
            subscription,
            decode: documents::decode_client,
            arrange: arrange_clients,
        })
    }

    /// Opens a live feed of one client's tasks.
    ///
    /// Callers switching clients must cancel the previous task feed first.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingError::Fetch`] when the listener cannot be opened.
    pub fn subscribe_tasks(
        &self,
        session: &Session,
        client_id: &ClientId,
    ) -> OnboardingResult<TaskFeed> {
        let subscription = self
            .store
            .subscribe(namespace::tasks_query(session, client_id))
            .map_err(OnboardingError::Fetch)?;
        debug!(client = %client_id, "subscribed to tasks");
        Ok(Feed {
            subscription,
            decode: documents::decode_task,
            arrange: ordering::sort_tasks,
        })
    }

    /// Reads a client's tasks once, in display order.
    ///
    /// # Errors
    ///
    /// Returns the store's error when the read fails or a document cannot be
    /// decoded.
    pub async fn load_tasks(
        &self,
        session: &Session,
        client_id: &ClientId,
    ) -> StoreResult<Vec<Task>> {
        let snapshot = self
            .store
            .query(&namespace::tasks_query(session, client_id))
            .await?;
        let mut tasks = snapshot
            .iter()
            .map(documents::decode_task)
            .collect::<StoreResult<Vec<_>>>()?;
        ordering::sort_tasks(&mut tasks);
        Ok(tasks)
    }
}
