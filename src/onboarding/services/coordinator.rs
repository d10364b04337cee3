//! Atomic multi-document writes for client creation and deletion.

use mockable::Clock;
use std::sync::Arc;
use tracing::{info, warn};

use super::{EntityStore, OnboardingError, OnboardingResult, error::write_failed};
use crate::{
    onboarding::{
        adapters::{documents, namespace},
        domain::{Client, ClientId, ClientName, NewTask, SeedTemplate},
    },
    session::Session,
    store::{
        domain::{DEFAULT_MAX_BATCH_OPERATIONS, StoreError, WriteBatch},
        ports::DocumentStore,
    },
};

/// Groups a client's creation with its seed tasks, and a client's deletion
/// with its tasks, into single all-or-nothing batches.
#[derive(Clone)]
pub struct ClientCoordinator<S, C>
where
    S: DocumentStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    entities: EntityStore<S>,
    clock: Arc<C>,
    template: SeedTemplate,
    max_batch_operations: usize,
}

impl<S, C> ClientCoordinator<S, C>
where
    S: DocumentStore,
    C: Clock + Send + Sync,
{
    /// Creates a coordinator seeding the standard template.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            entities: EntityStore::new(Arc::clone(&store)),
            store,
            clock,
            template: SeedTemplate::standard(),
            max_batch_operations: DEFAULT_MAX_BATCH_OPERATIONS,
        }
    }

    /// Replaces the seed template.
    #[must_use]
    pub fn with_seed_template(mut self, template: SeedTemplate) -> Self {
        self.template = template;
        self
    }

    /// Sets the largest batch the coordinator may commit.
    #[must_use]
    pub const fn with_max_batch_operations(mut self, limit: usize) -> Self {
        self.max_batch_operations = limit;
        self
    }

    /// Returns the seed template applied to new clients.
    #[must_use]
    pub const fn seed_template(&self) -> &SeedTemplate {
        &self.template
    }

    /// Creates a client together with one task per seed template entry.
    ///
    /// Seed task `i` gets `order = i`, `Pending` status, `Normal` priority
    /// and no due date. The client and all seed tasks land in one batch or
    /// not at all. The returned client is synthesized locally and can be
    /// shown before the live feed confirms it.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingError::Validation`] for a blank name, before any
    /// store access, or [`OnboardingError::Write`] when the batch is rejected.
    pub async fn create_client_with_seed_tasks(
        &self,
        session: &Session,
        name: &str,
    ) -> OnboardingResult<Client> {
        let client_name = ClientName::new(name)?;
        let client_id =
            ClientId::from_document_id(self.store.allocate_id(&namespace::clients_collection(session)));
        let created_at = documents::stored_precision(self.clock.utc());
        let client = Client::new(client_id.clone(), client_name, created_at);

        let mut batch = WriteBatch::new();
        batch.create(
            namespace::client_document(session, &client_id),
            documents::client_fields(&client),
        );
        let tasks = namespace::tasks_collection(session, &client_id);
        for (task_name, order) in self.template.tasks().iter().zip(0_u32..) {
            let seed = NewTask {
                client_id: client_id.clone(),
                name: task_name.clone(),
                order,
                created_at,
            };
            batch.create(
                tasks.document(self.store.allocate_id(&tasks)),
                documents::new_task_fields(&seed),
            );
        }

        self.commit("create client", batch).await?;
        info!(
            client = %client.id(),
            seed_tasks = self.template.len(),
            "created client with seed tasks"
        );
        Ok(client)
    }

    /// Deletes a client and every one of its tasks in one batch.
    ///
    /// The client's tasks are read first; a failed read aborts before
    /// anything is deleted. Returns the number of tasks deleted.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingError::Write`] when the read or the batch fails.
    /// Nothing is deleted in either case.
    pub async fn delete_client_cascade(
        &self,
        session: &Session,
        client_id: &ClientId,
    ) -> OnboardingResult<usize> {
        let tasks = self
            .entities
            .load_tasks(session, client_id)
            .await
            .map_err(|err| {
                warn!(client = %client_id, error = %err, "cascade read failed");
                OnboardingError::Write(err)
            })?;

        let mut batch = WriteBatch::new();
        for task in &tasks {
            batch.delete(namespace::task_document(session, client_id, task.id()));
        }
        batch.delete(namespace::client_document(session, client_id));

        self.commit("delete client", batch).await?;
        info!(client = %client_id, tasks = tasks.len(), "deleted client and its tasks");
        Ok(tasks.len())
    }

    /// Renames a client.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingError::Validation`] for a blank name, before any
    /// store access, or [`OnboardingError::Write`] when the update fails.
    pub async fn rename_client(
        &self,
        session: &Session,
        client_id: &ClientId,
        name: &str,
    ) -> OnboardingResult<()> {
        let client_name = ClientName::new(name)?;
        self.store
            .update(
                &namespace::client_document(session, client_id),
                documents::name_update(client_name.as_str()),
            )
            .await
            .map_err(|err| write_failed("rename client", err))
    }

    async fn commit(&self, operation: &'static str, batch: WriteBatch) -> OnboardingResult<()> {
        if batch.len() > self.max_batch_operations {
            return Err(write_failed(
                operation,
                StoreError::BatchTooLarge {
                    operations: batch.len(),
                    limit: self.max_batch_operations,
                },
            ));
        }
        self.store
            .commit(batch)
            .await
            .map_err(|err| write_failed(operation, err))
    }
}
