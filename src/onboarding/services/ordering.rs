//! Task writes: append, reorder, delete, and targeted field updates.

use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

use super::{OnboardingResult, error::write_failed};
use crate::{
    onboarding::{
        adapters::{documents, namespace},
        domain::{
            ClientId, NewTask, OnboardingDomainError, ReorderRequest, Task, TaskId, TaskName,
            TaskPriority, TaskStatus, ordering,
        },
    },
    session::Session,
    store::{
        domain::{DEFAULT_MAX_BATCH_OPERATIONS, Fields, StoreError, WriteBatch},
        ports::DocumentStore,
    },
};

/// Maintains task display order and applies single-field task edits.
#[derive(Clone)]
pub struct TaskOrderingService<S, C>
where
    S: DocumentStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    max_batch_operations: usize,
}

impl<S, C> TaskOrderingService<S, C>
where
    S: DocumentStore,
    C: Clock + Send + Sync,
{
    /// Creates a task ordering service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            max_batch_operations: DEFAULT_MAX_BATCH_OPERATIONS,
        }
    }

    /// Sets the largest batch a reorder may commit. Appends stop one task
    /// short of it so the client can still be deleted in one batch.
    #[must_use]
    pub const fn with_max_batch_operations(mut self, limit: usize) -> Self {
        self.max_batch_operations = limit;
        self
    }

    /// Appends a task after the client's `current` tasks.
    ///
    /// `current` must hold every task the client has. The new task takes
    /// `order = current.len()` and starts `Pending` with `Normal` priority
    /// and no due date. Existing tasks are not renumbered.
    ///
    /// # Errors
    ///
    /// Returns `OnboardingError::Validation` for a blank name or when the
    /// client, its tasks and the new task would no longer fit one batch,
    /// before any write, or `OnboardingError::Write` when the store rejects
    /// the create.
    pub async fn add_task(
        &self,
        session: &Session,
        client_id: &ClientId,
        name: &str,
        current: &[Task],
    ) -> OnboardingResult<Task> {
        let task_name = TaskName::new(name)?;
        if current.len().saturating_add(2) > self.max_batch_operations {
            return Err(OnboardingDomainError::TaskLimitReached {
                tasks: current.len(),
                limit: self.max_batch_operations,
            }
            .into());
        }
        let new_task = NewTask {
            client_id: client_id.clone(),
            name: task_name,
            order: ordering::next_order(current),
            created_at: documents::stored_precision(self.clock.utc()),
        };
        let id = self
            .store
            .create(
                &namespace::tasks_collection(session, client_id),
                documents::new_task_fields(&new_task),
            )
            .await
            .map_err(|err| write_failed("add task", err))?;
        let task = Task::new(TaskId::from_document_id(id), new_task);
        info!(client = %client_id, task = %task.id(), order = task.order(), "appended task");
        Ok(task)
    }

    /// Moves a task within the displayed list and persists the new position
    /// of every task in one atomic batch.
    ///
    /// `displayed` must be the client's tasks in the order the user sees
    /// them. The full renumbering repairs gaps and duplicate positions left
    /// by earlier writes. Returns the list in its new order.
    ///
    /// # Errors
    ///
    /// Returns `OnboardingError::Validation` when an index is out of range,
    /// before any write, or `OnboardingError::Write` when the batch is too
    /// large or rejected.
    pub async fn reorder_tasks(
        &self,
        session: &Session,
        client_id: &ClientId,
        displayed: &[Task],
        request: ReorderRequest,
    ) -> OnboardingResult<Vec<Task>> {
        let reordered = ordering::reorder(displayed, request)?;

        let mut batch = WriteBatch::new();
        for task in &reordered {
            batch.update(
                namespace::task_document(session, client_id, task.id()),
                documents::order_update(task.order()),
            );
        }
        if batch.len() > self.max_batch_operations {
            return Err(write_failed(
                "reorder tasks",
                StoreError::BatchTooLarge {
                    operations: batch.len(),
                    limit: self.max_batch_operations,
                },
            ));
        }

        self.store
            .commit(batch)
            .await
            .map_err(|err| write_failed("reorder tasks", err))?;
        info!(
            client = %client_id,
            from = request.source(),
            to = request.target(),
            tasks = reordered.len(),
            "reordered tasks"
        );
        Ok(reordered)
    }

    /// Deletes one task. Remaining tasks keep their positions.
    ///
    /// # Errors
    ///
    /// Returns `OnboardingError::Write` when the store rejects the delete.
    pub async fn delete_task(
        &self,
        session: &Session,
        client_id: &ClientId,
        task_id: &TaskId,
    ) -> OnboardingResult<()> {
        self.store
            .delete(&namespace::task_document(session, client_id, task_id))
            .await
            .map_err(|err| write_failed("delete task", err))
    }

    /// Sets a task's status.
    ///
    /// # Errors
    ///
    /// Returns `OnboardingError::Write` when the task does not exist or the
    /// store rejects the update.
    pub async fn set_status(
        &self,
        session: &Session,
        client_id: &ClientId,
        task_id: &TaskId,
        status: TaskStatus,
    ) -> OnboardingResult<()> {
        self.update_task(session, client_id, task_id, documents::status_update(status))
            .await
    }

    /// Sets a task's priority.
    ///
    /// # Errors
    ///
    /// Returns `OnboardingError::Write` when the task does not exist or the
    /// store rejects the update.
    pub async fn set_priority(
        &self,
        session: &Session,
        client_id: &ClientId,
        task_id: &TaskId,
        priority: TaskPriority,
    ) -> OnboardingResult<()> {
        self.update_task(
            session,
            client_id,
            task_id,
            documents::priority_update(priority),
        )
        .await
    }

    /// Sets or clears a task's due date.
    ///
    /// # Errors
    ///
    /// Returns `OnboardingError::Write` when the task does not exist or the
    /// store rejects the update.
    pub async fn set_due_date(
        &self,
        session: &Session,
        client_id: &ClientId,
        task_id: &TaskId,
        due_date: Option<NaiveDate>,
    ) -> OnboardingResult<()> {
        self.update_task(
            session,
            client_id,
            task_id,
            documents::due_date_update(due_date),
        )
        .await
    }

    /// Renames a task.
    ///
    /// # Errors
    ///
    /// Returns `OnboardingError::Validation` for a blank name, before any
    /// write, or `OnboardingError::Write` when the update is rejected.
    pub async fn rename_task(
        &self,
        session: &Session,
        client_id: &ClientId,
        task_id: &TaskId,
        name: &str,
    ) -> OnboardingResult<()> {
        let task_name = TaskName::new(name)?;
        self.update_task(
            session,
            client_id,
            task_id,
            documents::name_update(task_name.as_str()),
        )
        .await
    }

    async fn update_task(
        &self,
        session: &Session,
        client_id: &ClientId,
        task_id: &TaskId,
        fields: Fields,
    ) -> OnboardingResult<()> {
        self.store
            .update(&namespace::task_document(session, client_id, task_id), fields)
            .await
            .map_err(|err| write_failed("update task", err))
    }
}
