//! Error types for onboarding domain validation and parsing.

use super::ClientId;
use thiserror::Error;

/// Errors returned while validating onboarding input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OnboardingDomainError {
    /// The client name is empty after trimming.
    #[error("client name must not be empty")]
    EmptyClientName,

    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// A reorder index lies outside the task list.
    #[error("cannot move task from {from} to {to} in a list of {len}")]
    ReorderOutOfRange {
        /// Source index.
        from: usize,
        /// Target index.
        to: usize,
        /// Number of tasks in the list.
        len: usize,
    },

    /// The seed template has no tasks.
    #[error("seed template must contain at least one task")]
    EmptySeedTemplate,

    /// The seed template does not fit in one batch with its client.
    #[error("seed template of {tasks} tasks does not fit a batch limit of {limit}")]
    SeedTemplateTooLarge {
        /// Tasks in the template.
        tasks: usize,
        /// Operations accepted per batch.
        limit: usize,
    },

    /// Another task would leave the client too large to delete in one batch.
    #[error("client has {tasks} tasks, the most a batch limit of {limit} allows")]
    TaskLimitReached {
        /// Tasks the client already has.
        tasks: usize,
        /// Operations accepted per batch.
        limit: usize,
    },

    /// The client is not in the current client list.
    #[error("unknown client: {0}")]
    UnknownClient(ClientId),

    /// A task operation needs a selected client.
    #[error("no client is selected")]
    NoClientSelected,
}

/// Error returned while parsing task status or priority strings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseTaskFieldError {
    /// Unknown status value.
    #[error("unknown task status: {0}")]
    Status(String),

    /// Unknown priority value.
    #[error("unknown task priority: {0}")]
    Priority(String),
}
