//! Domain model for client onboarding.
//!
//! Pure types and algorithms with no store access: entity values, the seed
//! template, task ordering, selection reconciliation, and the snapshot-backed
//! client list.

mod client;
mod error;
mod ids;
pub mod ordering;
mod selection;
mod snapshot;
mod task;
mod template;

pub use client::{Client, ClientName};
pub use error::{OnboardingDomainError, ParseTaskFieldError};
pub use ids::{ClientId, TaskId};
pub use ordering::ReorderRequest;
pub use selection::Selection;
pub use snapshot::ClientList;
pub use task::{NewTask, PersistedTaskData, Task, TaskName, TaskPriority, TaskStatus};
pub use template::{STANDARD_SEED_TASKS, SeedTemplate};
