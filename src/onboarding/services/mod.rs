//! Application services for the onboarding context.

mod coordinator;
mod entity_store;
mod error;
mod ordering;
mod tracker;

pub use coordinator::ClientCoordinator;
pub use entity_store::{ClientFeed, EntityStore, Feed, TaskFeed};
pub use error::{OnboardingError, OnboardingResult};
pub use ordering::TaskOrderingService;
pub use tracker::{Tracker, TrackerEvent};
