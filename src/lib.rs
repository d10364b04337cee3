//! Onboarding: client onboarding tracker core.
//!
//! A signed-in user maintains clients, each with an ordered checklist of
//! onboarding tasks, stored in a hierarchical document store that pushes
//! live snapshots to subscribers.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`store`]: Document store contract and an in-memory implementation
//! - [`session`]: Explicit session context and identity acquisition
//! - [`onboarding`]: Clients, tasks, ordering, selection and live views
//! - [`config`]: Tracker settings

pub mod config;
pub mod onboarding;
pub mod session;
pub mod store;
