//! Port contracts for document persistence and live queries.

pub mod document_store;

pub use document_store::{DocumentStore, SnapshotResult, Subscription};
