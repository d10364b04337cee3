//! Mapping between onboarding entities and the document store.
//!
//! [`namespace`] builds the per-user collection paths and queries;
//! [`documents`] encodes entities to field maps and decodes snapshots.

pub mod documents;
pub mod namespace;
