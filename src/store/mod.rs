//! Document store contract consumed by the onboarding core.
//!
//! The hosted document database is an external collaborator. This module
//! describes only what the core needs from it: hierarchical collection paths,
//! field-map documents, sorted queries with live push-based snapshots, and
//! atomic write batches.
//!
//! - Value types in [`domain`]
//! - The store contract in [`ports`]
//! - An in-process implementation in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;
