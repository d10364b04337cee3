//! Client onboarding core.
//!
//! A user keeps a list of clients, each with a checklist of onboarding tasks.
//! This module keeps that hierarchy consistent: a client and its seed tasks
//! are created in one atomic batch, deleting a client cascades to its tasks,
//! task lists keep a dense display order under drag-and-drop reordering, and
//! the selected-client pointer stays valid as live snapshots arrive.
//!
//! - Domain types, the ordering engine and the selection reconciler in
//!   [`domain`]
//! - Document encoding and namespace paths in [`adapters`]
//! - Entity feeds, write coordination and the tracker controller in
//!   [`services`]

pub mod adapters;
pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
