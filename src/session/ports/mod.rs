//! Port contracts for identity acquisition.

pub mod identity;

pub use identity::{IdentityError, IdentityProvider};
