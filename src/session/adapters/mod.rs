//! Identity provider implementations.

pub mod anonymous;

pub use anonymous::AnonymousIdentityProvider;
