//! Identity provider port.

use crate::session::UserId;
use async_trait::async_trait;
use thiserror::Error;

/// Source of the ambient user identity.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Signs in and returns the user identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] when the identity service cannot be reached
    /// or refuses the sign-in.
    async fn sign_in(&self) -> Result<UserId, IdentityError>;
}

/// Errors returned by identity providers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// The identity service could not be reached.
    #[error("identity service unreachable: {0}")]
    Unreachable(String),

    /// The identity service refused the sign-in.
    #[error("sign-in rejected: {0}")]
    Rejected(String),
}
