//! Explicit session context.
//!
//! Every store operation receives a [`Session`] naming the signed-in user,
//! whose identity scopes all collection paths. Identity acquisition itself
//! lives behind the [`ports::IdentityProvider`] port.

pub mod adapters;
pub mod ports;

use crate::store::domain::DocumentId;
use ports::{IdentityError, IdentityProvider};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the (anonymous) user owning a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(DocumentId);

impl UserId {
    /// Wraps a document identifier.
    #[must_use]
    pub const fn from_document_id(id: DocumentId) -> Self {
        Self(id)
    }

    /// Returns the identifier used as the user's namespace segment.
    #[must_use]
    pub const fn as_document_id(&self) -> &DocumentId {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Signed-in session threaded through every onboarding operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: UserId,
}

impl Session {
    /// Creates a session for an already known user.
    #[must_use]
    pub const fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    /// Signs in through `provider` and opens a session.
    ///
    /// # Errors
    ///
    /// Returns the provider's [`IdentityError`] when sign-in fails.
    pub async fn establish(provider: &impl IdentityProvider) -> Result<Self, IdentityError> {
        let user_id = provider.sign_in().await?;
        Ok(Self::new(user_id))
    }

    /// Returns the signed-in user.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }
}
