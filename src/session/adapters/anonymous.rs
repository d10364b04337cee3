//! In-process anonymous identity.

use async_trait::async_trait;

use crate::{
    session::{
        UserId,
        ports::{IdentityError, IdentityProvider},
    },
    store::domain::DocumentId,
};

/// Issues one stable anonymous identity per provider instance.
#[derive(Debug, Clone)]
pub struct AnonymousIdentityProvider {
    user_id: UserId,
}

impl AnonymousIdentityProvider {
    /// Creates a provider with a freshly generated identity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_user(UserId::from_document_id(DocumentId::generate()))
    }

    /// Creates a provider that always signs in as `user_id`.
    #[must_use]
    pub const fn with_user(user_id: UserId) -> Self {
        Self { user_id }
    }
}

impl Default for AnonymousIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for AnonymousIdentityProvider {
    async fn sign_in(&self) -> Result<UserId, IdentityError> {
        Ok(self.user_id.clone())
    }
}
