//! Selected-client pointer kept valid across client list snapshots.

use super::{Client, ClientId, OnboardingDomainError};

/// The client whose tasks are displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    /// No client is selected; only valid while the client list is empty.
    #[default]
    NoneSelected,
    /// The identified client is selected.
    Selected(ClientId),
}

impl Selection {
    /// Returns the selection that follows a new client list snapshot.
    ///
    /// A selection that is still present is kept even if the list order
    /// changed. A missing or absent selection falls back to the first client,
    /// or to [`Selection::NoneSelected`] when the list is empty.
    #[must_use]
    pub fn reconcile(&self, clients: &[Client]) -> Self {
        match self {
            Self::Selected(id) if clients.iter().any(|client| client.id() == id) => self.clone(),
            Self::Selected(_) | Self::NoneSelected => clients
                .first()
                .map_or(Self::NoneSelected, |client| Self::Selected(client.id().clone())),
        }
    }

    /// Selects `id` at the user's request.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingDomainError::UnknownClient`] when `id` is not in
    /// `clients`.
    pub fn select(id: &ClientId, clients: &[Client]) -> Result<Self, OnboardingDomainError> {
        if clients.iter().any(|client| client.id() == id) {
            Ok(Self::Selected(id.clone()))
        } else {
            Err(OnboardingDomainError::UnknownClient(id.clone()))
        }
    }

    /// Returns the selected client identifier, if any.
    #[must_use]
    pub const fn client_id(&self) -> Option<&ClientId> {
        match self {
            Self::Selected(id) => Some(id),
            Self::NoneSelected => None,
        }
    }
}
