//! Client list backed by live snapshots with an optimistic provisional entry.

use super::{Client, ClientId};

/// Displayed client list.
///
/// Holds the last authoritative snapshot plus, at most, one locally created
/// client that the store has not confirmed yet. The next snapshot replaces
/// the whole list, provisional entry included; fields are never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientList {
    clients: Vec<Client>,
    provisional: Option<ClientId>,
}

impl ClientList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the list with an authoritative snapshot.
    pub fn apply_snapshot(&mut self, clients: Vec<Client>) {
        self.clients = clients;
        self.provisional = None;
    }

    /// Shows a locally created client until the next snapshot arrives.
    ///
    /// A snapshot that already contains the client makes this a no-op.
    pub fn add_provisional(&mut self, client: Client) {
        if self.contains(client.id()) {
            return;
        }
        if let Some(previous) = self.provisional.take() {
            self.clients.retain(|existing| existing.id() != &previous);
        }
        self.provisional = Some(client.id().clone());
        self.clients.push(client);
    }

    /// Returns the displayed clients.
    #[must_use]
    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// Returns the displayed client with the given identifier.
    #[must_use]
    pub fn get(&self, id: &ClientId) -> Option<&Client> {
        self.clients.iter().find(|client| client.id() == id)
    }

    /// Returns `true` when the client is displayed.
    #[must_use]
    pub fn contains(&self, id: &ClientId) -> bool {
        self.get(id).is_some()
    }

    /// Returns `true` when `id` is displayed but not yet confirmed.
    #[must_use]
    pub fn is_provisional(&self, id: &ClientId) -> bool {
        self.provisional.as_ref() == Some(id)
    }
}
