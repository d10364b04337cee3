//! Client entity.

use super::{ClientId, OnboardingDomainError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated, trimmed client name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientName(String);

impl ClientName {
    /// Creates a validated client name.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingDomainError::EmptyClientName`] when the value is
    /// empty after trimming.
    pub fn new(value: impl AsRef<str>) -> Result<Self, OnboardingDomainError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(OnboardingDomainError::EmptyClientName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A customer undergoing onboarding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    id: ClientId,
    name: ClientName,
    created_at: DateTime<Utc>,
}

impl Client {
    /// Creates a client value.
    #[must_use]
    pub const fn new(id: ClientId, name: ClientName, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            created_at,
        }
    }

    /// Returns the client identifier.
    #[must_use]
    pub const fn id(&self) -> &ClientId {
        &self.id
    }

    /// Returns the client name.
    #[must_use]
    pub const fn name(&self) -> &ClientName {
        &self.name
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
