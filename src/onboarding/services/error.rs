//! Service-level error taxonomy for onboarding operations.

use crate::{
    onboarding::domain::OnboardingDomainError, session::ports::IdentityError,
    store::domain::StoreError,
};
use thiserror::Error;
use tracing::warn;

/// Errors surfaced by onboarding services.
///
/// Initialization and fetch failures are terminal for the session; write and
/// validation failures are scoped to the operation that raised them. None of
/// them is retried automatically.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OnboardingError {
    /// The identity or store layer could not be reached or configured.
    #[error("initialization failed: {0}")]
    Initialization(#[from] IdentityError),

    /// A live feed broke or delivered an undecodable snapshot.
    #[error("live update failed: {0}")]
    Fetch(#[source] StoreError),

    /// A create, update, delete or batch write was rejected.
    #[error("write failed: {0}")]
    Write(#[source] StoreError),

    /// Input was rejected before any write was attempted.
    #[error(transparent)]
    Validation(#[from] OnboardingDomainError),
}

impl OnboardingError {
    /// Returns `true` for failures that end the session's live view.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Initialization(_) | Self::Fetch(_))
    }

    /// Returns the message shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Initialization(_) => {
                "Could not connect to the onboarding service. Reload to try again.".to_owned()
            }
            Self::Fetch(_) => {
                "Lost the connection to your onboarding data. Reload to continue.".to_owned()
            }
            Self::Write(_) => "Your change could not be saved. Please try again.".to_owned(),
            Self::Validation(err) => format!("Please check your input: {err}."),
        }
    }
}

/// Result type for onboarding service operations.
pub type OnboardingResult<T> = Result<T, OnboardingError>;

/// Logs and wraps a rejected write.
pub(super) fn write_failed(operation: &'static str, err: StoreError) -> OnboardingError {
    warn!(operation, error = %err, "write failed");
    OnboardingError::Write(err)
}
