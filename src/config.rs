//! Runtime configuration for the onboarding tracker.

use serde::Deserialize;
use thiserror::Error;

use crate::{
    onboarding::domain::{OnboardingDomainError, STANDARD_SEED_TASKS, SeedTemplate},
    store::domain::DEFAULT_MAX_BATCH_OPERATIONS,
};

/// Tracker settings supplied by the host application.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackerConfig {
    /// Task names seeded into every new client, in display order.
    pub seed_tasks: Vec<String>,
    /// Maximum operations committed in one batch.
    pub max_batch_operations: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            seed_tasks: STANDARD_SEED_TASKS.iter().map(|name| (*name).to_owned()).collect(),
            max_batch_operations: DEFAULT_MAX_BATCH_OPERATIONS,
        }
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("invalid tracker configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The values were parsed but are not usable.
    #[error(transparent)]
    Invalid(#[from] OnboardingDomainError),
}

impl TrackerConfig {
    /// Parses and validates a JSON configuration document. Missing keys take
    /// their default values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown keys and
    /// [`ConfigError::Invalid`] when validation fails.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the settings can seed a client in one batch.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Self::seed_template`].
    pub fn validate(&self) -> Result<(), OnboardingDomainError> {
        self.seed_template().map(drop)
    }

    /// Builds the validated seed template.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingDomainError`] when the template is empty, holds a
    /// blank name, or cannot be created in one batch with its client.
    pub fn seed_template(&self) -> Result<SeedTemplate, OnboardingDomainError> {
        let template = SeedTemplate::new(&self.seed_tasks)?;
        if template.len() >= self.max_batch_operations {
            return Err(OnboardingDomainError::SeedTemplateTooLarge {
                tasks: template.len(),
                limit: self.max_batch_operations,
            });
        }
        Ok(template)
    }
}
