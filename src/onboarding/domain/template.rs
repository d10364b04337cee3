//! Standard seed tasks applied to every new client.

use super::{OnboardingDomainError, TaskName};

/// Default onboarding checklist, in display order.
pub const STANDARD_SEED_TASKS: [&str; 8] = [
    "Send welcome email",
    "Schedule kickoff call",
    "Collect signed contract",
    "Set up billing account",
    "Create project workspace",
    "Grant system access",
    "Share onboarding documentation",
    "Conduct 30-day check-in",
];

/// Non-empty ordered list of task names seeded into each new client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedTemplate {
    tasks: Vec<TaskName>,
}

impl SeedTemplate {
    /// Builds a template from task names.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingDomainError::EmptySeedTemplate`] when no names are
    /// given, or [`OnboardingDomainError::EmptyTaskName`] for a blank name.
    pub fn new<I, S>(names: I) -> Result<Self, OnboardingDomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tasks = names
            .into_iter()
            .map(TaskName::new)
            .collect::<Result<Vec<_>, _>>()?;
        if tasks.is_empty() {
            return Err(OnboardingDomainError::EmptySeedTemplate);
        }
        Ok(Self { tasks })
    }

    /// Returns the standard eight-task template.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            tasks: STANDARD_SEED_TASKS
                .iter()
                .filter_map(|name| TaskName::new(name).ok())
                .collect(),
        }
    }

    /// Returns the number of seed tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when the template has no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the seed task names in template order.
    #[must_use]
    pub fn tasks(&self) -> &[TaskName] {
        &self.tasks
    }
}

impl Default for SeedTemplate {
    fn default() -> Self {
        Self::standard()
    }
}
