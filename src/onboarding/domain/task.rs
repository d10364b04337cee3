//! Onboarding task entity and its status and priority values.

use super::{ClientId, OnboardingDomainError, ParseTaskFieldError, TaskId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated, trimmed task name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskName(String);

impl TaskName {
    /// Creates a validated task name.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingDomainError::EmptyTaskName`] when the value is
    /// empty after trimming.
    pub fn new(value: impl AsRef<str>) -> Result<Self, OnboardingDomainError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(OnboardingDomainError::EmptyTaskName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Progress of an onboarding task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Not started.
    #[default]
    Pending,
    /// Being worked on.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Finished.
    Completed,
}

impl TaskStatus {
    /// Returns the stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskFieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskFieldError::Status(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Urgency of an onboarding task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskPriority {
    /// Needs attention now.
    Urgent,
    /// Ahead of normal work.
    High,
    /// Default priority.
    #[default]
    Normal,
    /// Can wait.
    Low,
}

impl TaskPriority {
    /// Returns the stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Urgent => "Urgent",
            Self::High => "High",
            Self::Normal => "Normal",
            Self::Low => "Low",
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskFieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "urgent" => Ok(Self::Urgent),
            "high" => Ok(Self::High),
            "normal" => Ok(Self::Normal),
            "low" => Ok(Self::Low),
            _ => Err(ParseTaskFieldError::Priority(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One checklist item belonging to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    client_id: ClientId,
    name: TaskName,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    order: u32,
}

/// Parameter object for a task that has not been written yet.
///
/// New tasks start `Pending` with `Normal` priority and no due date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Owning client.
    pub client_id: ClientId,
    /// Task name.
    pub name: TaskName,
    /// Display position.
    pub order: u32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a stored task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Stored identifier.
    pub id: TaskId,
    /// Stored owning client.
    pub client_id: ClientId,
    /// Stored name.
    pub name: TaskName,
    /// Stored status.
    pub status: TaskStatus,
    /// Stored priority.
    pub priority: TaskPriority,
    /// Stored due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Stored creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Stored display position.
    pub order: u32,
}

impl Task {
    /// Creates a task with default status, priority and due date.
    #[must_use]
    pub fn new(id: TaskId, new_task: NewTask) -> Self {
        Self {
            id,
            client_id: new_task.client_id,
            name: new_task.name,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            due_date: None,
            created_at: new_task.created_at,
            order: new_task.order,
        }
    }

    /// Reconstructs a task from stored fields.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            client_id: data.client_id,
            name: data.name,
            status: data.status,
            priority: data.priority,
            due_date: data.due_date,
            created_at: data.created_at,
            order: data.order,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the owning client.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the task name.
    #[must_use]
    pub const fn name(&self) -> &TaskName {
        &self.name
    }

    /// Returns the task status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the display position.
    #[must_use]
    pub const fn order(&self) -> u32 {
        self.order
    }

    /// Returns the task moved to a new display position.
    #[must_use]
    pub fn with_order(self, order: u32) -> Self {
        Self { order, ..self }
    }
}
