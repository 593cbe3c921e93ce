//! Task entity and payload types for the taskdeck JSON contract.
//!
//! Defines the persisted [`Task`], its tri-state [`TaskStatus`], and the
//! incoming create/update payloads with trim-based boundary validation.
//! Validation happens here, at the contract boundary, so the store never
//! sees an empty title or an unknown status string.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FieldError;

/// Status of a task. Exactly these three values are valid on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not started yet (the default for new tasks).
    #[default]
    Pending,
    /// Actively being worked on.
    InProgress,
    /// Done.
    Completed,
}

impl TaskStatus {
    /// All valid statuses, in filter-cycle order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    /// The kebab-case wire string for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    /// The completed/pending flip used by the client toggle.
    ///
    /// An `in-progress` task toggles straight to `completed`; the toggle
    /// never routes through `in-progress`.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Completed => Self::Pending,
            Self::Pending | Self::InProgress => Self::Completed,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a status string is not one of the three valid values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid status {0:?} (expected pending, in-progress, or completed)")]
pub struct ParseStatusError(pub String);

impl std::str::FromStr for TaskStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// The sole persisted entity: a titled, described unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned identifier, minted once at creation.
    pub id: Uuid,
    /// Non-empty title.
    pub title: String,
    /// Non-empty description.
    pub description: String,
    /// Current status.
    pub status: TaskStatus,
    /// Server-clock creation time; immutable and the sole list sort key.
    pub created_at: DateTime<Utc>,
}

/// Incoming create payload, unvalidated.
///
/// Fields are optional so that missing keys surface as field errors from
/// [`TaskDraft::validate`] rather than as a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    /// Requested title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Requested description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Requested status string; defaults to `pending` when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// A validated create payload: trimmed, non-empty, status resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Trimmed, non-empty title.
    pub title: String,
    /// Trimmed, non-empty description.
    pub description: String,
    /// Resolved status.
    pub status: TaskStatus,
}

impl TaskDraft {
    /// Validates the draft into a [`NewTask`].
    ///
    /// # Errors
    ///
    /// Returns the full list of per-field problems: missing or
    /// whitespace-only `title`/`description`, or a `status` outside the
    /// three valid values.
    pub fn validate(&self) -> Result<NewTask, Vec<FieldError>> {
        let mut errors = Vec::new();
        let title = require_text("title", self.title.as_deref(), &mut errors);
        let description = require_text("description", self.description.as_deref(), &mut errors);
        let status = parse_status(self.status.as_deref(), &mut errors);

        match (title, description, status) {
            (Some(title), Some(description), Some(status)) => Ok(NewTask {
                title,
                description,
                status,
            }),
            _ => Err(errors),
        }
    }
}

/// Incoming partial update payload; absent fields retain stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    /// Replacement title, if provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Replacement description, if provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replacement status string, if provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Validated field changes produced by [`TaskPatch::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// New title, if the patch provided one.
    pub title: Option<String>,
    /// New description, if the patch provided one.
    pub description: Option<String>,
    /// New status, if the patch provided one.
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    /// A patch that changes only the status.
    #[must_use]
    pub fn status_only(status: TaskStatus) -> Self {
        Self {
            status: Some(status.as_str().to_string()),
            ..Self::default()
        }
    }

    /// Validates the patch into [`TaskChanges`].
    ///
    /// Provided fields are held to the same constraints as a create;
    /// absent fields pass through untouched. An empty patch is valid and
    /// changes nothing.
    ///
    /// # Errors
    ///
    /// Returns the full list of per-field problems.
    pub fn validate(&self) -> Result<TaskChanges, Vec<FieldError>> {
        let mut errors = Vec::new();
        let title = match self.title.as_deref() {
            Some(raw) => require_text("title", Some(raw), &mut errors),
            None => None,
        };
        let description = match self.description.as_deref() {
            Some(raw) => require_text("description", Some(raw), &mut errors),
            None => None,
        };
        let status = match self.status.as_deref() {
            Some(_) => parse_status(self.status.as_deref(), &mut errors),
            None => None,
        };

        if errors.is_empty() {
            Ok(TaskChanges {
                title,
                description,
                status,
            })
        } else {
            Err(errors)
        }
    }
}

/// Trims a required text field, recording a field error when it is missing
/// or empty after trimming.
fn require_text(field: &str, value: Option<&str>, errors: &mut Vec<FieldError>) -> Option<String> {
    match value.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Some(trimmed.to_string()),
        Some(_) => {
            errors.push(FieldError::new(field, format!("{field} must not be empty")));
            None
        }
        None => {
            errors.push(FieldError::new(field, format!("{field} is required")));
            None
        }
    }
}

/// Resolves an optional status string, recording a field error when it is
/// not one of the three valid values. `None` resolves to the default.
fn parse_status(value: Option<&str>, errors: &mut Vec<FieldError>) -> Option<TaskStatus> {
    match value {
        None => Some(TaskStatus::default()),
        Some(raw) => match raw.parse() {
            Ok(status) => Some(status),
            Err(ParseStatusError(_)) => {
                errors.push(FieldError::new(
                    "status",
                    "must be one of pending, in-progress, completed",
                ));
                None
            }
        },
    }
}
