//! Task status values and board column identity.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow status of a task; each variant is also a board column.
///
/// Declaration order is the fixed left-to-right column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Work has not started.
    Pending,
    /// Work is underway.
    InProgress,
    /// Work is finished.
    Completed,
    /// Work has been abandoned.
    Cancelled,
}

impl TaskStatus {
    /// All statuses in column order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Returns the wire representation used by the backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns the column heading shown on the board.
    #[must_use]
    pub const fn column_title(self) -> &'static str {
        match self {
            Self::Pending => "To Do",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Status as received from the backend.
///
/// A value the client does not know is kept verbatim instead of being
/// rejected, so the task stays visible and round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatusValue {
    /// One of the four board columns.
    Known(TaskStatus),
    /// A status name outside the known set.
    Unrecognized(String),
}

impl StatusValue {
    /// Returns the known status, if any.
    #[must_use]
    pub const fn known(&self) -> Option<TaskStatus> {
        match self {
            Self::Known(status) => Some(*status),
            Self::Unrecognized(_) => None,
        }
    }

    /// Returns `true` when this value is exactly `status`.
    #[must_use]
    pub fn is(&self, status: TaskStatus) -> bool {
        self.known() == Some(status)
    }

    /// Returns the wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(status) => status.as_str(),
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl From<TaskStatus> for StatusValue {
    fn from(status: TaskStatus) -> Self {
        Self::Known(status)
    }
}

impl From<String> for StatusValue {
    fn from(raw: String) -> Self {
        TaskStatus::try_from(raw.as_str()).map_or(Self::Unrecognized(raw), Self::Known)
    }
}

impl From<StatusValue> for String {
    fn from(value: StatusValue) -> Self {
        match value {
            StatusValue::Known(status) => status.as_str().to_owned(),
            StatusValue::Unrecognized(raw) => raw,
        }
    }
}

impl PartialEq<TaskStatus> for StatusValue {
    fn eq(&self, other: &TaskStatus) -> bool {
        self.is(*other)
    }
}

impl fmt::Display for StatusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
