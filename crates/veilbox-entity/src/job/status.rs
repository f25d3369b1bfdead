//! Job status enumeration and transition table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a protection job.
///
/// The lifecycle is strictly `Draft -> Pending -> Completed`. The column
/// is a Postgres enum type, so a stored value outside this set fails at
/// decode time instead of flowing through as an unknown string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Registered, still accepting file uploads.
    Draft,
    /// Submitted, waiting for the processing pipeline.
    Pending,
    /// Processed by the downstream pipeline.
    Completed,
}

impl JobStatus {
    /// Check if the job is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Check whether a transition to `next` is allowed.
    pub fn can_transition_to(&self, next: JobStatus) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Pending) | (Self::Pending, Self::Completed)
        )
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
