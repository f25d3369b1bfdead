//! Job entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::policy::ProtectionPolicy;
use super::status::JobStatus;

/// One content-protection request.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    /// Unique job identifier.
    pub id: Uuid,
    /// Authenticated subject that created the job. Every subsequent
    /// operation on the job is filtered on this value.
    pub owner_subject: String,
    /// Security options, fixed at draft time.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub policy: ProtectionPolicy,
    /// Number of registered file slots, fixed at creation.
    pub total_files: i32,
    /// Number of file slots that have completed their first upload.
    /// Monotonically non-decreasing, bounded above by `total_files`.
    pub uploaded_files: i32,
    /// Current lifecycle status.
    pub status: JobStatus,
    /// When the job was created.
    pub created_at: DateTime<Utc>,
    /// When the job was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Build a new draft job for the given owner.
    pub fn new_draft(owner_subject: impl Into<String>, policy: ProtectionPolicy, total_files: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_subject: owner_subject.into(),
            policy,
            total_files,
            uploaded_files: 0,
            status: JobStatus::Draft,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether every registered file slot has been uploaded.
    pub fn is_fully_uploaded(&self) -> bool {
        self.uploaded_files >= self.total_files
    }
}
