//! Job file entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::FileStatus;

/// One registered file slot within a job.
///
/// Identified by `(job_id, file_index)`; the index space is exactly
/// `[0, total_files)` and fixed at draft time. The storage key is
/// pre-assigned by the draft registrar and never regenerated, so
/// re-uploads always target the same blob.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobFile {
    /// Owning job.
    pub job_id: Uuid,
    /// Zero-based position within the job's file list.
    pub file_index: i32,
    /// Original display name.
    pub file_name: String,
    /// Destination folder name declared by the client.
    pub folder_name: String,
    /// Size in bytes declared at draft time.
    pub declared_size_bytes: i64,
    /// Pre-assigned blob storage key.
    pub storage_key: String,
    /// Upload status.
    pub status: FileStatus,
    /// When the slot was registered.
    pub created_at: DateTime<Utc>,
    /// When the slot was last updated.
    pub updated_at: DateTime<Utc>,
}

impl JobFile {
    /// Build a pending file slot for a draft job.
    pub fn new_pending(
        job_id: Uuid,
        file_index: i32,
        file_name: impl Into<String>,
        folder_name: impl Into<String>,
        declared_size_bytes: i64,
        storage_key: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            job_id,
            file_index,
            file_name: file_name.into(),
            folder_name: folder_name.into(),
            declared_size_bytes,
            storage_key: storage_key.into(),
            status: FileStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}
