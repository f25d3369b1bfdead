//! Job store contract and backends.
//!
//! [`JobStore`] is the relational-store interface the job core consumes:
//! batched all-or-nothing inserts, owner-filtered reads, and the two
//! operations that must be linearizable under concurrent callers — the
//! guarded per-file status flip and the job counter increment.
//!
//! Backends: [`postgres::PgJobStore`] for production,
//! [`memory::MemoryJobStore`] for tests and local development.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use veilbox_core::result::AppResult;
use veilbox_entity::file::JobFile;
use veilbox_entity::job::{Job, JobStatus};
use veilbox_entity::recipient::Recipient;

/// Counter pair read from or returned by a job row update.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct JobCounters {
    /// File slots whose first upload has completed.
    pub uploaded_files: i32,
    /// Registered file slots.
    pub total_files: i32,
}

/// Relational store operations required by the job core.
#[async_trait]
pub trait JobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Check whether the store is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Insert a draft job with its file slots and recipients.
    ///
    /// All-or-nothing: either every row for this job exists afterwards or
    /// none does.
    async fn insert_draft(
        &self,
        job: &Job,
        files: &[JobFile],
        recipients: &[Recipient],
    ) -> AppResult<()>;

    /// Find a job by ID, filtered on the owning subject.
    async fn find_job(&self, job_id: Uuid, owner: &str) -> AppResult<Option<Job>>;

    /// Find one file slot of a job by index.
    async fn find_file(&self, job_id: Uuid, file_index: i32) -> AppResult<Option<JobFile>>;

    /// Flip a file slot from `pending` to `uploaded`, guarded on the
    /// current status being `pending`.
    ///
    /// Returns whether a row actually changed — `true` exactly once per
    /// slot, no matter how often the flip is retried. Must be linearizable
    /// with respect to concurrent calls for the same slot.
    async fn mark_file_uploaded(&self, job_id: Uuid, file_index: i32) -> AppResult<bool>;

    /// Atomically increment the job's uploaded-files counter by one and
    /// return the post-update counters.
    async fn increment_uploaded(&self, job_id: Uuid) -> AppResult<JobCounters>;

    /// Read the job's current counters.
    async fn job_counters(&self, job_id: Uuid) -> AppResult<JobCounters>;

    /// List the indices of file slots still in `pending` state, ascending.
    async fn pending_file_indices(&self, job_id: Uuid) -> AppResult<Vec<i32>>;

    /// Unconditionally set the job's status.
    async fn update_status(&self, job_id: Uuid, status: JobStatus) -> AppResult<()>;
}
