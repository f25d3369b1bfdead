//! Job lifecycle service — draft registration, upload tracking, status,
//! submission, and the pipeline-triggered completion.

use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use veilbox_core::error::AppError;
use veilbox_core::result::AppResult;
use veilbox_core::traits::storage::BlobStore;
use veilbox_database::stores::JobStore;
use veilbox_entity::file::JobFile;
use veilbox_entity::job::{Job, JobStatus, ProtectionPolicy};
use veilbox_entity::recipient::{Recipient, RecipientSource};
use veilbox_storage::keys;

use crate::context::RequestContext;

/// Per-file metadata declared at draft time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFileMeta {
    /// Destination folder name.
    pub folder_name: String,
    /// Original display name.
    pub file_name: String,
    /// Declared size in bytes.
    pub size_bytes: i64,
}

/// One recipient declared at draft time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecipient {
    /// Recipient email address.
    pub email: String,
    /// How the entry was captured.
    pub source: RecipientSource,
}

/// Input for registering a draft job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDraftJob {
    /// Security options, captured verbatim.
    pub policy: ProtectionPolicy,
    /// Addressees of the protected output. Must be non-empty.
    pub recipients: Vec<NewRecipient>,
    /// Files the client will upload. Must be non-empty.
    pub files: Vec<NewFileMeta>,
}

/// Counters reported back after an upload call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UploadProgress {
    /// Index that was uploaded.
    pub file_index: i32,
    /// Job-wide completed slot count after this call.
    pub uploaded_files: i32,
    /// Registered slot count.
    pub total_files: i32,
}

/// Snapshot answering "what is left to upload".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatusReport {
    /// Current lifecycle status.
    pub status: JobStatus,
    /// Registered slot count.
    pub total_files: i32,
    /// Completed slot count.
    pub uploaded_files: i32,
    /// Indices still awaiting their first upload, ascending.
    pub pending_indices: Vec<i32>,
}

/// Orchestrates the draft job lifecycle over the relational and blob
/// stores.
///
/// Upload idempotency comes from two store primitives: the guarded
/// per-slot flip (`pending -> uploaded`, reporting whether a row
/// changed) and the counter increment that runs only on the first
/// successful flip. No in-process locking; arbitrary interleavings of
/// requests for the same job are safe.
#[derive(Debug, Clone)]
pub struct JobService {
    /// Relational store.
    store: Arc<dyn JobStore>,
    /// Blob store holding uploaded payloads.
    blobs: Arc<dyn BlobStore>,
}

impl JobService {
    /// Creates a new job service.
    pub fn new(store: Arc<dyn JobStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { store, blobs }
    }

    /// Registers a draft job: one job row, one file slot per declared
    /// file, one recipient row per entry — all-or-nothing.
    ///
    /// Storage keys are assigned here, before any byte is transferred,
    /// and stay stable for the lifetime of each slot.
    pub async fn create_draft(
        &self,
        ctx: &RequestContext,
        draft: NewDraftJob,
    ) -> AppResult<Uuid> {
        if draft.recipients.is_empty() {
            return Err(AppError::validation("At least one recipient is required"));
        }
        if draft.files.is_empty() {
            return Err(AppError::validation("At least one file is required"));
        }

        let job = Job::new_draft(
            ctx.subject.clone(),
            draft.policy,
            draft.files.len() as i32,
        );

        let files: Vec<JobFile> = draft
            .files
            .iter()
            .enumerate()
            .map(|(index, meta)| {
                JobFile::new_pending(
                    job.id,
                    index as i32,
                    meta.file_name.clone(),
                    meta.folder_name.clone(),
                    meta.size_bytes,
                    keys::file_storage_key(job.id, &meta.file_name),
                )
            })
            .collect();

        let recipients: Vec<Recipient> = draft
            .recipients
            .iter()
            .map(|r| Recipient::new(job.id, r.email.clone(), r.source))
            .collect();

        self.store.insert_draft(&job, &files, &recipients).await?;

        info!(
            owner = %ctx.subject,
            job_id = %job.id,
            total_files = job.total_files,
            recipients = recipients.len(),
            "Draft job registered"
        );

        Ok(job.id)
    }

    /// Records one file upload: writes the payload under the slot's
    /// pre-assigned key, then advances the job counter exactly once per
    /// slot regardless of retries.
    pub async fn upload_file(
        &self,
        ctx: &RequestContext,
        job_id: Uuid,
        file_index: i32,
        data: Bytes,
    ) -> AppResult<UploadProgress> {
        let _job = self.load_owned_draft(job_id, &ctx.subject).await?;

        let file = self
            .store
            .find_file(job_id, file_index)
            .await?
            .ok_or_else(job_not_found)?;

        if data.len() as i64 != file.declared_size_bytes {
            debug!(
                job_id = %job_id,
                file_index,
                declared = file.declared_size_bytes,
                actual = data.len(),
                "Upload size differs from declared size"
            );
        }

        // The counter may only move once the payload is durable.
        self.blobs.put(&file.storage_key, data).await?;

        let first_completion = self.store.mark_file_uploaded(job_id, file_index).await?;
        let counters = if first_completion {
            self.store.increment_uploaded(job_id).await?
        } else {
            self.store.job_counters(job_id).await?
        };

        info!(
            owner = %ctx.subject,
            job_id = %job_id,
            file_index,
            uploaded_files = counters.uploaded_files,
            total_files = counters.total_files,
            first_completion,
            "File upload recorded"
        );

        Ok(UploadProgress {
            file_index,
            uploaded_files: counters.uploaded_files,
            total_files: counters.total_files,
        })
    }

    /// Reports the job status and the slots still awaiting upload, so an
    /// interrupted client can resume by index rather than by count.
    pub async fn job_status(
        &self,
        ctx: &RequestContext,
        job_id: Uuid,
    ) -> AppResult<JobStatusReport> {
        let job = self.load_owned_job(job_id, &ctx.subject).await?;
        let pending_indices = self.store.pending_file_indices(job_id).await?;

        Ok(JobStatusReport {
            status: job.status,
            total_files: job.total_files,
            uploaded_files: job.uploaded_files,
            pending_indices,
        })
    }

    /// Flips a fully-uploaded draft to `pending` — the irreversible point
    /// after which the upload window is closed.
    pub async fn submit(&self, ctx: &RequestContext, job_id: Uuid) -> AppResult<Uuid> {
        let job = self.load_owned_job(job_id, &ctx.subject).await?;

        // Status is checked before completeness so a second submit reports
        // "already submitted" rather than an incompleteness error.
        if job.status != JobStatus::Draft {
            return Err(AppError::validation("Job has already been submitted"));
        }
        if job.uploaded_files < job.total_files {
            return Err(AppError::validation(format!(
                "Not all files are uploaded ({} of {})",
                job.uploaded_files, job.total_files
            )));
        }

        self.store.update_status(job_id, JobStatus::Pending).await?;

        info!(owner = %ctx.subject, job_id = %job_id, "Job submitted for processing");
        Ok(job_id)
    }

    /// Marks a pending job as completed.
    ///
    /// Called by the internal processing pipeline when protection output
    /// has been produced; the API layer restricts the caller to the
    /// service credential.
    pub async fn advance_to_completed(&self, job_id: Uuid, owner: &str) -> AppResult<Uuid> {
        let job = self.load_owned_job(job_id, owner).await?;

        if job.status != JobStatus::Pending {
            return Err(AppError::validation(format!(
                "Job is {}, expected pending",
                job.status
            )));
        }

        self.store
            .update_status(job_id, JobStatus::Completed)
            .await?;

        info!(owner = %owner, job_id = %job_id, "Job completed");
        Ok(job_id)
    }

    /// Capability check performed before every job operation: the job
    /// must exist *for this owner*. Absence and owner mismatch produce
    /// the same not-found outcome.
    async fn load_owned_job(&self, job_id: Uuid, owner: &str) -> AppResult<Job> {
        self.store
            .find_job(job_id, owner)
            .await?
            .ok_or_else(job_not_found)
    }

    /// Same guard, additionally requiring the job to still accept
    /// uploads. A submitted or completed job is reported exactly like a
    /// missing one.
    async fn load_owned_draft(&self, job_id: Uuid, owner: &str) -> AppResult<Job> {
        let job = self.load_owned_job(job_id, owner).await?;
        if job.status != JobStatus::Draft {
            return Err(job_not_found());
        }
        Ok(job)
    }
}

/// The uniform access-denial signal. Never distinguishes why.
fn job_not_found() -> AppError {
    AppError::not_found("Job not found")
}
