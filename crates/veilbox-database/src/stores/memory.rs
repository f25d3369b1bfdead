//! In-memory job store for tests and local development.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use veilbox_core::error::AppError;
use veilbox_core::result::AppResult;
use veilbox_entity::file::{FileStatus, JobFile};
use veilbox_entity::job::{Job, JobStatus};
use veilbox_entity::recipient::Recipient;

use super::{JobCounters, JobStore};

#[derive(Debug, Default)]
struct Tables {
    jobs: HashMap<Uuid, Job>,
    files: BTreeMap<(Uuid, i32), JobFile>,
    recipients: Vec<Recipient>,
}

/// [`JobStore`] backend holding all rows in process memory.
///
/// A single mutex around the tables makes the guarded flip and the
/// counter increment linearizable, matching the per-row atomicity the
/// Postgres backend gets from single-statement updates. Lock scope never
/// spans an await point.
#[derive(Debug, Default)]
pub struct MemoryJobStore {
    tables: Mutex<Tables>,
}

impl MemoryJobStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        // A poisoned lock means a test panicked mid-operation; propagating
        // the panic is the right outcome there.
        self.tables.lock().expect("job store mutex poisoned")
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn insert_draft(
        &self,
        job: &Job,
        files: &[JobFile],
        recipients: &[Recipient],
    ) -> AppResult<()> {
        let mut tables = self.lock();
        if tables.jobs.contains_key(&job.id) {
            return Err(AppError::conflict(format!("Job {} already exists", job.id)));
        }
        tables.jobs.insert(job.id, job.clone());
        for file in files {
            tables
                .files
                .insert((file.job_id, file.file_index), file.clone());
        }
        tables.recipients.extend_from_slice(recipients);
        Ok(())
    }

    async fn find_job(&self, job_id: Uuid, owner: &str) -> AppResult<Option<Job>> {
        let tables = self.lock();
        Ok(tables
            .jobs
            .get(&job_id)
            .filter(|job| job.owner_subject == owner)
            .cloned())
    }

    async fn find_file(&self, job_id: Uuid, file_index: i32) -> AppResult<Option<JobFile>> {
        let tables = self.lock();
        Ok(tables.files.get(&(job_id, file_index)).cloned())
    }

    async fn mark_file_uploaded(&self, job_id: Uuid, file_index: i32) -> AppResult<bool> {
        let mut tables = self.lock();
        match tables.files.get_mut(&(job_id, file_index)) {
            Some(file) if file.status == FileStatus::Pending => {
                file.status = FileStatus::Uploaded;
                file.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn increment_uploaded(&self, job_id: Uuid) -> AppResult<JobCounters> {
        let mut tables = self.lock();
        let job = tables
            .jobs
            .get_mut(&job_id)
            .ok_or_else(|| AppError::not_found("Job not found"))?;
        job.uploaded_files += 1;
        job.updated_at = Utc::now();
        Ok(JobCounters {
            uploaded_files: job.uploaded_files,
            total_files: job.total_files,
        })
    }

    async fn job_counters(&self, job_id: Uuid) -> AppResult<JobCounters> {
        let tables = self.lock();
        let job = tables
            .jobs
            .get(&job_id)
            .ok_or_else(|| AppError::not_found("Job not found"))?;
        Ok(JobCounters {
            uploaded_files: job.uploaded_files,
            total_files: job.total_files,
        })
    }

    async fn pending_file_indices(&self, job_id: Uuid) -> AppResult<Vec<i32>> {
        let tables = self.lock();
        Ok(tables
            .files
            .range((job_id, i32::MIN)..=(job_id, i32::MAX))
            .filter(|(_, file)| file.status == FileStatus::Pending)
            .map(|((_, index), _)| *index)
            .collect())
    }

    async fn update_status(&self, job_id: Uuid, status: JobStatus) -> AppResult<()> {
        let mut tables = self.lock();
        let job = tables
            .jobs
            .get_mut(&job_id)
            .ok_or_else(|| AppError::not_found("Job not found"))?;
        job.status = status;
        job.updated_at = Utc::now();
        Ok(())
    }
}
