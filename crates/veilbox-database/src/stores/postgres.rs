//! PostgreSQL job store implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use veilbox_core::error::{AppError, ErrorKind};
use veilbox_core::result::AppResult;
use veilbox_entity::file::JobFile;
use veilbox_entity::job::{Job, JobStatus};
use veilbox_entity::recipient::Recipient;

use super::{JobCounters, JobStore};

/// Production [`JobStore`] backed by PostgreSQL.
///
/// The two concurrency-sensitive operations are single SQL statements:
/// the guarded file flip reports `rows_affected` and the counter
/// increment is `uploaded_files = uploaded_files + 1 ... RETURNING`, so
/// no read-modify-write happens in application code.
#[derive(Debug, Clone)]
pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    /// Create a new Postgres job store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }

    async fn insert_draft(
        &self,
        job: &Job,
        files: &[JobFile],
        recipients: &[Recipient],
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query(
            "INSERT INTO jobs (id, owner_subject, watermark_text, anti_screenshot, anti_copy, \
             view_limit, allowed_domain, expires_at, total_files, uploaded_files, status, \
             created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
        )
        .bind(job.id)
        .bind(&job.owner_subject)
        .bind(&job.policy.watermark_text)
        .bind(job.policy.anti_screenshot)
        .bind(job.policy.anti_copy)
        .bind(job.policy.view_limit)
        .bind(&job.policy.allowed_domain)
        .bind(job.policy.expires_at)
        .bind(job.total_files)
        .bind(job.uploaded_files)
        .bind(job.status)
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert job", e))?;

        for file in files {
            sqlx::query(
                "INSERT INTO job_files (job_id, file_index, file_name, folder_name, \
                 declared_size_bytes, storage_key, status, created_at, updated_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
            )
            .bind(file.job_id)
            .bind(file.file_index)
            .bind(&file.file_name)
            .bind(&file.folder_name)
            .bind(file.declared_size_bytes)
            .bind(&file.storage_key)
            .bind(file.status)
            .bind(file.created_at)
            .bind(file.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to insert job file", e)
            })?;
        }

        for recipient in recipients {
            sqlx::query(
                "INSERT INTO job_recipients (id, job_id, email, source, created_at) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(recipient.id)
            .bind(recipient.job_id)
            .bind(&recipient.email)
            .bind(recipient.source)
            .bind(recipient.created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to insert recipient", e)
            })?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit draft insert", e)
        })?;

        Ok(())
    }

    async fn find_job(&self, job_id: Uuid, owner: &str) -> AppResult<Option<Job>> {
        sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1 AND owner_subject = $2")
            .bind(job_id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find job", e))
    }

    async fn find_file(&self, job_id: Uuid, file_index: i32) -> AppResult<Option<JobFile>> {
        sqlx::query_as::<_, JobFile>(
            "SELECT * FROM job_files WHERE job_id = $1 AND file_index = $2",
        )
        .bind(job_id)
        .bind(file_index)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find job file", e))
    }

    async fn mark_file_uploaded(&self, job_id: Uuid, file_index: i32) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE job_files SET status = 'uploaded', updated_at = NOW() \
             WHERE job_id = $1 AND file_index = $2 AND status = 'pending'",
        )
        .bind(job_id)
        .bind(file_index)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to mark file uploaded", e)
        })?;

        Ok(result.rows_affected() == 1)
    }

    async fn increment_uploaded(&self, job_id: Uuid) -> AppResult<JobCounters> {
        sqlx::query_as::<_, JobCounters>(
            "UPDATE jobs SET uploaded_files = uploaded_files + 1, updated_at = NOW() \
             WHERE id = $1 RETURNING uploaded_files, total_files",
        )
        .bind(job_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to increment upload counter", e)
        })
    }

    async fn job_counters(&self, job_id: Uuid) -> AppResult<JobCounters> {
        sqlx::query_as::<_, JobCounters>(
            "SELECT uploaded_files, total_files FROM jobs WHERE id = $1",
        )
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to read job counters", e))?
        .ok_or_else(|| AppError::not_found("Job not found"))
    }

    async fn pending_file_indices(&self, job_id: Uuid) -> AppResult<Vec<i32>> {
        sqlx::query_scalar::<_, i32>(
            "SELECT file_index FROM job_files WHERE job_id = $1 AND status = 'pending' \
             ORDER BY file_index",
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list pending files", e)
        })
    }

    async fn update_status(&self, job_id: Uuid, status: JobStatus) -> AppResult<()> {
        sqlx::query("UPDATE jobs SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(job_id)
            .bind(status)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update job status", e)
            })?;
        Ok(())
    }
}
