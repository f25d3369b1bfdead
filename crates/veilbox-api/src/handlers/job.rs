//! Job lifecycle handlers: create draft, upload, status, submit.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use bytes::Bytes;
use uuid::Uuid;
use validator::Validate;

use veilbox_core::error::AppError;
use veilbox_entity::job::ProtectionPolicy;
use veilbox_service::job::{JobStatusReport, NewDraftJob, NewFileMeta, NewRecipient, UploadProgress};

use crate::dto::request::CreateJobRequest;
use crate::dto::response::{ApiResponse, JobIdResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/jobs — register a draft job.
pub async fn create_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<ApiResponse<JobIdResponse>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let draft = NewDraftJob {
        policy: ProtectionPolicy {
            watermark_text: req.policy.watermark_text,
            anti_screenshot: req.policy.anti_screenshot,
            anti_copy: req.policy.anti_copy,
            view_limit: req.policy.view_limit,
            allowed_domain: req.policy.allowed_domain,
            expires_at: req.policy.expires_at,
        },
        recipients: req
            .recipients
            .into_iter()
            .map(|r| NewRecipient {
                email: r.email,
                source: r.source,
            })
            .collect(),
        files: req
            .files
            .into_iter()
            .map(|f| NewFileMeta {
                folder_name: f.folder_name,
                file_name: f.file_name,
                size_bytes: f.size_bytes,
            })
            .collect(),
    };

    let job_id = state.job_service.create_draft(&auth, draft).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(JobIdResponse { job_id })),
    ))
}

/// PUT /api/jobs/{id}/files/{index} — upload one file's bytes.
pub async fn upload_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((job_id, file_index)): Path<(Uuid, i32)>,
    body: Bytes,
) -> Result<Json<ApiResponse<UploadProgress>>, ApiError> {
    let progress = state
        .job_service
        .upload_file(&auth, job_id, file_index, body)
        .await?;

    Ok(Json(ApiResponse::ok(progress)))
}

/// GET /api/jobs/{id}/status — what is left to upload.
pub async fn get_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<ApiResponse<JobStatusReport>>, ApiError> {
    let report = state.job_service.job_status(&auth, job_id).await?;
    Ok(Json(ApiResponse::ok(report)))
}

/// POST /api/jobs/{id}/submit — close the upload window.
pub async fn submit_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<ApiResponse<JobIdResponse>>, ApiError> {
    let job_id = state.job_service.submit(&auth, job_id).await?;
    Ok(Json(ApiResponse::ok(JobIdResponse { job_id })))
}
