//! Internal pipeline callbacks.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use veilbox_core::error::AppError;

use crate::dto::request::CompleteJobRequest;
use crate::dto::response::{ApiResponse, JobIdResponse};
use crate::error::ApiError;
use crate::extractors::InternalCaller;
use crate::state::AppState;

/// POST /internal/jobs/{id}/complete — pipeline reports protection
/// output has been produced.
pub async fn complete_job(
    State(state): State<AppState>,
    _caller: InternalCaller,
    Path(job_id): Path<Uuid>,
    Json(req): Json<CompleteJobRequest>,
) -> Result<Json<ApiResponse<JobIdResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let job_id = state
        .job_service
        .advance_to_completed(job_id, &req.owner)
        .await?;

    Ok(Json(ApiResponse::ok(JobIdResponse { job_id })))
}
