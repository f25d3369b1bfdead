//! Health check handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// GET /api/health/detailed
pub async fn health_detailed(
    State(state): State<AppState>,
) -> Json<ApiResponse<DetailedHealthResponse>> {
    let database = match state.job_store.health_check().await {
        Ok(true) => "connected",
        _ => "unreachable",
    };
    let storage = match state.blob_store.health_check().await {
        Ok(true) => "available",
        _ => "unreachable",
    };

    let status = if database == "connected" && storage == "available" {
        "ok"
    } else {
        "degraded"
    };

    Json(ApiResponse::ok(DetailedHealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
        storage: storage.to_string(),
    }))
}
