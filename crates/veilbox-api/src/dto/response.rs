//! Response DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Response carrying a job identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobIdResponse {
    /// The job identifier.
    pub job_id: Uuid,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Detailed health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Overall status.
    pub status: String,
    /// Version.
    pub version: String,
    /// Relational store reachability.
    pub database: String,
    /// Blob store reachability.
    pub storage: String,
}
