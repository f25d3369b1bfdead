//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use veilbox_auth::{AccessTokenVerifier, ServiceTokenVerifier};
use veilbox_core::config::AppConfig;
use veilbox_core::traits::storage::BlobStore;
use veilbox_database::stores::JobStore;
use veilbox_service::JobService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks. The stores are held as
/// trait objects so the same router serves the Postgres wiring in the
/// server binary and the in-memory wiring in the test harness.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Relational job store.
    pub job_store: Arc<dyn JobStore>,
    /// Blob store holding uploaded payloads.
    pub blob_store: Arc<dyn BlobStore>,
    /// User access token verifier.
    pub access_tokens: Arc<AccessTokenVerifier>,
    /// Internal pipeline credential verifier.
    pub service_tokens: Arc<ServiceTokenVerifier>,
    /// Job lifecycle service.
    pub job_service: Arc<JobService>,
}
