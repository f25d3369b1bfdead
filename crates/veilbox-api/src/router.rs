//! Route definitions for the Veilbox HTTP API.
//!
//! User-facing routes are mounted under `/api`; the pipeline callback
//! lives under `/internal` and authenticates with the service token
//! instead of a user JWT. The router receives `AppState` and passes it
//! to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use veilbox_core::config::app::CorsConfig;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_upload_size_bytes as usize;

    let api_routes = Router::new().merge(job_routes()).merge(health_routes());

    let internal_routes = Router::new().route(
        "/jobs/{id}/complete",
        post(handlers::internal::complete_job),
    );

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .nest("/internal", internal_routes)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Job lifecycle endpoints: register, upload, status, submit.
fn job_routes() -> Router<AppState> {
    Router::new()
        .route("/jobs", post(handlers::job::create_job))
        .route(
            "/jobs/{id}/files/{index}",
            put(handlers::job::upload_file),
        )
        .route("/jobs/{id}/status", get(handlers::job::get_status))
        .route("/jobs/{id}/submit", post(handlers::job::submit_job))
}

/// Health check endpoints (no auth required).
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}

/// Build CORS layer from configuration.
fn build_cors_layer(cors_config: &CorsConfig) -> CorsLayer {
    use axum::http::{HeaderName, HeaderValue, Method};
    use tower_http::cors::Any;

    let mut cors = CorsLayer::new();

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    if cors_config.allowed_headers.contains(&"*".to_string()) {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<HeaderName> = cors_config
            .allowed_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors.max_age(std::time::Duration::from_secs(cors_config.max_age_seconds))
}
