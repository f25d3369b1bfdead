//! Veilbox server — content-protection job orchestrator.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use veilbox_api::state::AppState;
use veilbox_auth::{AccessTokenVerifier, ServiceTokenVerifier};
use veilbox_core::config::AppConfig;
use veilbox_core::error::AppError;
use veilbox_database::stores::postgres::PgJobStore;
use veilbox_service::JobService;

#[tokio::main]
async fn main() {
    let env = std::env::var("VEILBOX_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Veilbox v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Create data directories ──────────────────────────
    create_data_directories(&config).await?;

    // ── Step 2: Database connection + migrations ─────────────────
    let db_pool = veilbox_database::connection::DatabasePool::connect(&config.database).await?;
    veilbox_database::migration::run_migrations(db_pool.pool()).await?;

    // ── Step 3: Blob store ───────────────────────────────────────
    tracing::info!(provider = %config.storage.provider, "Initializing blob store");
    let blob_store = veilbox_storage::blob_store_from_config(&config.storage).await?;

    // ── Step 4: Job store and services ───────────────────────────
    let job_store = Arc::new(PgJobStore::new(db_pool.pool().clone()));
    let job_service = Arc::new(JobService::new(job_store.clone(), blob_store.clone()));

    // ── Step 5: Auth verifiers ───────────────────────────────────
    let access_tokens = Arc::new(AccessTokenVerifier::new(&config.auth));
    let service_tokens = Arc::new(ServiceTokenVerifier::new(&config.auth));
    if config.auth.service_token.is_empty() {
        tracing::warn!("No service token configured; the internal surface is disabled");
    }

    // ── Step 6: Build and start HTTP server ──────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let app_state = AppState {
        config: Arc::new(config),
        job_store,
        blob_store,
        access_tokens,
        service_tokens,
        job_service,
    };

    let app = veilbox_api::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Veilbox server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    db_pool.close().await;
    Ok(())
}

async fn create_data_directories(config: &AppConfig) -> Result<(), AppError> {
    let dirs = [
        config.storage.data_root.clone(),
        config.storage.local.root_path.clone(),
    ];

    for dir in &dirs {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create dir '{}': {}", dir, e)))?;
    }

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
}
