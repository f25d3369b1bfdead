//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use veilbox_api::state::AppState;
use veilbox_auth::jwt::AccessClaims;
use veilbox_auth::{AccessTokenVerifier, ServiceTokenVerifier};
use veilbox_core::config::AppConfig;
use veilbox_core::config::auth::AuthConfig;
use veilbox_core::config::database::DatabaseConfig;
use veilbox_database::stores::memory::MemoryJobStore;
use veilbox_service::JobService;
use veilbox_storage::providers::LocalBlobStore;

/// JWT secret the harness mints tokens against.
pub const TEST_JWT_SECRET: &str = "integration-test-secret";
/// Service token the harness presents on the internal surface.
pub const TEST_SERVICE_TOKEN: &str = "pipeline-test-token";

/// Test application context.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Job store for direct row inspection.
    pub job_store: Arc<MemoryJobStore>,
    /// Blob store for direct payload inspection.
    pub blob_store: Arc<LocalBlobStore>,
    _data_dir: tempfile::TempDir,
}

impl TestApp {
    /// Create a new test application.
    pub async fn new() -> Self {
        let data_dir = tempfile::tempdir().expect("Failed to create temp dir");

        let config = AppConfig {
            server: Default::default(),
            database: DatabaseConfig {
                url: "postgres://unused-in-tests".to_string(),
                max_connections: 1,
                min_connections: 1,
                connect_timeout_seconds: 1,
                idle_timeout_seconds: 1,
            },
            storage: Default::default(),
            auth: AuthConfig {
                jwt_secret: TEST_JWT_SECRET.to_string(),
                service_token: TEST_SERVICE_TOKEN.to_string(),
            },
            logging: Default::default(),
        };

        let job_store = Arc::new(MemoryJobStore::new());
        let blob_store = Arc::new(
            LocalBlobStore::new(data_dir.path().to_str().unwrap())
                .await
                .expect("Failed to init blob store"),
        );

        let job_service = Arc::new(JobService::new(job_store.clone(), blob_store.clone()));

        let app_state = AppState {
            config: Arc::new(config.clone()),
            job_store: job_store.clone(),
            blob_store: blob_store.clone(),
            access_tokens: Arc::new(AccessTokenVerifier::new(&config.auth)),
            service_tokens: Arc::new(ServiceTokenVerifier::new(&config.auth)),
            job_service,
        };

        let router = veilbox_api::build_router(app_state);

        Self {
            router,
            job_store,
            blob_store,
            _data_dir: data_dir,
        }
    }

    /// Mint an access token for a subject.
    pub fn token_for(&self, subject: &str) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = AccessClaims {
            sub: subject.to_string(),
            iat: now,
            exp: now + 3600,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
        )
        .expect("Failed to mint test token")
    }

    /// Make a JSON request to the test app.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Make a raw-body upload request to the test app.
    pub async fn request_bytes(
        &self,
        method: &str,
        path: &str,
        body: &[u8],
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/octet-stream");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body.to_vec()))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Make a request to the internal surface with a service token.
    pub async fn internal_request(
        &self,
        path: &str,
        body: Value,
        service_token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = service_token {
            req = req.header("X-Internal-Token", token);
        }

        let req = req
            .body(Body::from(
                serde_json::to_string(&body).expect("Failed to serialize body"),
            ))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Register a draft job with the given number of files; returns its id.
    pub async fn create_job(&self, token: &str, total_files: usize) -> Uuid {
        let files: Vec<Value> = (0..total_files)
            .map(|i| {
                serde_json::json!({
                    "folder_name": "contracts",
                    "file_name": format!("doc-{i}.pdf"),
                    "size_bytes": 3,
                })
            })
            .collect();

        let response = self
            .request(
                "POST",
                "/api/jobs",
                Some(serde_json::json!({
                    "policy": { "watermark_text": "CONFIDENTIAL", "anti_screenshot": true },
                    "recipients": [{ "email": "viewer@example.com", "source": "direct" }],
                    "files": files,
                })),
                Some(token),
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create job failed: {:?}",
            response.body
        );

        response.body["data"]["job_id"]
            .as_str()
            .expect("No job_id in response")
            .parse()
            .expect("Invalid job_id")
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body.
    pub body: Value,
}
