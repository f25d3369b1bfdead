//! Integration tests for the health endpoints.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_health_detailed() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health/detailed", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["database"], "connected");
    assert_eq!(response.body["data"]["storage"], "available");
}
