//! Integration tests for the draft job lifecycle: registration,
//! submission, and the internal completion callback.

use http::StatusCode;
use uuid::Uuid;

use crate::helpers::{TEST_SERVICE_TOKEN, TestApp};

#[tokio::test]
async fn test_create_job_returns_draft() {
    let app = TestApp::new().await;
    let token = app.token_for("acct-1");

    let job_id = app.create_job(&token, 3).await;

    let response = app
        .request(
            "GET",
            &format!("/api/jobs/{job_id}/status"),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "draft");
    assert_eq!(response.body["data"]["total_files"], 3);
    assert_eq!(response.body["data"]["uploaded_files"], 0);
    assert_eq!(
        response.body["data"]["pending_indices"],
        serde_json::json!([0, 1, 2])
    );
}

#[tokio::test]
async fn test_create_job_requires_auth() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/jobs",
            Some(serde_json::json!({ "recipients": [], "files": [] })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request(
            "POST",
            "/api/jobs",
            Some(serde_json::json!({ "recipients": [], "files": [] })),
            Some("not-a-valid-token"),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_job_rejects_empty_lists() {
    let app = TestApp::new().await;
    let token = app.token_for("acct-1");

    let response = app
        .request(
            "POST",
            "/api/jobs",
            Some(serde_json::json!({
                "recipients": [],
                "files": [{ "folder_name": "a", "file_name": "b.pdf", "size_bytes": 1 }],
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            "/api/jobs",
            Some(serde_json::json!({
                "recipients": [{ "email": "viewer@example.com" }],
                "files": [],
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_job_rejects_bad_email() {
    let app = TestApp::new().await;
    let token = app.token_for("acct-1");

    let response = app
        .request(
            "POST",
            "/api/jobs",
            Some(serde_json::json!({
                "recipients": [{ "email": "not-an-email" }],
                "files": [{ "folder_name": "a", "file_name": "b.pdf", "size_bytes": 1 }],
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_status_unknown_job_is_not_found() {
    let app = TestApp::new().await;
    let token = app.token_for("acct-1");

    let response = app
        .request(
            "GET",
            &format!("/api/jobs/{}/status", Uuid::new_v4()),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_ownership_isolation() {
    let app = TestApp::new().await;
    let owner_token = app.token_for("acct-1");
    let stranger_token = app.token_for("acct-2");

    let job_id = app.create_job(&owner_token, 1).await;

    // Status, upload, and submit all report the same not-found to a
    // foreign principal.
    let response = app
        .request(
            "GET",
            &format!("/api/jobs/{job_id}/status"),
            None,
            Some(&stranger_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request_bytes(
            "PUT",
            &format!("/api/jobs/{job_id}/files/0"),
            b"abc",
            Some(&stranger_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request(
            "POST",
            &format!("/api/jobs/{job_id}/submit"),
            None,
            Some(&stranger_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_submit_incomplete_job_fails_validation() {
    let app = TestApp::new().await;
    let token = app.token_for("acct-1");
    let job_id = app.create_job(&token, 2).await;

    app.request_bytes(
        "PUT",
        &format!("/api/jobs/{job_id}/files/0"),
        b"abc",
        Some(&token),
    )
    .await;

    let response = app
        .request(
            "POST",
            &format!("/api/jobs/{job_id}/submit"),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    // The job stays a draft.
    let response = app
        .request(
            "GET",
            &format!("/api/jobs/{job_id}/status"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.body["data"]["status"], "draft");
}

#[tokio::test]
async fn test_double_submit_reports_already_submitted() {
    let app = TestApp::new().await;
    let token = app.token_for("acct-1");
    let job_id = app.create_job(&token, 1).await;

    app.request_bytes(
        "PUT",
        &format!("/api/jobs/{job_id}/files/0"),
        b"abc",
        Some(&token),
    )
    .await;

    let response = app
        .request(
            "POST",
            &format!("/api/jobs/{job_id}/submit"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "POST",
            &format!("/api/jobs/{job_id}/submit"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(
        response.body["message"]
            .as_str()
            .unwrap()
            .contains("already been submitted")
    );
}

#[tokio::test]
async fn test_internal_completion_flow() {
    let app = TestApp::new().await;
    let token = app.token_for("acct-1");
    let job_id = app.create_job(&token, 1).await;

    app.request_bytes(
        "PUT",
        &format!("/api/jobs/{job_id}/files/0"),
        b"abc",
        Some(&token),
    )
    .await;
    app.request(
        "POST",
        &format!("/api/jobs/{job_id}/submit"),
        None,
        Some(&token),
    )
    .await;

    let response = app
        .internal_request(
            &format!("/internal/jobs/{job_id}/complete"),
            serde_json::json!({ "owner": "acct-1" }),
            Some(TEST_SERVICE_TOKEN),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "GET",
            &format!("/api/jobs/{job_id}/status"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.body["data"]["status"], "completed");
}

#[tokio::test]
async fn test_internal_completion_requires_service_token() {
    let app = TestApp::new().await;
    let token = app.token_for("acct-1");
    let job_id = app.create_job(&token, 1).await;

    let response = app
        .internal_request(
            &format!("/internal/jobs/{job_id}/complete"),
            serde_json::json!({ "owner": "acct-1" }),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .internal_request(
            &format!("/internal/jobs/{job_id}/complete"),
            serde_json::json!({ "owner": "acct-1" }),
            Some("wrong-token"),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_internal_completion_requires_pending_state() {
    let app = TestApp::new().await;
    let token = app.token_for("acct-1");
    let job_id = app.create_job(&token, 1).await;

    // Still a draft: the pipeline cannot complete it.
    let response = app
        .internal_request(
            &format!("/internal/jobs/{job_id}/complete"),
            serde_json::json!({ "owner": "acct-1" }),
            Some(TEST_SERVICE_TOKEN),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
