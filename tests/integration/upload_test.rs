//! Integration tests for the resumable upload tracker.

use http::StatusCode;

use veilbox_core::traits::storage::BlobStore;
use veilbox_database::stores::JobStore;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_upload_reports_progress() {
    let app = TestApp::new().await;
    let token = app.token_for("acct-1");
    let job_id = app.create_job(&token, 3).await;

    let response = app
        .request_bytes(
            "PUT",
            &format!("/api/jobs/{job_id}/files/1"),
            b"abc",
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["file_index"], 1);
    assert_eq!(response.body["data"]["uploaded_files"], 1);
    assert_eq!(response.body["data"]["total_files"], 3);
}

#[tokio::test]
async fn test_reupload_counts_once_and_overwrites_blob() {
    let app = TestApp::new().await;
    let token = app.token_for("acct-1");
    let job_id = app.create_job(&token, 2).await;

    let response = app
        .request_bytes(
            "PUT",
            &format!("/api/jobs/{job_id}/files/0"),
            b"first",
            Some(&token),
        )
        .await;
    assert_eq!(response.body["data"]["uploaded_files"], 1);

    // The retry succeeds, rewrites the payload, and the counter holds.
    let response = app
        .request_bytes(
            "PUT",
            &format!("/api/jobs/{job_id}/files/0"),
            b"second",
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["uploaded_files"], 1);

    let file = app.job_store.find_file(job_id, 0).await.unwrap().unwrap();
    let stored = app.blob_store.get(&file.storage_key).await.unwrap();
    assert_eq!(&stored[..], b"second");
}

#[tokio::test]
async fn test_upload_out_of_range_index() {
    let app = TestApp::new().await;
    let token = app.token_for("acct-1");
    let job_id = app.create_job(&token, 2).await;

    let response = app
        .request_bytes(
            "PUT",
            &format!("/api/jobs/{job_id}/files/2"),
            b"abc",
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_resume_via_pending_indices() {
    let app = TestApp::new().await;
    let token = app.token_for("acct-1");
    let job_id = app.create_job(&token, 4).await;

    // An interrupted session left slots 1 and 3 behind.
    for index in [0, 2] {
        app.request_bytes(
            "PUT",
            &format!("/api/jobs/{job_id}/files/{index}"),
            b"abc",
            Some(&token),
        )
        .await;
    }

    let response = app
        .request(
            "GET",
            &format!("/api/jobs/{job_id}/status"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(
        response.body["data"]["pending_indices"],
        serde_json::json!([1, 3])
    );

    // Finishing exactly the reported indices completes the job.
    for index in [1, 3] {
        app.request_bytes(
            "PUT",
            &format!("/api/jobs/{job_id}/files/{index}"),
            b"abc",
            Some(&token),
        )
        .await;
    }

    let response = app
        .request(
            "POST",
            &format!("/api/jobs/{job_id}/submit"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_full_lifecycle_scenario() {
    let app = TestApp::new().await;
    let token = app.token_for("acct-1");
    let job_id = app.create_job(&token, 3).await;

    // Upload index 1, re-upload it, then fill 0 and 2.
    for (index, expected) in [(1, 1), (1, 1), (0, 2), (2, 3)] {
        let response = app
            .request_bytes(
                "PUT",
                &format!("/api/jobs/{job_id}/files/{index}"),
                b"abc",
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["data"]["uploaded_files"], expected);
    }

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
            "GET",
            &format!("/api/jobs/{job_id}/status"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.body["data"]["status"], "pending");
    assert_eq!(response.body["data"]["pending_indices"], serde_json::json!([]));
}

#[tokio::test]
async fn test_upload_rejected_after_submit() {
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

    // The upload window is closed; retries now read as not-found.
    let response = app
        .request_bytes(
            "PUT",
            &format!("/api/jobs/{job_id}/files/0"),
            b"abc",
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
