//! Integration tests for the video job surface.

mod helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn upload_process_status_flow() {
    let app = helpers::TestApp::new();

    let response = app.upload_clip("BUS-007").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["busId"], "BUS-007");
    assert_eq!(response.body["message"], "Video uploaded successfully");
    let job_id = response.body["jobId"].as_str().unwrap().to_string();
    assert!(job_id.starts_with("BUS-007-"));

    // Uploaded until explicitly started.
    let response = app
        .request("GET", &format!("/api/video/status/{job_id}"), None)
        .await;
    assert_eq!(response.body["status"], "uploaded");

    let response = app
        .request("POST", &format!("/api/video/process/{job_id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Video processing started");

    let job = app.wait_for_terminal(&job_id).await;
    assert_eq!(job["status"], "completed");
    assert_eq!(job["totalIn"], 5);
    assert_eq!(job["totalOut"], 2);
    assert_eq!(job["currentOccupancy"], 3);
    assert!(job["completedAt"].is_string());
    assert!(job["failureDetail"].is_null());
}

#[tokio::test]
async fn starting_twice_conflicts() {
    let app = helpers::TestApp::new();

    let response = app.upload_clip("BUS-001").await;
    let job_id = response.body["jobId"].as_str().unwrap().to_string();

    let response = app
        .request("POST", &format!("/api/video/process/{job_id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("POST", &format!("/api/video/process/{job_id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");

    app.wait_for_terminal(&job_id).await;
}

#[tokio::test]
async fn unknown_job_is_not_found() {
    let app = helpers::TestApp::new();

    let response = app
        .request("POST", "/api/video/process/BUS-001-1700000000000", None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("GET", "/api/video/status/BUS-001-1700000000000", None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn upload_without_file_is_rejected() {
    let app = helpers::TestApp::new();

    let boundary = "fleetpulse-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"busId\"\r\n\r\n\
         BUS-001\r\n\
         --{boundary}--\r\n"
    );
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/api/video/upload")
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(axum::body::Body::from(body))
        .unwrap();

    let response = tower::ServiceExt::oneshot(app.router.clone(), req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sample_run_completes_end_to_end() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/video/process-sample",
            Some(serde_json::json!({"busId": "BUS-003"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Sample video processing started");
    let job_id = response.body["jobId"].as_str().unwrap().to_string();
    assert!(job_id.starts_with("BUS-003-sample-"));

    let job = app.wait_for_terminal(&job_id).await;
    assert_eq!(job["status"], "completed");
    assert_eq!(job["totalIn"], 5);
}

#[tokio::test]
async fn sample_run_without_clip_is_not_found() {
    let app = helpers::TestApp::with_sample(false);

    let response = app
        .request("POST", "/api/video/process-sample", Some(serde_json::json!({})))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Sample video not found");
}

#[tokio::test]
async fn progress_events_reach_websocket_subscribers() {
    let app = helpers::TestApp::new();
    let (_client, mut rx) = app.state.hub.subscribe();

    let response = app.upload_clip("BUS-002").await;
    let job_id = response.body["jobId"].as_str().unwrap().to_string();
    app.request("POST", &format!("/api/video/process/{job_id}"), None)
        .await;
    app.wait_for_terminal(&job_id).await;
    // The completion frame is published right after the status flips.
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    let mut types = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        let event: serde_json::Value = serde_json::from_str(&frame).unwrap();
        types.push(event["type"].as_str().unwrap().to_string());
    }
    assert_eq!(
        types,
        vec![
            "video_processing_update",
            "video_processing_update",
            "video_processing_complete",
        ]
    );
}
