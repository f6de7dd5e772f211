//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use fleetpulse_api::{AppState, build_router};
use fleetpulse_core::config::AppConfig;
use fleetpulse_realtime::BroadcastHub;
use fleetpulse_store::FleetStore;
use fleetpulse_video::{JobRegistry, ProcessSupervisor};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for direct assertions against the stores
    pub state: AppState,
}

impl TestApp {
    /// Create a test application with the sample clip in place.
    pub fn new() -> Self {
        Self::with_sample(true)
    }

    /// Create a test application, optionally leaving the sample clip
    /// missing to exercise the not-found path.
    pub fn with_sample(sample_present: bool) -> Self {
        let scratch =
            std::env::temp_dir().join(format!("fleetpulse-test-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&scratch).expect("Failed to create scratch dir");

        let mut config = AppConfig::default();
        config.storage.upload_dir = scratch.join("uploads").to_string_lossy().into_owned();
        let sample = scratch.join("sample.mp4");
        if sample_present {
            std::fs::write(&sample, b"sample clip bytes").expect("Failed to write sample clip");
        }
        config.storage.sample_clip = sample.to_string_lossy().into_owned();

        // Counting worker stand-in; emits a fixed progress sequence.
        config.video.command = "sh".to_string();
        config.video.script = "tests/fixtures/fake_worker.sh".to_string();

        let fleet = Arc::new(FleetStore::new());
        fleet.seed_demo_fleet();

        let hub = Arc::new(BroadcastHub::new(config.realtime.client_buffer_size));
        let registry = Arc::new(JobRegistry::new());
        let supervisor = Arc::new(ProcessSupervisor::new(
            Arc::clone(&registry),
            Arc::clone(&hub),
            config.video.clone(),
        ));

        let state = AppState {
            config: Arc::new(config),
            fleet,
            registry,
            supervisor,
            hub,
        };

        Self {
            router: build_router(state.clone()),
            state,
        }
    }

    /// Make a JSON HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Upload a small fake clip via the multipart endpoint
    pub async fn upload_clip(&self, bus_id: &str) -> TestResponse {
        let boundary = "fleetpulse-test-boundary";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"busId\"\r\n\r\n\
             {bus_id}\r\n\
             --{boundary}\r\n\
             Content-Disposition: form-data; name=\"video\"; filename=\"clip.mp4\"\r\n\
             Content-Type: video/mp4\r\n\r\n\
             fake video bytes\r\n\
             --{boundary}--\r\n"
        );

        let req = Request::builder()
            .method("POST")
            .uri("/api/video/upload")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Poll the status endpoint until the job reaches a terminal state.
    pub async fn wait_for_terminal(&self, job_id: &str) -> Value {
        for _ in 0..200 {
            let response = self
                .request("GET", &format!("/api/video/status/{job_id}"), None)
                .await;
            assert_eq!(response.status, StatusCode::OK);
            let status = response.body["status"].as_str().unwrap_or_default().to_string();
            if status == "completed" || status == "failed" {
                return response.body;
            }
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        }
        panic!("Job {job_id} never reached a terminal state");
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

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
