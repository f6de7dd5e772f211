//! End-to-end supervisor tests against shell-script fake workers.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

use fleetpulse_core::config::video::VideoConfig;
use fleetpulse_core::error::ErrorKind;
use fleetpulse_entity::video::JobStatus;
use fleetpulse_realtime::BroadcastHub;
use fleetpulse_video::{JobRegistry, ProcessSupervisor};

fn fixture_config(script: &str) -> VideoConfig {
    VideoConfig {
        command: "sh".to_string(),
        script: format!("tests/fixtures/{script}"),
        output_path: "output.avi".to_string(),
        skip_frames: 30,
    }
}

fn setup(script: &str) -> (Arc<JobRegistry>, Arc<BroadcastHub>, ProcessSupervisor) {
    let registry = Arc::new(JobRegistry::new());
    let hub = Arc::new(BroadcastHub::new(64));
    let supervisor =
        ProcessSupervisor::new(Arc::clone(&registry), Arc::clone(&hub), fixture_config(script));
    (registry, hub, supervisor)
}

/// Receive broadcast frames until a completion event arrives.
async fn collect_until_complete(rx: &mut mpsc::Receiver<String>) -> Vec<serde_json::Value> {
    let mut frames = Vec::new();
    loop {
        let frame = timeout(Duration::from_secs(10), rx.recv())
            .await
            .expect("timed out waiting for broadcast")
            .expect("hub closed");
        let value: serde_json::Value = serde_json::from_str(&frame).unwrap();
        let done = value["type"] == "video_processing_complete";
        frames.push(value);
        if done {
            return frames;
        }
    }
}

#[tokio::test]
async fn successful_run_streams_progress_and_completes() {
    let (registry, hub, supervisor) = setup("fake_worker.sh");
    let (_client, mut rx) = hub.subscribe();

    let job = registry.create("BUS-007", PathBuf::from("clip.mp4"));
    assert!(job.id.starts_with("BUS-007-"));

    let started = supervisor.start(&job.id).unwrap();
    assert_eq!(started.status, JobStatus::Processing);

    let frames = collect_until_complete(&mut rx).await;
    assert_eq!(frames.len(), 3);

    // One progress event per decoded line, in worker output order.
    assert_eq!(frames[0]["type"], "video_processing_update");
    assert_eq!(frames[0]["data"]["totalIn"], 5);
    assert_eq!(frames[0]["data"]["totalOut"], 0);
    assert_eq!(frames[0]["data"]["currentOccupancy"], 5);

    assert_eq!(frames[1]["data"]["totalIn"], 5);
    assert_eq!(frames[1]["data"]["totalOut"], 2);
    assert_eq!(frames[1]["data"]["currentOccupancy"], 3);

    assert_eq!(frames[2]["type"], "video_processing_complete");
    assert_eq!(frames[2]["data"]["status"], "completed");
    assert_eq!(frames[2]["data"]["totalIn"], 5);
    assert_eq!(frames[2]["data"]["totalOut"], 2);
    assert_eq!(frames[2]["data"]["currentOccupancy"], 3);

    let final_job = registry.get(&job.id).unwrap();
    assert_eq!(final_job.status, JobStatus::Completed);
    assert_eq!(final_job.total_in, 5);
    assert_eq!(final_job.total_out, 2);
    assert_eq!(final_job.current_occupancy, 3);
    assert!(final_job.completed_at.is_some());
    assert!(final_job.failure_detail.is_none());
}

#[tokio::test]
async fn silent_crash_fails_the_job_with_detail() {
    let (registry, hub, supervisor) = setup("fake_worker_fail.sh");
    let (_client, mut rx) = hub.subscribe();

    let job = registry.create("BUS-001", PathBuf::from("clip.mp4"));
    supervisor.start(&job.id).unwrap();

    let frames = collect_until_complete(&mut rx).await;
    // No progress lines were emitted, only the completion event.
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0]["data"]["status"], "failed");
    assert_eq!(frames[0]["data"]["totalIn"], 0);
    assert_eq!(frames[0]["data"]["totalOut"], 0);

    let final_job = registry.get(&job.id).unwrap();
    assert_eq!(final_job.status, JobStatus::Failed);
    assert_eq!(final_job.total_in, 0);
    assert_eq!(final_job.total_out, 0);
    let detail = final_job.failure_detail.unwrap();
    assert!(detail.contains("code 3"), "unexpected detail: {detail}");
}

#[tokio::test]
async fn second_start_conflicts_while_worker_is_active() {
    let (registry, hub, supervisor) = setup("fake_worker_slow.sh");
    let (_client, mut rx) = hub.subscribe();

    let job = registry.create("BUS-002", PathBuf::from("clip.mp4"));
    supervisor.start(&job.id).unwrap();

    let err = supervisor.start(&job.id).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    // Exactly one worker is feeding counters.
    let frame = timeout(Duration::from_secs(10), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert!(frame.contains("\"totalIn\":1"));
    assert!(rx.try_recv().is_err());

    supervisor.shutdown(Duration::from_secs(10)).await;
}

#[tokio::test]
async fn start_on_unknown_job_is_not_found() {
    let (_registry, _hub, supervisor) = setup("fake_worker.sh");
    let err = supervisor.start("BUS-404-1700000000000").unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn shutdown_terminates_running_workers() {
    let (registry, hub, supervisor) = setup("fake_worker_slow.sh");
    let (_client, mut rx) = hub.subscribe();

    let job = registry.create("BUS-003", PathBuf::from("clip.mp4"));
    supervisor.start(&job.id).unwrap();

    // Wait for the first progress line so the worker is definitely up.
    timeout(Duration::from_secs(10), rx.recv()).await.unwrap().unwrap();

    supervisor.shutdown(Duration::from_secs(10)).await;

    // Shutdown returns only after the monitor finalized the job, so the
    // failed status and completion event are already visible.
    let final_job = registry.get(&job.id).unwrap();
    assert_eq!(final_job.status, JobStatus::Failed);
    assert!(final_job.failure_detail.unwrap().contains("shutdown"));

    let frames = collect_until_complete(&mut rx).await;
    let completion = frames.last().unwrap();
    assert_eq!(completion["data"]["status"], "failed");
}
