//! Process supervisor — spawns and monitors one counting worker per job.
//!
//! `start` transitions the job to `Processing` and hands it to a
//! dedicated monitor task, so a slow or silent worker never blocks
//! progress detection for any other job. The monitor streams the
//! worker's stdout line-by-line through the decoder, applies each
//! extracted counter to the registry, and publishes a progress event per
//! decoded line. Worker failures are captured into job state and
//! surfaced via the status endpoint and the completion broadcast; they
//! are never raised back to the caller of `start`.

use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use fleetpulse_core::config::video::VideoConfig;
use fleetpulse_core::AppResult;
use fleetpulse_entity::video::VideoJob;
use fleetpulse_realtime::message::{JobCompletion, JobProgress};
use fleetpulse_realtime::{BroadcastHub, BroadcastMessage};

use crate::decoder::decode_line;
use crate::registry::JobRegistry;

/// Supervises external passenger-counting workers, one per job.
#[derive(Debug)]
pub struct ProcessSupervisor {
    registry: Arc<JobRegistry>,
    hub: Arc<BroadcastHub>,
    config: VideoConfig,
    /// Broadcast to all monitor tasks on shutdown so no worker process
    /// outlives the server.
    shutdown_tx: watch::Sender<bool>,
    /// Live monitor tasks, drained on shutdown so every job finalizes
    /// before the runtime tears down.
    monitors: Mutex<Vec<JoinHandle<()>>>,
}

impl ProcessSupervisor {
    /// Create a supervisor over the given registry and hub.
    pub fn new(registry: Arc<JobRegistry>, hub: Arc<BroadcastHub>, config: VideoConfig) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            registry,
            hub,
            config,
            shutdown_tx,
            monitors: Mutex::new(Vec::new()),
        }
    }

    /// Start the worker for an `Uploaded` job.
    ///
    /// Fails with `NotFound` for an unknown job and `Conflict` for a job
    /// that already has (or had) a worker — the registry's transition
    /// guarantees at most one active worker per job even when start
    /// requests race. On success the returned snapshot is already in
    /// `Processing`; everything after that is asynchronous.
    pub fn start(&self, job_id: &str) -> AppResult<VideoJob> {
        let job = self.registry.begin_processing(job_id)?;
        info!(job_id = %job.id, bus_id = %job.bus_id, "Starting counting worker");

        let monitor = WorkerMonitor {
            registry: Arc::clone(&self.registry),
            hub: Arc::clone(&self.hub),
            config: self.config.clone(),
            shutdown: self.shutdown_tx.subscribe(),
        };
        let handle = tokio::spawn(monitor.run(job.clone()));
        let mut monitors = self.monitors.lock().unwrap_or_else(|p| p.into_inner());
        monitors.retain(|m| !m.is_finished());
        monitors.push(handle);

        Ok(job)
    }

    /// Terminate every still-running worker and wait for its monitor
    /// task. Interrupted jobs finalize as `Failed` and their completion
    /// events are published before this returns. Monitors still running
    /// after `grace` are abandoned with a warning.
    pub async fn shutdown(&self, grace: Duration) {
        let _ = self.shutdown_tx.send(true);

        let monitors: Vec<JoinHandle<()>> = {
            let mut guard = self.monitors.lock().unwrap_or_else(|p| p.into_inner());
            guard.drain(..).collect()
        };
        if monitors.is_empty() {
            return;
        }

        info!(count = monitors.len(), "Waiting for worker monitors to finish");
        let drain = async {
            for handle in monitors {
                if let Err(e) = handle.await {
                    error!(error = %e, "Worker monitor task failed");
                }
            }
        };
        if timeout(grace, drain).await.is_err() {
            warn!("Worker monitors did not finish within the shutdown grace period");
        }
    }
}

/// Per-job monitor: owns the child process for the job's lifetime.
struct WorkerMonitor {
    registry: Arc<JobRegistry>,
    hub: Arc<BroadcastHub>,
    config: VideoConfig,
    shutdown: watch::Receiver<bool>,
}

impl WorkerMonitor {
    async fn run(mut self, job: VideoJob) {
        let job_id = job.id.clone();

        let mut cmd = Command::new(&self.config.command);
        cmd.arg(&self.config.script)
            .arg("--bus-id")
            .arg(&job.bus_id)
            .arg("--input")
            .arg(&job.input_path)
            .arg("--output")
            .arg(&self.config.output_path)
            .arg("--skip-frames")
            .arg(self.config.skip_frames.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                self.finalize(&job_id, Err(format!("failed to spawn worker: {e}")));
                return;
            }
        };

        // stderr is diagnostics only; it never touches job state.
        if let Some(stderr) = child.stderr.take() {
            let diag_job = job_id.clone();
            tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    debug!(job_id = %diag_job, line = %line, "Worker stderr");
                }
            });
        }

        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill().await;
            self.finalize(&job_id, Err("worker stdout unavailable".to_string()));
            return;
        };
        let mut lines = BufReader::new(stdout).lines();

        let mut killed_on_shutdown = false;
        let mut shutdown_open = true;
        loop {
            tokio::select! {
                line = lines.next_line() => match line {
                    Ok(Some(line)) => self.handle_line(&job_id, &line),
                    Ok(None) => break,
                    Err(e) => {
                        warn!(job_id = %job_id, error = %e, "Worker stdout read failed");
                        break;
                    }
                },
                changed = self.shutdown.changed(), if shutdown_open => match changed {
                    Ok(()) if *self.shutdown.borrow() => {
                        warn!(job_id = %job_id, "Shutdown requested, killing worker");
                        let _ = child.kill().await;
                        killed_on_shutdown = true;
                        break;
                    }
                    Ok(()) => {}
                    // Supervisor dropped; nothing further to watch.
                    Err(_) => shutdown_open = false,
                }
            }
        }

        let outcome = match child.wait().await {
            Ok(status) if status.success() && !killed_on_shutdown => Ok(()),
            Ok(_) if killed_on_shutdown => Err("worker terminated during shutdown".to_string()),
            Ok(status) => Err(describe_exit(status)),
            Err(e) => Err(format!("failed to await worker: {e}")),
        };
        self.finalize(&job_id, outcome);
    }

    /// Decode one stdout line; on extraction, update the job's counter
    /// and publish a progress event immediately — never batched.
    fn handle_line(&self, job_id: &str, line: &str) {
        let Some(update) = decode_line(line) else {
            return;
        };
        match self.registry.record_counter(job_id, update.field, update.value) {
            Ok(snapshot) => {
                self.hub
                    .publish(&BroadcastMessage::VideoProcessingUpdate(JobProgress {
                        job_id: snapshot.id,
                        bus_id: snapshot.bus_id,
                        total_in: snapshot.total_in,
                        total_out: snapshot.total_out,
                        current_occupancy: snapshot.current_occupancy,
                    }));
            }
            Err(e) => warn!(job_id = %job_id, error = %e, "Dropped counter update"),
        }
    }

    /// Record the terminal status and publish the completion event,
    /// unconditionally — success or failure.
    fn finalize(&self, job_id: &str, outcome: Result<(), String>) {
        let finalized = match outcome {
            Ok(()) => self.registry.complete(job_id),
            Err(detail) => {
                warn!(job_id = %job_id, detail = %detail, "Worker failed");
                self.registry.fail(job_id, detail)
            }
        };

        match finalized {
            Ok(job) => {
                info!(job_id = %job.id, status = %job.status, "Video job finalized");
                self.hub
                    .publish(&BroadcastMessage::VideoProcessingComplete(JobCompletion {
                        job_id: job.id,
                        bus_id: job.bus_id,
                        status: job.status,
                        total_in: job.total_in,
                        total_out: job.total_out,
                        current_occupancy: job.current_occupancy,
                    }));
            }
            Err(e) => error!(job_id = %job_id, error = %e, "Failed to finalize job"),
        }
    }
}

/// Human-readable exit reason for the failure detail.
fn describe_exit(status: std::process::ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("worker exited with code {code}"),
        None => "worker terminated by signal".to_string(),
    }
}
