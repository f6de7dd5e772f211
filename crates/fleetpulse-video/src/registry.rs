//! Job registry — owns the set of video-analysis jobs.
//!
//! Jobs live in the registry for the life of the process; there is no
//! deletion path. Per-job mutation happens under the map's entry lock,
//! so readers never observe a half-updated counter pair, and exactly one
//! caller wins the `Uploaded → Processing` transition under concurrent
//! start requests.

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Utc;
use dashmap::DashMap;
use tracing::info;

use fleetpulse_core::{AppError, AppResult};
use fleetpulse_entity::video::{CounterField, JobStatus, VideoJob};

/// Millisecond-resolution job id allocation state.
///
/// Two creates within the same millisecond get distinct ids via the
/// sequence suffix.
#[derive(Debug, Default)]
struct IdState {
    last_millis: i64,
    seq: u32,
}

/// Registry of all video-analysis jobs.
#[derive(Debug, Default)]
pub struct JobRegistry {
    /// Job id → job.
    jobs: DashMap<String, VideoJob>,
    /// Id allocation state.
    id_state: Mutex<IdState>,
}

impl JobRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new job in `Uploaded` status for an operator-uploaded clip.
    pub fn create(&self, bus_id: &str, input_path: PathBuf) -> VideoJob {
        self.create_with_tag(bus_id, input_path, None)
    }

    /// Allocate a new job for the bundled sample clip. The id carries a
    /// `sample` tag so operators can tell sample runs apart.
    pub fn create_sample(&self, bus_id: &str, input_path: PathBuf) -> VideoJob {
        self.create_with_tag(bus_id, input_path, Some("sample"))
    }

    fn create_with_tag(&self, bus_id: &str, input_path: PathBuf, tag: Option<&str>) -> VideoJob {
        let id = self.next_job_id(bus_id, tag);
        let job = VideoJob::new(id.clone(), bus_id.to_string(), input_path);
        self.jobs.insert(id, job.clone());
        info!(job_id = %job.id, bus_id = %job.bus_id, "Video job created");
        job
    }

    /// Build `"{busId}[-{tag}]-{millis}[-{seq}]"`, unique even for
    /// concurrent creates within one millisecond.
    fn next_job_id(&self, bus_id: &str, tag: Option<&str>) -> String {
        let mut state = self
            .id_state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let now = Utc::now().timestamp_millis();
        if now == state.last_millis {
            state.seq += 1;
        } else {
            state.last_millis = now;
            state.seq = 0;
        }

        let base = match tag {
            Some(tag) => format!("{bus_id}-{tag}-{now}"),
            None => format!("{bus_id}-{now}"),
        };
        if state.seq == 0 {
            base
        } else {
            format!("{base}-{}", state.seq)
        }
    }

    /// Fetch a consistent snapshot of a job.
    pub fn get(&self, job_id: &str) -> Option<VideoJob> {
        self.jobs.get(job_id).map(|entry| entry.clone())
    }

    /// `Uploaded → Processing`. Fails with `Conflict` for a job that has
    /// already been started (or finished); exactly one of any number of
    /// racing callers succeeds.
    pub fn begin_processing(&self, job_id: &str) -> AppResult<VideoJob> {
        self.transition(job_id, JobStatus::Processing)
    }

    /// `Processing → Completed`. Sets `completedAt`.
    pub fn complete(&self, job_id: &str) -> AppResult<VideoJob> {
        self.transition(job_id, JobStatus::Completed)
    }

    /// `Processing → Failed`. Sets `completedAt` and the failure detail.
    pub fn fail(&self, job_id: &str, detail: impl Into<String>) -> AppResult<VideoJob> {
        let detail = detail.into();
        self.mutate(job_id, |job| {
            if !job.status.can_transition_to(JobStatus::Failed) {
                return Err(AppError::conflict(format!(
                    "job '{}' cannot move from '{}' to 'failed'",
                    job.id, job.status
                )));
            }
            job.status = JobStatus::Failed;
            job.completed_at = Some(Utc::now());
            job.failure_detail = Some(detail.clone());
            Ok(())
        })
    }

    /// Apply a decoded cumulative counter value. Legal only while the
    /// job is `Processing`; counter updates never change the status.
    pub fn record_counter(
        &self,
        job_id: &str,
        field: CounterField,
        value: u64,
    ) -> AppResult<VideoJob> {
        self.mutate(job_id, |job| {
            if job.status != JobStatus::Processing {
                return Err(AppError::conflict(format!(
                    "job '{}' is '{}', counters only move while processing",
                    job.id, job.status
                )));
            }
            job.apply_counter(field, value);
            Ok(())
        })
    }

    fn transition(&self, job_id: &str, to: JobStatus) -> AppResult<VideoJob> {
        self.mutate(job_id, |job| {
            if !job.status.can_transition_to(to) {
                return Err(AppError::conflict(format!(
                    "job '{}' cannot move from '{}' to '{}'",
                    job.id, job.status, to
                )));
            }
            job.status = to;
            if to.is_terminal() {
                job.completed_at = Some(Utc::now());
            }
            Ok(())
        })
    }

    /// Run a mutation under the job's entry lock and return the updated
    /// snapshot. Concurrent readers see either the old or the new state,
    /// never a partial write.
    fn mutate<F>(&self, job_id: &str, f: F) -> AppResult<VideoJob>
    where
        F: FnOnce(&mut VideoJob) -> AppResult<()>,
    {
        let mut entry = self
            .jobs
            .get_mut(job_id)
            .ok_or_else(|| AppError::not_found(format!("job '{job_id}' not found")))?;
        f(entry.value_mut())?;
        Ok(entry.clone())
    }

    /// Number of jobs ever created in this process.
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetpulse_core::error::ErrorKind;

    fn clip() -> PathBuf {
        PathBuf::from("data/uploads/clip.mp4")
    }

    #[test]
    fn job_id_is_bus_id_plus_instant() {
        let registry = JobRegistry::new();
        let job = registry.create("BUS-007", clip());
        let rest = job.id.strip_prefix("BUS-007-").unwrap();
        // millis, optionally followed by a sequence suffix
        let millis = rest.split('-').next().unwrap();
        assert!(millis.parse::<i64>().is_ok());
    }

    #[test]
    fn ids_are_unique_within_one_millisecond() {
        let registry = JobRegistry::new();
        let mut ids: Vec<String> = (0..100)
            .map(|_| registry.create("BUS-007", clip()).id)
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn sample_jobs_carry_the_sample_tag() {
        let registry = JobRegistry::new();
        let job = registry.create_sample("BUS-001", clip());
        assert!(job.id.starts_with("BUS-001-sample-"));
    }

    #[test]
    fn start_wins_only_once() {
        let registry = JobRegistry::new();
        let job = registry.create("BUS-001", clip());
        assert!(registry.begin_processing(&job.id).is_ok());
        let second = registry.begin_processing(&job.id).unwrap_err();
        assert_eq!(second.kind, ErrorKind::Conflict);
    }

    #[test]
    fn unknown_job_is_not_found() {
        let registry = JobRegistry::new();
        assert!(registry.get("BUS-404-0").is_none());
        let err = registry.begin_processing("BUS-404-0").unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[test]
    fn counters_require_processing_state() {
        let registry = JobRegistry::new();
        let job = registry.create("BUS-001", clip());
        let err = registry
            .record_counter(&job.id, CounterField::TotalIn, 1)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        registry.begin_processing(&job.id).unwrap();
        let snapshot = registry
            .record_counter(&job.id, CounterField::TotalIn, 5)
            .unwrap();
        assert_eq!(snapshot.total_in, 5);
        assert_eq!(snapshot.current_occupancy, 5);
    }

    #[test]
    fn terminal_jobs_are_immutable() {
        let registry = JobRegistry::new();
        let job = registry.create("BUS-001", clip());
        registry.begin_processing(&job.id).unwrap();
        let done = registry.complete(&job.id).unwrap();
        assert!(done.completed_at.is_some());

        assert_eq!(
            registry
                .record_counter(&job.id, CounterField::TotalIn, 9)
                .unwrap_err()
                .kind,
            ErrorKind::Conflict
        );
        assert_eq!(
            registry.fail(&job.id, "late failure").unwrap_err().kind,
            ErrorKind::Conflict
        );
        assert_eq!(registry.get(&job.id).unwrap().total_in, 0);
    }

    #[test]
    fn failed_records_detail_and_completion_time() {
        let registry = JobRegistry::new();
        let job = registry.create("BUS-001", clip());
        registry.begin_processing(&job.id).unwrap();
        let failed = registry.fail(&job.id, "worker exited with code 3").unwrap();
        assert_eq!(failed.status, JobStatus::Failed);
        assert_eq!(
            failed.failure_detail.as_deref(),
            Some("worker exited with code 3")
        );
        assert!(failed.completed_at.is_some());
    }
}
