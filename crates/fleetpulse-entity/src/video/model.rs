//! Video-analysis job entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::status::JobStatus;

/// Which cumulative counter a decoded worker line refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterField {
    /// Cumulative count of people moving in.
    TotalIn,
    /// Cumulative count of people moving out.
    TotalOut,
}

/// One video-analysis job: a bus clip tracked from upload through
/// processing to a terminal outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoJob {
    /// Job identifier, `"{busId}-{unixMillis}"` (with a sequence suffix
    /// when two creates land in the same millisecond).
    pub id: String,
    /// Bus the clip was recorded on.
    pub bus_id: String,
    /// Path to the stored source clip.
    pub input_path: PathBuf,
    /// Current lifecycle status.
    pub status: JobStatus,
    /// Cumulative passengers counted moving in.
    pub total_in: u64,
    /// Cumulative passengers counted moving out.
    pub total_out: u64,
    /// Derived occupancy, always `total_in - total_out`.
    pub current_occupancy: i64,
    /// When the job was created.
    pub created_at: DateTime<Utc>,
    /// When the job reached a terminal state.
    pub completed_at: Option<DateTime<Utc>>,
    /// Exit reason, set only when the job failed.
    pub failure_detail: Option<String>,
}

impl VideoJob {
    /// Create a new job in `Uploaded` status with zeroed counters.
    pub fn new(id: String, bus_id: String, input_path: PathBuf) -> Self {
        Self {
            id,
            bus_id,
            input_path,
            status: JobStatus::Uploaded,
            total_in: 0,
            total_out: 0,
            current_occupancy: 0,
            created_at: Utc::now(),
            completed_at: None,
            failure_detail: None,
        }
    }

    /// Apply a cumulative counter value and recompute occupancy.
    ///
    /// Counters are monotonically non-decreasing while processing; a
    /// stale lower value is ignored. This is the only place occupancy
    /// is written.
    pub fn apply_counter(&mut self, field: CounterField, value: u64) {
        match field {
            CounterField::TotalIn => self.total_in = self.total_in.max(value),
            CounterField::TotalOut => self.total_out = self.total_out.max(value),
        }
        self.current_occupancy = self.total_in as i64 - self.total_out as i64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupancy_is_recomputed_on_every_counter_write() {
        let mut job = VideoJob::new(
            "BUS-001-1".into(),
            "BUS-001".into(),
            PathBuf::from("clip.mp4"),
        );
        job.apply_counter(CounterField::TotalIn, 5);
        assert_eq!((job.total_in, job.total_out, job.current_occupancy), (5, 0, 5));
        job.apply_counter(CounterField::TotalOut, 2);
        assert_eq!((job.total_in, job.total_out, job.current_occupancy), (5, 2, 3));
    }

    #[test]
    fn stale_counter_values_are_ignored() {
        let mut job = VideoJob::new(
            "BUS-001-1".into(),
            "BUS-001".into(),
            PathBuf::from("clip.mp4"),
        );
        job.apply_counter(CounterField::TotalIn, 7);
        job.apply_counter(CounterField::TotalIn, 4);
        assert_eq!(job.total_in, 7);
        assert_eq!(job.current_occupancy, 7);
    }
}
