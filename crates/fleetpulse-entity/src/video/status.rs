//! Video-analysis job status enumeration and transition table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a video-analysis job.
///
/// Lifecycle: `Uploaded → Processing → {Completed, Failed}`. Both
/// `Completed` and `Failed` are terminal; no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Clip stored, worker not yet started.
    Uploaded,
    /// Worker running, counters being updated.
    Processing,
    /// Worker exited with code 0.
    Completed,
    /// Worker exited nonzero, was signalled, or failed to spawn.
    Failed,
}

impl JobStatus {
    /// Check if the job is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// The legal transition table. `start` is the only way out of
    /// `Uploaded`; terminal states admit nothing.
    pub fn can_transition_to(&self, next: JobStatus) -> bool {
        matches!(
            (self, next),
            (Self::Uploaded, Self::Processing)
                | (Self::Processing, Self::Completed)
                | (Self::Processing, Self::Failed)
        )
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uploaded => "uploaded",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
