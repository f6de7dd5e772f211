//! Video-analysis worker configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the external passenger-counting worker process.
///
/// The worker is invoked as
/// `{command} {script} --bus-id B --input I --output O --skip-frames K`
/// and reports cumulative counts on stdout as it makes progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Interpreter used to run the worker.
    #[serde(default = "default_command")]
    pub command: String,
    /// Worker script path.
    #[serde(default = "default_script")]
    pub script: String,
    /// Path the worker writes its annotated output artifact to.
    #[serde(default = "default_output_path")]
    pub output_path: String,
    /// Number of input frames skipped between analyzed frames.
    #[serde(default = "default_skip_frames")]
    pub skip_frames: u32,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            script: default_script(),
            output_path: default_output_path(),
            skip_frames: default_skip_frames(),
        }
    }
}

fn default_command() -> String {
    "python3".to_string()
}

fn default_script() -> String {
    "people_counter_client.py".to_string()
}

fn default_output_path() -> String {
    "output.avi".to_string()
}

fn default_skip_frames() -> u32 {
    30
}
