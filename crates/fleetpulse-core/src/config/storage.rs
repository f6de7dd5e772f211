//! Clip storage configuration.

use serde::{Deserialize, Serialize};

/// Storage configuration for uploaded video clips.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory where uploaded clips are written.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    /// Maximum accepted upload size in bytes.
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Path to the bundled sample clip used by the sample-start endpoint.
    #[serde(default = "default_sample_clip")]
    pub sample_clip: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            max_upload_size_bytes: default_max_upload(),
            sample_clip: default_sample_clip(),
        }
    }
}

fn default_upload_dir() -> String {
    "data/uploads".to_string()
}

fn default_max_upload() -> u64 {
    100 * 1024 * 1024
}

fn default_sample_clip() -> String {
    "data/sample/bus_door.mp4".to_string()
}
