//! Real-time WebSocket engine configuration.

use serde::{Deserialize, Serialize};

/// Real-time (WebSocket) engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Per-client outbound buffer size. A client whose buffer is full
    /// misses the delivery rather than blocking the publisher.
    #[serde(default = "default_client_buffer")]
    pub client_buffer_size: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            client_buffer_size: default_client_buffer(),
        }
    }
}

fn default_client_buffer() -> usize {
    256
}
