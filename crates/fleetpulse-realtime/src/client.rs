//! Individual dashboard client connection handle.

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Unique client identifier.
pub type ClientId = Uuid;

/// Outcome of pushing a message to a single client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Message queued for the client's writer task.
    Delivered,
    /// Client buffer full; this delivery is skipped.
    Skipped,
    /// Client receiver dropped; the client should be evicted.
    Disconnected,
}

/// A handle to a single connected dashboard client.
///
/// Holds the bounded sender feeding the client's WebSocket writer task.
/// Per-client writes are serialized by that single writer draining the
/// channel, so two concurrently published messages never interleave
/// within one client's stream.
#[derive(Debug)]
pub struct ClientHandle {
    /// Unique client ID.
    pub id: ClientId,
    /// When the client connected.
    pub connected_at: DateTime<Utc>,
    /// Sender for serialized outbound frames.
    sender: mpsc::Sender<String>,
}

impl ClientHandle {
    /// Create a handle and the receiving end for the writer task.
    pub fn new(buffer_size: usize) -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(buffer_size);
        let handle = Self {
            id: Uuid::new_v4(),
            connected_at: Utc::now(),
            sender: tx,
        };
        (handle, rx)
    }

    /// Push one already-serialized frame without blocking.
    pub fn push(&self, frame: String) -> SendOutcome {
        match self.sender.try_send(frame) {
            Ok(()) => SendOutcome::Delivered,
            Err(mpsc::error::TrySendError::Full(_)) => SendOutcome::Skipped,
            Err(mpsc::error::TrySendError::Closed(_)) => SendOutcome::Disconnected,
        }
    }
}
