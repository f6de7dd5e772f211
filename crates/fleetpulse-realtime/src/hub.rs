//! Broadcast hub — tracks connected clients and fans out event messages.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::client::{ClientHandle, ClientId, SendOutcome};
use crate::message::BroadcastMessage;

/// Publish/subscribe hub owning the live client set.
///
/// Delivery is best-effort: a message reaches every client subscribed at
/// the moment of the `publish` call and no client that subscribes
/// afterward. Nothing is persisted or replayed.
#[derive(Debug)]
pub struct BroadcastHub {
    /// Live clients, keyed by client ID.
    clients: DashMap<ClientId, Arc<ClientHandle>>,
    /// Per-client outbound buffer size.
    buffer_size: usize,
}

impl BroadcastHub {
    /// Create an empty hub.
    pub fn new(buffer_size: usize) -> Self {
        Self {
            clients: DashMap::new(),
            buffer_size,
        }
    }

    /// Register a new client. No historical messages are delivered.
    ///
    /// Returns the handle and the receiver the connection's writer task
    /// must drain.
    pub fn subscribe(&self) -> (Arc<ClientHandle>, mpsc::Receiver<String>) {
        let (handle, rx) = ClientHandle::new(self.buffer_size);
        let handle = Arc::new(handle);
        self.clients.insert(handle.id, handle.clone());
        debug!(client_id = %handle.id, clients = self.clients.len(), "Client subscribed");
        (handle, rx)
    }

    /// Remove a client. Safe to call concurrently with an in-flight
    /// publish; delivery to other clients is unaffected.
    pub fn unsubscribe(&self, client_id: &ClientId) {
        if self.clients.remove(client_id).is_some() {
            debug!(client_id = %client_id, clients = self.clients.len(), "Client unsubscribed");
        }
    }

    /// Serialize the message once and deliver it to every client
    /// currently subscribed, best-effort.
    ///
    /// A client with a full buffer misses this delivery; a client whose
    /// receiver is gone is evicted. Neither case blocks or fails the
    /// publish for the rest.
    pub fn publish(&self, message: &BroadcastMessage) {
        let frame = match serde_json::to_string(message) {
            Ok(f) => f,
            Err(e) => {
                warn!(error = %e, "Failed to serialize broadcast message");
                return;
            }
        };

        // Snapshot the subscriber set so eviction below cannot contend
        // with the iteration.
        let subscribers: Vec<Arc<ClientHandle>> =
            self.clients.iter().map(|e| e.value().clone()).collect();

        let mut dead = Vec::new();
        for client in &subscribers {
            match client.push(frame.clone()) {
                SendOutcome::Delivered => {}
                SendOutcome::Skipped => {
                    warn!(client_id = %client.id, "Client buffer full, delivery skipped");
                }
                SendOutcome::Disconnected => dead.push(client.id),
            }
        }

        for id in dead {
            self.unsubscribe(&id);
        }
    }

    /// Number of currently connected clients.
    pub fn client_count(&self) -> usize {
        self.clients.len()
    }
}
