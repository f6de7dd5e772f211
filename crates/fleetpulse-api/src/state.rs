//! Application state shared across all handlers.

use std::sync::Arc;

use fleetpulse_core::config::AppConfig;
use fleetpulse_realtime::BroadcastHub;
use fleetpulse_store::FleetStore;
use fleetpulse_video::{JobRegistry, ProcessSupervisor};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// In-memory fleet store.
    pub fleet: Arc<FleetStore>,
    /// Video job registry.
    pub registry: Arc<JobRegistry>,
    /// Counting-worker supervisor.
    pub supervisor: Arc<ProcessSupervisor>,
    /// WebSocket broadcast hub.
    pub hub: Arc<BroadcastHub>,
}
