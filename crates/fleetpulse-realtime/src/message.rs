//! Broadcast message envelope and payload definitions.
//!
//! Every message crosses the wire as `{"type": "...", "data": {...}}`,
//! matching what the dashboard client expects.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fleetpulse_entity::bus::Bus;
use fleetpulse_entity::passenger::PassengerCountUpdate;
use fleetpulse_entity::station::Station;
use fleetpulse_entity::video::JobStatus;

/// Messages fanned out to every connected dashboard client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum BroadcastMessage {
    /// Incremental counter update from a running video-analysis job.
    VideoProcessingUpdate(JobProgress),
    /// Terminal outcome of a video-analysis job.
    VideoProcessingComplete(JobCompletion),
    /// A telemetry update was accepted and applied to a bus.
    PassengerCountUpdated(PassengerCountEvent),
    /// A bus was registered.
    BusCreated(Bus),
    /// A station was registered.
    StationCreated(Station),
    /// An operator acknowledged an alert.
    AlertMarkedRead(AlertReadEvent),
}

/// Progress payload, published once per decoded worker line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobProgress {
    /// Job identifier.
    pub job_id: String,
    /// Bus the job belongs to.
    pub bus_id: String,
    /// Cumulative passengers in.
    pub total_in: u64,
    /// Cumulative passengers out.
    pub total_out: u64,
    /// Derived occupancy.
    pub current_occupancy: i64,
}

/// Completion payload, published exactly once per job, success or failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCompletion {
    /// Job identifier.
    pub job_id: String,
    /// Bus the job belongs to.
    pub bus_id: String,
    /// Terminal status (`completed` or `failed`).
    pub status: JobStatus,
    /// Final cumulative passengers in.
    pub total_in: u64,
    /// Final cumulative passengers out.
    pub total_out: u64,
    /// Final derived occupancy.
    pub current_occupancy: i64,
}

/// Payload carried by `passenger_count_updated`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassengerCountEvent {
    /// The bus aggregate after applying the update.
    pub bus: Bus,
    /// The accepted telemetry update.
    pub update: PassengerCountUpdate,
}

/// Payload carried by `alert_marked_read`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertReadEvent {
    /// The acknowledged alert.
    pub alert_id: Uuid,
}
