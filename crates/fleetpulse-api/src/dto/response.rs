//! Response DTOs.
//!
//! Shapes match what the dashboard client already consumes, so entities
//! go over the wire unwrapped and these DTOs cover only the composite
//! responses.

use serde::{Deserialize, Serialize};

use fleetpulse_entity::bus::Bus;

/// Response for `POST /api/video/upload` and `process-sample`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub job_id: String,
    pub message: String,
    pub bus_id: String,
}

/// Response for `POST /api/video/process/{jobId}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStartedResponse {
    pub message: String,
    pub job_id: String,
}

/// Generic acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Response for `POST /api/passenger-data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassengerUpdateResponse {
    pub success: bool,
    pub bus: Bus,
}

/// Response for `GET /api/dashboard/stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Passengers currently on board across the active fleet.
    pub total_passengers: u32,
    /// Buses in the active fleet.
    pub active_buses: usize,
    /// Active buses whose status is `running`.
    pub active_buses_running: usize,
    /// Fleet-wide occupancy as a percentage of total capacity.
    pub average_occupancy: u32,
    /// Unacknowledged critical alerts.
    pub critical_alerts: usize,
    /// All unacknowledged alerts.
    pub total_alerts: usize,
    /// Stations currently in service.
    pub active_stations: usize,
}

/// Response for `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
