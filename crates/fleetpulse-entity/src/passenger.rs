//! Passenger telemetry entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// An inbound passenger-count telemetry update from a field device.
///
/// Validated at the ingest boundary before it reaches the fleet store;
/// malformed payloads are rejected with field-level errors.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PassengerCountUpdate {
    /// Bus the update applies to.
    #[validate(length(min = 1, message = "bus id must not be empty"))]
    pub bus_id: String,
    /// Passengers that boarded since the previous report.
    #[validate(range(max = 1000, message = "implausible boarding count"))]
    pub passengers_in: u32,
    /// Passengers that alighted since the previous report.
    #[validate(range(max = 1000, message = "implausible alighting count"))]
    pub passengers_out: u32,
    /// Device-side timestamp of the observation.
    pub timestamp: DateTime<Utc>,
}

/// A recorded telemetry sample, kept for the per-bus history endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerData {
    /// Bus the sample belongs to.
    pub bus_id: String,
    /// Boardings reported in this sample.
    pub passengers_in: u32,
    /// Alightings reported in this sample.
    pub passengers_out: u32,
    /// Bus occupancy after applying the sample.
    pub occupancy_after: u32,
    /// Device-side timestamp.
    pub timestamp: DateTime<Utc>,
    /// Server-side ingest time.
    pub recorded_at: DateTime<Utc>,
}
