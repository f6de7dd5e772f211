//! Station entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A bus station monitored by the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    /// Unique station identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Human-readable location.
    pub location: String,
    /// Passengers currently waiting at the station.
    pub waiting_passengers: u32,
    /// Whether the station is in service.
    pub is_active: bool,
    /// Last telemetry update.
    pub last_update: DateTime<Utc>,
}

/// Payload for registering a new station.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStation {
    /// Display name.
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    /// Human-readable location.
    #[validate(length(min = 1, message = "location must not be empty"))]
    pub location: String,
}
