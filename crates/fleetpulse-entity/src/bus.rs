//! Bus entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A monitored bus in the fleet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bus {
    /// Fleet identifier, e.g. `"BUS-007"`.
    pub id: String,
    /// Route description shown on the dashboard.
    pub route: String,
    /// Seated + standing capacity.
    pub capacity: u32,
    /// Current passenger count, updated from telemetry.
    pub current_passengers: u32,
    /// Operational status: `"running"`, `"stopped"`, `"maintenance"`.
    pub status: String,
    /// Whether the bus is part of the active fleet.
    pub is_active: bool,
    /// When the bus last reported telemetry.
    pub last_update: DateTime<Utc>,
}

impl Bus {
    /// Occupancy as a percentage of capacity.
    pub fn occupancy_percent(&self) -> u32 {
        if self.capacity == 0 {
            return 0;
        }
        (self.current_passengers * 100) / self.capacity
    }
}

/// Payload for registering a new bus.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBus {
    /// Fleet identifier.
    #[validate(length(min = 1, message = "bus id must not be empty"))]
    pub id: String,
    /// Route description.
    #[validate(length(min = 1, message = "route must not be empty"))]
    pub route: String,
    /// Passenger capacity.
    #[validate(range(min = 1, message = "capacity must be positive"))]
    pub capacity: u32,
}
