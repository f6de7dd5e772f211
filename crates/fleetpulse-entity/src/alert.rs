//! Alert entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Severity of a fleet alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    /// Informational, no operator action needed.
    Info,
    /// Degraded condition worth watching.
    Warning,
    /// Requires operator attention.
    Critical,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// An operator-facing alert raised for a bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Unique alert identifier.
    pub id: Uuid,
    /// Bus the alert concerns.
    pub bus_id: String,
    /// Alert text shown on the dashboard.
    pub message: String,
    /// Severity level.
    pub severity: AlertSeverity,
    /// Whether an operator has acknowledged the alert.
    pub is_read: bool,
    /// When the alert was raised.
    pub created_at: DateTime<Utc>,
}
