//! Alert repository.

use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use fleetpulse_entity::alert::{Alert, AlertSeverity};

/// In-memory alert repository keyed by alert id.
#[derive(Debug, Default)]
pub struct AlertStore {
    alerts: DashMap<Uuid, Alert>,
}

impl AlertStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All alerts, newest first.
    pub fn all(&self) -> Vec<Alert> {
        let mut alerts: Vec<Alert> = self.alerts.iter().map(|e| e.value().clone()).collect();
        alerts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        alerts
    }

    /// Unacknowledged alerts, newest first.
    pub fn unread(&self) -> Vec<Alert> {
        let mut alerts: Vec<Alert> = self
            .alerts
            .iter()
            .filter(|e| !e.value().is_read)
            .map(|e| e.value().clone())
            .collect();
        alerts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        alerts
    }

    /// Raise a new alert for a bus.
    pub fn raise(
        &self,
        bus_id: impl Into<String>,
        message: impl Into<String>,
        severity: AlertSeverity,
    ) -> Alert {
        let alert = Alert {
            id: Uuid::new_v4(),
            bus_id: bus_id.into(),
            message: message.into(),
            severity,
            is_read: false,
            created_at: Utc::now(),
        };
        self.alerts.insert(alert.id, alert.clone());
        alert
    }

    /// Whether the bus already has an unacknowledged alert of this severity.
    pub fn has_unread_for(&self, bus_id: &str, severity: AlertSeverity) -> bool {
        self.alerts
            .iter()
            .any(|e| !e.value().is_read && e.value().severity == severity && e.value().bus_id == bus_id)
    }

    /// Acknowledge an alert. Returns `false` for an unknown id.
    pub fn mark_read(&self, id: Uuid) -> bool {
        match self.alerts.get_mut(&id) {
            Some(mut entry) => {
                entry.value_mut().is_read = true;
                true
            }
            None => false,
        }
    }
}
