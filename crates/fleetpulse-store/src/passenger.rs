//! Passenger telemetry history.

use std::sync::RwLock;

use chrono::{Duration, Utc};

use fleetpulse_entity::passenger::PassengerData;

/// Appended telemetry samples, bounded to the most recent entries.
const MAX_SAMPLES: usize = 10_000;

/// Rolling log of accepted telemetry samples.
#[derive(Debug, Default)]
pub struct PassengerLog {
    samples: RwLock<Vec<PassengerData>>,
}

impl PassengerLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, sample: PassengerData) {
        let mut samples = self
            .samples
            .write()
            .unwrap_or_else(|p| p.into_inner());
        samples.push(sample);
        if samples.len() > MAX_SAMPLES {
            let excess = samples.len() - MAX_SAMPLES;
            samples.drain(..excess);
        }
    }

    /// Samples for one bus, newest first.
    pub fn for_bus(&self, bus_id: &str) -> Vec<PassengerData> {
        let samples = self.samples.read().unwrap_or_else(|p| p.into_inner());
        samples
            .iter()
            .rev()
            .filter(|s| s.bus_id == bus_id)
            .cloned()
            .collect()
    }

    /// Samples recorded within the last `hours` hours, newest first.
    pub fn recent(&self, hours: i64) -> Vec<PassengerData> {
        let cutoff = Utc::now() - Duration::hours(hours);
        let samples = self.samples.read().unwrap_or_else(|p| p.into_inner());
        samples
            .iter()
            .rev()
            .filter(|s| s.recorded_at >= cutoff)
            .cloned()
            .collect()
    }
}
