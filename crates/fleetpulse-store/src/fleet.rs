//! Fleet store facade.
//!
//! Composes the per-entity repositories and implements the operations
//! that touch more than one of them, telemetry ingest in particular.

use chrono::Utc;
use tracing::info;

use fleetpulse_core::AppResult;
use fleetpulse_entity::alert::AlertSeverity;
use fleetpulse_entity::bus::{Bus, CreateBus};
use fleetpulse_entity::passenger::{PassengerCountUpdate, PassengerData};
use fleetpulse_entity::station::{CreateStation, Station};

use crate::{ActivityLog, AlertStore, BusStore, PassengerLog, StationStore};

/// Occupancy percentage at which an overcrowding alert is raised.
const OVERCROWDING_THRESHOLD_PERCENT: u32 = 90;

/// The in-memory state behind the dashboard's fleet endpoints.
#[derive(Debug, Default)]
pub struct FleetStore {
    pub buses: BusStore,
    pub stations: StationStore,
    pub alerts: AlertStore,
    pub passengers: PassengerLog,
    pub activity: ActivityLog,
}

impl FleetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bus and log the registration.
    pub fn create_bus(&self, payload: CreateBus) -> AppResult<Bus> {
        let bus = self.buses.create(payload)?;
        self.activity.record(
            Some(bus.id.clone()),
            format!("Bus {} registered on route {}", bus.id, bus.route),
        );
        info!(bus_id = %bus.id, route = %bus.route, "Bus registered");
        Ok(bus)
    }

    /// Register a station and log the registration.
    pub fn create_station(&self, payload: CreateStation) -> Station {
        let station = self.stations.create(payload);
        self.activity
            .record(None, format!("Station {} opened", station.name));
        info!(station_id = %station.id, name = %station.name, "Station registered");
        station
    }

    /// Ingest an accepted telemetry update.
    ///
    /// Applies the occupancy delta to the bus, records the sample in the
    /// telemetry history, appends an activity entry, and raises a critical
    /// overcrowding alert once occupancy crosses the threshold (at most
    /// one unacknowledged overcrowding alert per bus). Returns `None` for
    /// an unknown bus, leaving all repositories untouched.
    pub fn apply_passenger_update(&self, update: &PassengerCountUpdate) -> Option<Bus> {
        let bus = self.buses.apply_update(update)?;

        self.passengers.record(PassengerData {
            bus_id: bus.id.clone(),
            passengers_in: update.passengers_in,
            passengers_out: update.passengers_out,
            occupancy_after: bus.current_passengers,
            timestamp: update.timestamp,
            recorded_at: Utc::now(),
        });
        self.activity.record(
            Some(bus.id.clone()),
            format!(
                "Bus {}: {} boarded, {} alighted, {} on board",
                bus.id, update.passengers_in, update.passengers_out, bus.current_passengers
            ),
        );

        if bus.occupancy_percent() >= OVERCROWDING_THRESHOLD_PERCENT
            && !self.alerts.has_unread_for(&bus.id, AlertSeverity::Critical)
        {
            let alert = self.alerts.raise(
                bus.id.clone(),
                format!(
                    "Bus {} is overcrowded: {}/{} passengers",
                    bus.id, bus.current_passengers, bus.capacity
                ),
                AlertSeverity::Critical,
            );
            info!(bus_id = %bus.id, alert_id = %alert.id, "Overcrowding alert raised");
        }

        Some(bus)
    }

    /// Populate the store with a small demo fleet so a fresh server has
    /// something to show on the dashboard.
    pub fn seed_demo_fleet(&self) {
        let now = Utc::now();
        for (id, route, capacity, current, status) in [
            ("BUS-001", "Route 12 — Downtown Loop", 50u32, 23u32, "running"),
            ("BUS-002", "Route 7 — Airport Express", 60, 41, "running"),
            ("BUS-003", "Route 3 — University Line", 40, 0, "stopped"),
        ] {
            self.buses.put(Bus {
                id: id.to_string(),
                route: route.to_string(),
                capacity,
                current_passengers: current,
                status: status.to_string(),
                is_active: true,
                last_update: now,
            });
        }
        for (name, location, waiting) in [
            ("Central Terminal", "1 Station Plaza", 18u32),
            ("Airport", "Terminal B Arrivals", 32),
            ("University Gate", "College Ave & 3rd", 7),
        ] {
            self.stations.put(Station {
                id: uuid::Uuid::new_v4(),
                name: name.to_string(),
                location: location.to_string(),
                waiting_passengers: waiting,
                is_active: true,
                last_update: now,
            });
        }
        info!("Seeded demo fleet");
    }
}
