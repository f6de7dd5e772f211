//! Bus repository.

use chrono::Utc;
use dashmap::DashMap;

use fleetpulse_core::{AppError, AppResult};
use fleetpulse_entity::bus::{Bus, CreateBus};
use fleetpulse_entity::passenger::PassengerCountUpdate;

/// In-memory bus repository keyed by fleet id.
#[derive(Debug, Default)]
pub struct BusStore {
    buses: DashMap<String, Bus>,
}

impl BusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All buses, ordered by fleet id.
    pub fn all(&self) -> Vec<Bus> {
        let mut buses: Vec<Bus> = self.buses.iter().map(|e| e.value().clone()).collect();
        buses.sort_by(|a, b| a.id.cmp(&b.id));
        buses
    }

    /// Buses currently part of the active fleet, ordered by fleet id.
    pub fn active(&self) -> Vec<Bus> {
        let mut buses: Vec<Bus> = self
            .buses
            .iter()
            .filter(|e| e.value().is_active)
            .map(|e| e.value().clone())
            .collect();
        buses.sort_by(|a, b| a.id.cmp(&b.id));
        buses
    }

    pub fn get(&self, id: &str) -> Option<Bus> {
        self.buses.get(id).map(|e| e.value().clone())
    }

    /// Register a new bus. The fleet id must be unused.
    pub fn create(&self, payload: CreateBus) -> AppResult<Bus> {
        if self.buses.contains_key(&payload.id) {
            return Err(AppError::conflict(format!(
                "Bus already registered: {}",
                payload.id
            )));
        }
        let bus = Bus {
            id: payload.id.clone(),
            route: payload.route,
            capacity: payload.capacity,
            current_passengers: 0,
            status: "stopped".to_string(),
            is_active: true,
            last_update: Utc::now(),
        };
        self.buses.insert(payload.id, bus.clone());
        Ok(bus)
    }

    /// Insert a bus as-is, replacing any existing record. Used by seeding.
    pub fn put(&self, bus: Bus) {
        self.buses.insert(bus.id.clone(), bus);
    }

    /// Apply a telemetry update to the bus's occupancy.
    ///
    /// Boardings and alightings are deltas; occupancy saturates at zero
    /// and is capped at capacity. Returns the updated snapshot, or `None`
    /// for an unknown bus.
    pub fn apply_update(&self, update: &PassengerCountUpdate) -> Option<Bus> {
        let mut entry = self.buses.get_mut(&update.bus_id)?;
        let bus = entry.value_mut();
        let occupancy = bus
            .current_passengers
            .saturating_add(update.passengers_in)
            .saturating_sub(update.passengers_out);
        bus.current_passengers = occupancy.min(bus.capacity);
        bus.last_update = Utc::now();
        Some(bus.clone())
    }
}
