//! Station repository.

use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use fleetpulse_entity::station::{CreateStation, Station};

/// In-memory station repository keyed by station id.
#[derive(Debug, Default)]
pub struct StationStore {
    stations: DashMap<Uuid, Station>,
}

impl StationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All stations, ordered by name.
    pub fn all(&self) -> Vec<Station> {
        let mut stations: Vec<Station> =
            self.stations.iter().map(|e| e.value().clone()).collect();
        stations.sort_by(|a, b| a.name.cmp(&b.name));
        stations
    }

    /// Stations currently in service, ordered by name.
    pub fn active(&self) -> Vec<Station> {
        let mut stations: Vec<Station> = self
            .stations
            .iter()
            .filter(|e| e.value().is_active)
            .map(|e| e.value().clone())
            .collect();
        stations.sort_by(|a, b| a.name.cmp(&b.name));
        stations
    }

    pub fn create(&self, payload: CreateStation) -> Station {
        let station = Station {
            id: Uuid::new_v4(),
            name: payload.name,
            location: payload.location,
            waiting_passengers: 0,
            is_active: true,
            last_update: Utc::now(),
        };
        self.stations.insert(station.id, station.clone());
        station
    }

    /// Insert a station as-is. Used by seeding.
    pub fn put(&self, station: Station) {
        self.stations.insert(station.id, station);
    }
}
