//! In-memory fleet store.
//!
//! Repositories for buses, stations, alerts, passenger telemetry and the
//! activity log, plus the [`FleetStore`] facade that composes them for
//! cross-cutting operations like telemetry ingest. All state lives in
//! process memory; the HTTP handlers are the only writers.

pub mod activity;
pub mod alert;
pub mod bus;
pub mod fleet;
pub mod passenger;
pub mod station;

pub use activity::ActivityLog;
pub use alert::AlertStore;
pub use bus::BusStore;
pub use fleet::FleetStore;
pub use passenger::PassengerLog;
pub use station::StationStore;
