//! Dashboard aggregate statistics.

use axum::Json;
use axum::extract::State;

use fleetpulse_entity::alert::AlertSeverity;

use crate::dto::response::DashboardStats;
use crate::state::AppState;

/// GET /api/dashboard/stats
pub async fn stats(State(state): State<AppState>) -> Json<DashboardStats> {
    let buses = state.fleet.buses.active();
    let stations = state.fleet.stations.active();
    let unread = state.fleet.alerts.unread();

    let total_passengers: u32 = buses.iter().map(|b| b.current_passengers).sum();
    let total_capacity: u32 = buses.iter().map(|b| b.capacity).sum();
    let average_occupancy = if total_capacity > 0 {
        ((total_passengers as f64 / total_capacity as f64) * 100.0).round() as u32
    } else {
        0
    };

    Json(DashboardStats {
        total_passengers,
        active_buses: buses.len(),
        active_buses_running: buses.iter().filter(|b| b.status == "running").count(),
        average_occupancy,
        critical_alerts: unread
            .iter()
            .filter(|a| a.severity == AlertSeverity::Critical)
            .count(),
        total_alerts: unread.len(),
        active_stations: stations.len(),
    })
}
