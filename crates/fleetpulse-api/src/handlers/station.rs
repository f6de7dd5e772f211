//! Station endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use validator::Validate;

use fleetpulse_entity::station::{CreateStation, Station};
use fleetpulse_realtime::BroadcastMessage;

use crate::error::{ApiError, validation_failed};
use crate::state::AppState;

/// GET /api/stations
pub async fn list_stations(State(state): State<AppState>) -> Json<Vec<Station>> {
    Json(state.fleet.stations.all())
}

/// GET /api/stations/active
pub async fn list_active_stations(State(state): State<AppState>) -> Json<Vec<Station>> {
    Json(state.fleet.stations.active())
}

/// POST /api/stations
pub async fn create_station(
    State(state): State<AppState>,
    Json(payload): Json<CreateStation>,
) -> Result<(StatusCode, Json<Station>), ApiError> {
    payload
        .validate()
        .map_err(|e| validation_failed("Invalid station data", e))?;

    let station = state.fleet.create_station(payload);
    state
        .hub
        .publish(&BroadcastMessage::StationCreated(station.clone()));

    Ok((StatusCode::CREATED, Json(station)))
}
