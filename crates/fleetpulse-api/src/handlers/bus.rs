//! Bus endpoints.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use validator::Validate;

use fleetpulse_core::error::AppError;
use fleetpulse_entity::bus::{Bus, CreateBus};
use fleetpulse_realtime::BroadcastMessage;

use crate::error::{ApiError, validation_failed};
use crate::state::AppState;

/// GET /api/buses
pub async fn list_buses(State(state): State<AppState>) -> Json<Vec<Bus>> {
    Json(state.fleet.buses.all())
}

/// GET /api/buses/active
pub async fn list_active_buses(State(state): State<AppState>) -> Json<Vec<Bus>> {
    Json(state.fleet.buses.active())
}

/// GET /api/buses/{id}
pub async fn get_bus(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Bus>, ApiError> {
    let bus = state
        .fleet
        .buses
        .get(&id)
        .ok_or_else(|| AppError::not_found("Bus not found"))?;
    Ok(Json(bus))
}

/// POST /api/buses
pub async fn create_bus(
    State(state): State<AppState>,
    Json(payload): Json<CreateBus>,
) -> Result<(StatusCode, Json<Bus>), ApiError> {
    payload
        .validate()
        .map_err(|e| validation_failed("Invalid bus data", e))?;

    let bus = state.fleet.create_bus(payload)?;
    state.hub.publish(&BroadcastMessage::BusCreated(bus.clone()));

    Ok((StatusCode::CREATED, Json(bus)))
}
