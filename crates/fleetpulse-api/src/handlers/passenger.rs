//! Passenger telemetry endpoints.

use axum::Json;
use axum::extract::{Path, Query, State};
use validator::Validate;

use fleetpulse_core::error::AppError;
use fleetpulse_entity::passenger::{PassengerCountUpdate, PassengerData};
use fleetpulse_realtime::message::PassengerCountEvent;
use fleetpulse_realtime::BroadcastMessage;

use crate::dto::request::RecentQuery;
use crate::dto::response::PassengerUpdateResponse;
use crate::error::{ApiError, validation_failed};
use crate::state::AppState;

/// Default look-back for the recent-telemetry endpoint.
const DEFAULT_RECENT_HOURS: i64 = 24;

/// POST /api/passenger-data
pub async fn ingest_update(
    State(state): State<AppState>,
    Json(update): Json<PassengerCountUpdate>,
) -> Result<Json<PassengerUpdateResponse>, ApiError> {
    update
        .validate()
        .map_err(|e| validation_failed("Invalid passenger data", e))?;

    let bus = state
        .fleet
        .apply_passenger_update(&update)
        .ok_or_else(|| AppError::not_found("Bus not found"))?;

    state
        .hub
        .publish(&BroadcastMessage::PassengerCountUpdated(
            PassengerCountEvent {
                bus: bus.clone(),
                update,
            },
        ));

    Ok(Json(PassengerUpdateResponse { success: true, bus }))
}

/// GET /api/passenger-data/bus/{busId}
pub async fn data_for_bus(
    State(state): State<AppState>,
    Path(bus_id): Path<String>,
) -> Json<Vec<PassengerData>> {
    Json(state.fleet.passengers.for_bus(&bus_id))
}

/// GET /api/passenger-data/recent?hours=24
pub async fn recent_data(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Json<Vec<PassengerData>> {
    let hours = query.hours.unwrap_or(DEFAULT_RECENT_HOURS).max(0);
    Json(state.fleet.passengers.recent(hours))
}
