//! Alert endpoints.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use fleetpulse_core::error::AppError;
use fleetpulse_entity::alert::Alert;
use fleetpulse_realtime::message::AlertReadEvent;
use fleetpulse_realtime::BroadcastMessage;

use crate::dto::response::SuccessResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/alerts
pub async fn list_alerts(State(state): State<AppState>) -> Json<Vec<Alert>> {
    Json(state.fleet.alerts.all())
}

/// GET /api/alerts/unread
pub async fn list_unread_alerts(State(state): State<AppState>) -> Json<Vec<Alert>> {
    Json(state.fleet.alerts.unread())
}

/// PATCH /api/alerts/{id}/read
pub async fn mark_alert_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SuccessResponse>, ApiError> {
    if !state.fleet.alerts.mark_read(id) {
        return Err(AppError::not_found("Alert not found").into());
    }

    state
        .hub
        .publish(&BroadcastMessage::AlertMarkedRead(AlertReadEvent {
            alert_id: id,
        }));

    Ok(Json(SuccessResponse { success: true }))
}
