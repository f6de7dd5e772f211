//! Activity log endpoints.

use axum::Json;
use axum::extract::{Path, Query, State};

use fleetpulse_entity::activity::ActivityEntry;

use crate::dto::request::LimitQuery;
use crate::state::AppState;

/// Default page size for the activity feed.
const DEFAULT_LIMIT: usize = 50;

/// GET /api/activity?limit=50
pub async fn recent_activity(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Json<Vec<ActivityEntry>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    Json(state.fleet.activity.recent(limit))
}

/// GET /api/activity/bus/{busId}
pub async fn activity_for_bus(
    State(state): State<AppState>,
    Path(bus_id): Path<String>,
) -> Json<Vec<ActivityEntry>> {
    Json(state.fleet.activity.for_bus(&bus_id))
}
