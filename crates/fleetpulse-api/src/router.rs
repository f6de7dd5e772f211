//! Route definitions for the FleetPulse HTTP API.
//!
//! All REST routes are organized by domain and mounted under `/api`; the
//! WebSocket upgrade lives at `/ws`. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_upload_size_bytes as usize;

    let api_routes = Router::new()
        .merge(bus_routes())
        .merge(station_routes())
        .merge(passenger_routes())
        .merge(alert_routes())
        .merge(activity_routes())
        .merge(dashboard_routes())
        .merge(video_routes())
        .merge(health_routes());

    let ws_routes = Router::new().route("/ws", get(handlers::ws::ws_upgrade));

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .merge(ws_routes)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bus fleet endpoints
fn bus_routes() -> Router<AppState> {
    Router::new()
        .route("/buses", get(handlers::bus::list_buses))
        .route("/buses", post(handlers::bus::create_bus))
        .route("/buses/active", get(handlers::bus::list_active_buses))
        .route("/buses/{id}", get(handlers::bus::get_bus))
}

/// Station endpoints
fn station_routes() -> Router<AppState> {
    Router::new()
        .route("/stations", get(handlers::station::list_stations))
        .route("/stations", post(handlers::station::create_station))
        .route(
            "/stations/active",
            get(handlers::station::list_active_stations),
        )
}

/// Passenger telemetry ingest and history
fn passenger_routes() -> Router<AppState> {
    Router::new()
        .route("/passenger-data", post(handlers::passenger::ingest_update))
        .route(
            "/passenger-data/bus/{busId}",
            get(handlers::passenger::data_for_bus),
        )
        .route(
            "/passenger-data/recent",
            get(handlers::passenger::recent_data),
        )
}

/// Alert list and acknowledgement
fn alert_routes() -> Router<AppState> {
    Router::new()
        .route("/alerts", get(handlers::alert::list_alerts))
        .route("/alerts/unread", get(handlers::alert::list_unread_alerts))
        .route("/alerts/{id}/read", patch(handlers::alert::mark_alert_read))
}

/// Activity feed
fn activity_routes() -> Router<AppState> {
    Router::new()
        .route("/activity", get(handlers::activity::recent_activity))
        .route(
            "/activity/bus/{busId}",
            get(handlers::activity::activity_for_bus),
        )
}

/// Dashboard aggregates
fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/dashboard/stats", get(handlers::dashboard::stats))
}

/// Video job surface: upload, start, sample run, status
fn video_routes() -> Router<AppState> {
    Router::new()
        .route("/video/upload", post(handlers::video::upload))
        .route(
            "/video/process/{jobId}",
            post(handlers::video::start_processing),
        )
        .route(
            "/video/process-sample",
            post(handlers::video::process_sample),
        )
        .route("/video/status/{jobId}", get(handlers::video::job_status))
}

/// Liveness
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// CORS layer driven by the server configuration.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::{HeaderValue, Method};
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(cors_config.max_age_seconds));

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    cors
}
