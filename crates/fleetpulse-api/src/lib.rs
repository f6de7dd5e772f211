//! # fleetpulse-api
//!
//! HTTP API layer for FleetPulse built on Axum.
//!
//! REST endpoints for the fleet dashboard, the video-analysis job
//! surface, the WebSocket upgrade, and the domain-error to HTTP mapping.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
