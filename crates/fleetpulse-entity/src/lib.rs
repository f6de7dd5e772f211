//! # fleetpulse-entity
//!
//! Domain entities for FleetPulse. Pure data types shared by the store,
//! the video-analysis core, the realtime hub, and the HTTP API.

pub mod activity;
pub mod alert;
pub mod bus;
pub mod passenger;
pub mod station;
pub mod video;
