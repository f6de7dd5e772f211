//! # fleetpulse-video
//!
//! The video-analysis core of FleetPulse. Owns the set of in-flight and
//! completed video-analysis jobs, spawns and monitors one external
//! passenger-counting worker per job, decodes the worker's line-oriented
//! progress protocol, and publishes per-line progress and terminal
//! completion events through the broadcast hub.

pub mod decoder;
pub mod registry;
pub mod supervisor;

pub use decoder::{CounterUpdate, decode_line};
pub use registry::JobRegistry;
pub use supervisor::ProcessSupervisor;
