//! # fleetpulse-realtime
//!
//! Broadcast hub for the FleetPulse dashboard. Tracks connected WebSocket
//! clients and fans event messages out to all of them, best-effort: no
//! replay for late subscribers, no acknowledgment, no retry. A slow or
//! disconnected client never blocks delivery to the others.

pub mod client;
pub mod hub;
pub mod message;

pub use client::{ClientHandle, ClientId};
pub use hub::BroadcastHub;
pub use message::BroadcastMessage;
