//! # fleetpulse-core
//!
//! Core crate for FleetPulse. Contains configuration schemas and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other FleetPulse crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
