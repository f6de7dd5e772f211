//! Route handlers organized by domain.

pub mod activity;
pub mod alert;
pub mod bus;
pub mod dashboard;
pub mod health;
pub mod passenger;
pub mod station;
pub mod video;
pub mod ws;
