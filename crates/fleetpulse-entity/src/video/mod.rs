//! Video-analysis job domain entities.

pub mod model;
pub mod status;

pub use model::{CounterField, VideoJob};
pub use status::JobStatus;
