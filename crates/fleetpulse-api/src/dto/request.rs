//! Request DTOs and query parameter shapes.

use serde::Deserialize;

/// Body for `POST /api/video/process-sample`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSampleRequest {
    /// Bus to attribute the sample run to.
    pub bus_id: Option<String>,
}

/// Query parameters for `GET /api/passenger-data/recent`.
#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    /// Look-back window in hours.
    pub hours: Option<i64>,
}

/// Query parameters for `GET /api/activity`.
#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    /// Maximum number of entries to return.
    pub limit: Option<usize>,
}
