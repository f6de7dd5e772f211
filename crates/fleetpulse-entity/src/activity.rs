//! Activity log entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One entry in the rolling fleet activity log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    /// Unique entry identifier.
    pub id: Uuid,
    /// Bus the entry relates to, if any.
    pub bus_id: Option<String>,
    /// Entry text.
    pub message: String,
    /// When the entry was recorded.
    pub created_at: DateTime<Utc>,
}
