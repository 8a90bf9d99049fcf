use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::turn::Turn;

/// The durable artifact of a finished session. Written exactly once at
/// finalize time, immutable thereafter; only ever read or bulk-deleted.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRecord {
    pub id: Uuid,
    pub user_id: String,
    pub session_id: String,
    pub short_summary: String,
    pub long_summary: String,
    pub mood_percentage: i32,
    /// Full ordered chat log, preserved for audit/export after the live
    /// transcript is deleted.
    pub chatlog: Vec<Turn>,
    pub created_at: DateTime<Utc>,
}
