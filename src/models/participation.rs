// src/models/participation.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'quiz_participants' table: one row per evaluated attempt.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantEntry {
    pub uid: String,
    pub display_name: String,
    pub score: f64,
    pub participated_at: chrono::DateTime<chrono::Utc>,
}

/// Query parameters for listing a quiz's participants.
#[derive(Debug, Deserialize)]
pub struct ParticipantListParams {
    /// Number of entries to return (default: 10, max: 100).
    pub limit: Option<i64>,
}

pub const DEFAULT_PARTICIPANT_LIMIT: i64 = 10;
pub const MAX_PARTICIPANT_LIMIT: i64 = 100;

impl ParticipantListParams {
    pub fn effective_limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_PARTICIPANT_LIMIT)
            .clamp(1, MAX_PARTICIPANT_LIMIT)
    }
}
