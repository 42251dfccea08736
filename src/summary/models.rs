use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database model for the summaries table; the newest row is the current one
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Summary {
    pub id: i64,
    pub current_score: i64, // Sum of nominal points over completed maps
    pub target_score: i64,
    pub completed_maps: i64,
    pub last_update: DateTime<Utc>,
}

impl Summary {
    pub fn new(target_score: i64, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            current_score: 0,
            target_score,
            completed_maps: 0,
            last_update: now,
        }
    }
}
