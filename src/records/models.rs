use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use strum_macros::{Display, EnumIter};

/// Lifecycle stage of a map record, stored and serialized as 0/1/2
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
    sqlx::Type,
)]
#[serde(into = "i16", try_from = "i16")]
#[repr(i16)]
pub enum MapStatus {
    #[default]
    Incomplete = 0,
    InProgress = 1,
    Completed = 2,
}

impl From<MapStatus> for i16 {
    fn from(status: MapStatus) -> Self {
        status as i16
    }
}

impl TryFrom<i16> for MapStatus {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(MapStatus::Incomplete),
            1 => Ok(MapStatus::InProgress),
            2 => Ok(MapStatus::Completed),
            other => Err(format!("invalid map status {}", other)),
        }
    }
}

/// Database model for the map_records table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct MapRecord {
    pub id: i64,
    pub difficulty: String,
    pub map_name: String,
    pub runner: String, // Free text, may credit several players ("A & B")
    pub score: i32,     // Points actually awarded
    pub points: i32,    // Nominal value of the map
    pub stars: i32,
    pub note: String,
    pub status: MapStatus,
    pub finish_time: Option<DateTime<Utc>>,
    pub has_dummy: bool,
}

impl MapRecord {
    pub fn is_completed(&self) -> bool {
        self.status == MapStatus::Completed
    }
}
