use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database model for the growth_data table, one point per progress change
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct GrowthData {
    pub id: i64,
    pub hours: f64, // Elapsed since the first completion
    pub points: i64,
    pub maps: i64,
    pub runner: String,
    pub map_name: String,
    pub map_points: i32,
    pub timestamp: String, // RFC 3339 in UTC, sorts chronologically as text
}

/// Renders a timestamp in the sortable form stored in `GrowthData::timestamp`
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// The submission that triggered a snapshot
#[derive(Debug, Clone, Default)]
pub struct SnapshotEvent {
    pub runner: String,
    pub map_name: String,
    pub map_points: i32,
}
