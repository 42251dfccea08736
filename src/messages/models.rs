use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database model for the messages table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    #[serde(rename = "user")]
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
