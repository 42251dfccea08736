use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Role given to players created through score attribution
pub const DEFAULT_ROLE: &str = "PLAYER";

/// Database model for the players table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Player {
    pub id: i64,
    pub name: String, // Unique, case-sensitive, trimmed
    pub role: String,
    #[serde(rename = "score_contrib")]
    pub score_contribution: f64,
    pub map_count: i32,
    pub contribution_rate: f64, // Maintained outside the tracker, carried through untouched
}

impl Player {
    /// Creates an unsaved player credited with its first map
    pub fn first_attribution(name: &str, score: i32) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            role: DEFAULT_ROLE.to_string(),
            score_contribution: f64::from(score),
            map_count: 1,
            contribution_rate: 0.0,
        }
    }

    /// Adds one more completed map worth `score`
    pub fn credit(&mut self, score: i32) {
        self.score_contribution += f64::from(score);
        self.map_count += 1;
    }
}
