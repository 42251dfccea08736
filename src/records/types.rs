use serde::Deserialize;

use super::models::{MapRecord, MapStatus};
use crate::shared::AppError;

/// Highest star rating a map can carry
pub const MAX_STARS: i32 = 5;

/// Request payload for `POST /records`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordSubmission {
    pub difficulty: String,
    pub map_name: String,
    #[serde(default)]
    pub runner: String,
    #[serde(default)]
    pub score: i32,
    #[serde(default)]
    pub points: i32,
    #[serde(default)]
    pub stars: i32,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub status: i16,
    #[serde(default)]
    pub has_dummy: bool,
}

impl RecordSubmission {
    /// Validates the payload and turns it into an unsaved record.
    ///
    /// The status carried by the result is only the caller's hint; the
    /// lifecycle rules decide the real one before anything is persisted.
    pub fn into_candidate(self) -> Result<MapRecord, AppError> {
        let difficulty = self.difficulty.trim();
        if difficulty.is_empty() {
            return Err(AppError::Validation("difficulty is required".to_string()));
        }

        let map_name = self.map_name.trim();
        if map_name.is_empty() {
            return Err(AppError::Validation("map_name is required".to_string()));
        }

        if self.score < 0 {
            return Err(AppError::Validation(
                "score must not be negative".to_string(),
            ));
        }
        if self.points < 0 {
            return Err(AppError::Validation(
                "points must not be negative".to_string(),
            ));
        }
        if !(0..=MAX_STARS).contains(&self.stars) {
            return Err(AppError::Validation(format!(
                "stars must be between 0 and {}",
                MAX_STARS
            )));
        }

        let status = MapStatus::try_from(self.status).map_err(AppError::Validation)?;

        Ok(MapRecord {
            id: 0,
            difficulty: difficulty.to_string(),
            map_name: map_name.to_string(),
            runner: self.runner,
            score: self.score,
            points: self.points,
            stars: self.stars,
            note: self.note,
            status,
            finish_time: None,
            has_dummy: self.has_dummy,
        })
    }
}

/// Query string for `GET /maps` and `GET /map-options`
#[derive(Debug, Default, Deserialize)]
pub struct MapQuery {
    pub difficulty: Option<String>,
}

/// Result of a catalog import: maps read from the catalog and records
/// actually inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub parsed: usize,
    pub inserted: usize,
}
