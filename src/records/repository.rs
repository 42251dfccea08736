use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, instrument, warn};

use super::models::{MapRecord, MapStatus};
use crate::shared::AppError;
use crate::store::{db_error, MemoryTx, PgTx};

const RECORD_COLUMNS: &str =
    "id, difficulty, map_name, runner, score, points, stars, note, status, finish_time, has_dummy";

/// Trait for map record repository operations
#[async_trait]
pub trait RecordRepository: Send {
    /// Finds a record for the map at this difficulty whose status differs from `exclude_status`
    async fn find_record(
        &mut self,
        map_name: &str,
        difficulty: &str,
        exclude_status: MapStatus,
    ) -> Result<Option<MapRecord>, AppError>;

    /// Inserts a record and returns it with its assigned id
    async fn insert_record(&mut self, record: &MapRecord) -> Result<MapRecord, AppError>;
    async fn update_record(&mut self, record: &MapRecord) -> Result<(), AppError>;

    /// All records, optionally restricted to one difficulty, highest score first
    async fn list_records(&mut self, difficulty: Option<&str>) -> Result<Vec<MapRecord>, AppError>;

    /// Records of a difficulty that are not completed yet, by map name
    async fn list_open_records(&mut self, difficulty: &str) -> Result<Vec<MapRecord>, AppError>;

    async fn sum_points(&mut self, status: MapStatus) -> Result<i64, AppError>;
    async fn count_records(&mut self, status: MapStatus) -> Result<i64, AppError>;

    /// Finish time of the first completion ever recorded
    async fn earliest_completed_finish_time(&mut self) -> Result<Option<DateTime<Utc>>, AppError>;
}

#[async_trait]
impl RecordRepository for MemoryTx {
    #[instrument(skip(self))]
    async fn find_record(
        &mut self,
        map_name: &str,
        difficulty: &str,
        exclude_status: MapStatus,
    ) -> Result<Option<MapRecord>, AppError> {
        let record = self
            .working
            .records
            .iter()
            .filter(|r| {
                r.map_name == map_name && r.difficulty == difficulty && r.status != exclude_status
            })
            .min_by_key(|r| r.id)
            .cloned();

        match &record {
            Some(r) => debug!(record_id = r.id, status = %r.status, "Record found in memory"),
            None => debug!("Record not found in memory"),
        }
        Ok(record)
    }

    #[instrument(skip(self, record), fields(map_name = %record.map_name))]
    async fn insert_record(&mut self, record: &MapRecord) -> Result<MapRecord, AppError> {
        self.check_record_write()?;

        let mut stored = record.clone();
        stored.id = self.working.next_id();
        self.working.records.push(stored.clone());

        debug!(record_id = stored.id, "Record inserted in memory");
        Ok(stored)
    }

    #[instrument(skip(self, record), fields(record_id = record.id))]
    async fn update_record(&mut self, record: &MapRecord) -> Result<(), AppError> {
        self.check_record_write()?;

        match self.working.records.iter_mut().find(|r| r.id == record.id) {
            Some(stored) => {
                *stored = record.clone();
                debug!("Record updated in memory");
                Ok(())
            }
            None => {
                warn!("Record not found for update in memory");
                Err(AppError::NotFound("Map record not found".to_string()))
            }
        }
    }

    async fn list_records(&mut self, difficulty: Option<&str>) -> Result<Vec<MapRecord>, AppError> {
        let mut records: Vec<MapRecord> = self
            .working
            .records
            .iter()
            .filter(|r| difficulty.map_or(true, |d| r.difficulty == d))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.score.cmp(&a.score).then(a.id.cmp(&b.id)));
        Ok(records)
    }

    async fn list_open_records(&mut self, difficulty: &str) -> Result<Vec<MapRecord>, AppError> {
        let mut records: Vec<MapRecord> = self
            .working
            .records
            .iter()
            .filter(|r| r.difficulty == difficulty && !r.is_completed())
            .cloned()
            .collect();
        records.sort_by(|a, b| a.map_name.cmp(&b.map_name).then(a.id.cmp(&b.id)));
        Ok(records)
    }

    async fn sum_points(&mut self, status: MapStatus) -> Result<i64, AppError> {
        Ok(self
            .working
            .records
            .iter()
            .filter(|r| r.status == status)
            .map(|r| i64::from(r.points))
            .sum())
    }

    async fn count_records(&mut self, status: MapStatus) -> Result<i64, AppError> {
        Ok(self
            .working
            .records
            .iter()
            .filter(|r| r.status == status)
            .count() as i64)
    }

    async fn earliest_completed_finish_time(&mut self) -> Result<Option<DateTime<Utc>>, AppError> {
        Ok(self
            .working
            .records
            .iter()
            .filter(|r| r.is_completed())
            .filter_map(|r| r.finish_time)
            .min())
    }
}

#[async_trait]
impl RecordRepository for PgTx {
    #[instrument(skip(self))]
    async fn find_record(
        &mut self,
        map_name: &str,
        difficulty: &str,
        exclude_status: MapStatus,
    ) -> Result<Option<MapRecord>, AppError> {
        debug!("Fetching record from database");

        let query = format!(
            "SELECT {} FROM map_records WHERE map_name = $1 AND difficulty = $2 AND status <> $3 \
             ORDER BY id ASC LIMIT 1 FOR UPDATE",
            RECORD_COLUMNS
        );
        let record = sqlx::query_as::<_, MapRecord>(&query)
            .bind(map_name)
            .bind(difficulty)
            .bind(exclude_status)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(db_error("find map record"))?;

        Ok(record)
    }

    #[instrument(skip(self, record), fields(map_name = %record.map_name))]
    async fn insert_record(&mut self, record: &MapRecord) -> Result<MapRecord, AppError> {
        let query = format!(
            "INSERT INTO map_records \
             (difficulty, map_name, runner, score, points, stars, note, status, finish_time, has_dummy) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {}",
            RECORD_COLUMNS
        );
        let stored = sqlx::query_as::<_, MapRecord>(&query)
            .bind(&record.difficulty)
            .bind(&record.map_name)
            .bind(&record.runner)
            .bind(record.score)
            .bind(record.points)
            .bind(record.stars)
            .bind(&record.note)
            .bind(record.status)
            .bind(record.finish_time)
            .bind(record.has_dummy)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(db_error("insert map record"))?;

        debug!(record_id = stored.id, "Record inserted in database");
        Ok(stored)
    }

    #[instrument(skip(self, record), fields(record_id = record.id))]
    async fn update_record(&mut self, record: &MapRecord) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE map_records SET difficulty = $2, map_name = $3, runner = $4, score = $5, \
             points = $6, stars = $7, note = $8, status = $9, finish_time = $10, has_dummy = $11 \
             WHERE id = $1",
        )
        .bind(record.id)
        .bind(&record.difficulty)
        .bind(&record.map_name)
        .bind(&record.runner)
        .bind(record.score)
        .bind(record.points)
        .bind(record.stars)
        .bind(&record.note)
        .bind(record.status)
        .bind(record.finish_time)
        .bind(record.has_dummy)
        .execute(&mut *self.tx)
        .await
        .map_err(db_error("update map record"))?;

        if result.rows_affected() == 0 {
            warn!("Record not found for update");
            return Err(AppError::NotFound("Map record not found".to_string()));
        }

        debug!("Record updated in database");
        Ok(())
    }

    async fn list_records(&mut self, difficulty: Option<&str>) -> Result<Vec<MapRecord>, AppError> {
        let query = format!(
            "SELECT {} FROM map_records WHERE ($1::TEXT IS NULL OR difficulty = $1) \
             ORDER BY score DESC, id ASC",
            RECORD_COLUMNS
        );
        sqlx::query_as::<_, MapRecord>(&query)
            .bind(difficulty)
            .fetch_all(&mut *self.tx)
            .await
            .map_err(db_error("list map records"))
    }

    async fn list_open_records(&mut self, difficulty: &str) -> Result<Vec<MapRecord>, AppError> {
        let query = format!(
            "SELECT {} FROM map_records WHERE difficulty = $1 AND status <> $2 \
             ORDER BY map_name ASC, id ASC",
            RECORD_COLUMNS
        );
        sqlx::query_as::<_, MapRecord>(&query)
            .bind(difficulty)
            .bind(MapStatus::Completed)
            .fetch_all(&mut *self.tx)
            .await
            .map_err(db_error("list open map records"))
    }

    async fn sum_points(&mut self, status: MapStatus) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(points), 0)::BIGINT FROM map_records WHERE status = $1",
        )
        .bind(status)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(db_error("sum map points"))
    }

    async fn count_records(&mut self, status: MapStatus) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM map_records WHERE status = $1")
            .bind(status)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(db_error("count map records"))
    }

    async fn earliest_completed_finish_time(&mut self) -> Result<Option<DateTime<Utc>>, AppError> {
        sqlx::query_scalar::<_, Option<DateTime<Utc>>>(
            "SELECT MIN(finish_time) FROM map_records WHERE status = $1 AND finish_time IS NOT NULL",
        )
        .bind(MapStatus::Completed)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(db_error("find first completion"))
    }
}
