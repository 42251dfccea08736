use async_trait::async_trait;
use tracing::{debug, instrument};

use super::models::GrowthData;
use crate::shared::AppError;
use crate::store::{db_error, MemoryTx, PgTx};

/// Trait for growth history repository operations
#[async_trait]
pub trait GrowthRepository: Send {
    /// The most recently appended point
    async fn latest_growth_point(&mut self) -> Result<Option<GrowthData>, AppError>;
    async fn append_growth_point(&mut self, point: &GrowthData) -> Result<GrowthData, AppError>;

    /// Points whose timestamp is at or after `since`, in insertion order
    async fn list_growth_since(&mut self, since: &str) -> Result<Vec<GrowthData>, AppError>;
}

#[async_trait]
impl GrowthRepository for MemoryTx {
    async fn latest_growth_point(&mut self) -> Result<Option<GrowthData>, AppError> {
        Ok(self.working.growth.iter().max_by_key(|g| g.id).cloned())
    }

    #[instrument(skip(self, point), fields(points = point.points, maps = point.maps))]
    async fn append_growth_point(&mut self, point: &GrowthData) -> Result<GrowthData, AppError> {
        self.check_growth_write()?;

        let mut stored = point.clone();
        stored.id = self.working.next_id();
        self.working.growth.push(stored.clone());
        debug!(growth_id = stored.id, "Growth point appended in memory");
        Ok(stored)
    }

    async fn list_growth_since(&mut self, since: &str) -> Result<Vec<GrowthData>, AppError> {
        let mut points: Vec<GrowthData> = self
            .working
            .growth
            .iter()
            .filter(|g| g.timestamp.as_str() >= since)
            .cloned()
            .collect();
        points.sort_by_key(|g| g.id);
        Ok(points)
    }
}

#[async_trait]
impl GrowthRepository for PgTx {
    async fn latest_growth_point(&mut self) -> Result<Option<GrowthData>, AppError> {
        sqlx::query_as::<_, GrowthData>(
            "SELECT id, hours, points, maps, runner, map_name, map_points, timestamp \
             FROM growth_data ORDER BY id DESC LIMIT 1",
        )
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(db_error("load latest growth point"))
    }

    #[instrument(skip(self, point), fields(points = point.points, maps = point.maps))]
    async fn append_growth_point(&mut self, point: &GrowthData) -> Result<GrowthData, AppError> {
        let stored = sqlx::query_as::<_, GrowthData>(
            "INSERT INTO growth_data (hours, points, maps, runner, map_name, map_points, timestamp) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id, hours, points, maps, runner, map_name, map_points, timestamp",
        )
        .bind(point.hours)
        .bind(point.points)
        .bind(point.maps)
        .bind(&point.runner)
        .bind(&point.map_name)
        .bind(point.map_points)
        .bind(&point.timestamp)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(db_error("append growth point"))?;

        debug!(growth_id = stored.id, "Growth point appended in database");
        Ok(stored)
    }

    async fn list_growth_since(&mut self, since: &str) -> Result<Vec<GrowthData>, AppError> {
        sqlx::query_as::<_, GrowthData>(
            "SELECT id, hours, points, maps, runner, map_name, map_points, timestamp \
             FROM growth_data WHERE timestamp >= $1 ORDER BY id ASC",
        )
        .bind(since)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(db_error("list growth points"))
    }
}
