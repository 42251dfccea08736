use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use super::models::Summary;
use crate::shared::AppError;
use crate::store::{db_error, MemoryTx, PgTx};

/// Trait for summary repository operations
#[async_trait]
pub trait SummaryRepository: Send {
    /// The most recently created summary row
    async fn latest_summary(&mut self) -> Result<Option<Summary>, AppError>;

    /// Inserts the summary when its id is 0, otherwise updates it in place
    async fn save_summary(&mut self, summary: &Summary) -> Result<Summary, AppError>;
}

#[async_trait]
impl SummaryRepository for MemoryTx {
    async fn latest_summary(&mut self) -> Result<Option<Summary>, AppError> {
        Ok(self.working.summaries.iter().max_by_key(|s| s.id).cloned())
    }

    #[instrument(skip(self, summary), fields(summary_id = summary.id))]
    async fn save_summary(&mut self, summary: &Summary) -> Result<Summary, AppError> {
        if summary.id == 0 {
            let mut stored = summary.clone();
            stored.id = self.working.next_id();
            self.working.summaries.push(stored.clone());
            debug!(summary_id = stored.id, "Summary created in memory");
            return Ok(stored);
        }

        match self.working.summaries.iter_mut().find(|s| s.id == summary.id) {
            Some(stored) => {
                *stored = summary.clone();
                Ok(summary.clone())
            }
            None => {
                warn!("Summary not found for update in memory");
                Err(AppError::NotFound("Summary not found".to_string()))
            }
        }
    }
}

#[async_trait]
impl SummaryRepository for PgTx {
    async fn latest_summary(&mut self) -> Result<Option<Summary>, AppError> {
        sqlx::query_as::<_, Summary>(
            "SELECT id, current_score, target_score, completed_maps, last_update \
             FROM summaries ORDER BY id DESC LIMIT 1",
        )
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(db_error("load latest summary"))
    }

    #[instrument(skip(self, summary), fields(summary_id = summary.id))]
    async fn save_summary(&mut self, summary: &Summary) -> Result<Summary, AppError> {
        if summary.id == 0 {
            let stored = sqlx::query_as::<_, Summary>(
                "INSERT INTO summaries (current_score, target_score, completed_maps, last_update) \
                 VALUES ($1, $2, $3, $4) \
                 RETURNING id, current_score, target_score, completed_maps, last_update",
            )
            .bind(summary.current_score)
            .bind(summary.target_score)
            .bind(summary.completed_maps)
            .bind(summary.last_update)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(db_error("insert summary"))?;

            debug!(summary_id = stored.id, "Summary created in database");
            return Ok(stored);
        }

        let result = sqlx::query(
            "UPDATE summaries SET current_score = $2, target_score = $3, completed_maps = $4, \
             last_update = $5 WHERE id = $1",
        )
        .bind(summary.id)
        .bind(summary.current_score)
        .bind(summary.target_score)
        .bind(summary.completed_maps)
        .bind(summary.last_update)
        .execute(&mut *self.tx)
        .await
        .map_err(db_error("update summary"))?;

        if result.rows_affected() == 0 {
            warn!("Summary not found for update");
            return Err(AppError::NotFound("Summary not found".to_string()));
        }
        Ok(summary.clone())
    }
}
