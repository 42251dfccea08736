use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;

use super::{aggregator, models::Summary};
use crate::shared::{AppError, TrackerSettings};
use crate::store::TrackerStore;

/// Service serving the global summary
pub struct SummaryService {
    store: Arc<dyn TrackerStore>,
    settings: TrackerSettings,
}

impl SummaryService {
    pub fn new(store: Arc<dyn TrackerStore>, settings: TrackerSettings) -> Self {
        Self { store, settings }
    }

    /// Recomputes the summary from the records and returns it
    #[instrument(skip(self))]
    pub async fn current(&self) -> Result<Summary, AppError> {
        let mut tx = self.store.begin().await?;
        tx.lock_reconciliation().await?;
        let summary =
            aggregator::recompute(tx.as_mut(), self.settings.target_score, Utc::now()).await?;
        tx.commit().await?;
        Ok(summary)
    }
}
