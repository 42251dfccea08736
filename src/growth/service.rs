use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{debug, instrument};

use super::models::{format_timestamp, GrowthData};
use crate::shared::{AppError, TrackerSettings};
use crate::store::TrackerStore;

/// Service serving the growth history
pub struct GrowthService {
    store: Arc<dyn TrackerStore>,
    settings: TrackerSettings,
}

impl GrowthService {
    pub fn new(store: Arc<dyn TrackerStore>, settings: TrackerSettings) -> Self {
        Self { store, settings }
    }

    /// Growth points recorded inside the configured window
    #[instrument(skip(self))]
    pub async fn recent(&self) -> Result<Vec<GrowthData>, AppError> {
        let since = format_timestamp(Utc::now() - Duration::days(self.settings.growth_window_days));

        let mut tx = self.store.begin().await?;
        let points = tx.list_growth_since(&since).await?;
        tx.commit().await?;

        debug!(since = %since, point_count = points.len(), "Growth history loaded");
        Ok(points)
    }
}
