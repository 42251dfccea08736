use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::instrument;

use super::{models::GrowthData, service::GrowthService};
use crate::shared::{AppError, AppState};

/// HTTP handler for the progress time series
///
/// GET /growth
#[instrument(name = "get_growth", skip(state))]
pub async fn get_growth(State(state): State<AppState>) -> Result<Json<Vec<GrowthData>>, AppError> {
    let service = GrowthService::new(Arc::clone(&state.store), state.settings.clone());
    Ok(Json(service.recent().await?))
}
