use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::instrument;

use super::{models::Summary, service::SummaryService};
use crate::shared::{AppError, AppState};

/// HTTP handler for the global progress summary
///
/// GET /summary
#[instrument(name = "get_summary", skip(state))]
pub async fn get_summary(State(state): State<AppState>) -> Result<Json<Summary>, AppError> {
    let service = SummaryService::new(Arc::clone(&state.store), state.settings.clone());
    Ok(Json(service.current().await?))
}
