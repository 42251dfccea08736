use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    models::MapRecord,
    service::{RecordService, SubmissionOutcome},
    types::{MapQuery, RecordSubmission},
};
use crate::shared::{AppError, AppState};

/// HTTP handler for listing map records
///
/// GET /maps?difficulty=
#[instrument(name = "get_maps", skip(state, query))]
pub async fn get_maps(
    State(state): State<AppState>,
    query: Result<Query<MapQuery>, QueryRejection>,
) -> Result<Json<Vec<MapRecord>>, AppError> {
    let Query(query) = query?;

    let service = RecordService::new(Arc::clone(&state.store), state.settings.clone());
    let records = service.list_maps(query.difficulty.as_deref()).await?;

    info!(record_count = records.len(), "Map records served");
    Ok(Json(records))
}

/// HTTP handler for the maps still open at a difficulty
///
/// GET /map-options?difficulty=
#[instrument(name = "get_map_options", skip(state, query))]
pub async fn get_map_options(
    State(state): State<AppState>,
    query: Result<Query<MapQuery>, QueryRejection>,
) -> Result<Json<Vec<MapRecord>>, AppError> {
    let Query(query) = query?;
    let difficulty = query.difficulty.unwrap_or_default();

    let service = RecordService::new(Arc::clone(&state.store), state.settings.clone());
    Ok(Json(service.map_options(&difficulty).await?))
}

/// HTTP handler for submitting a map attempt
///
/// POST /records
/// Returns 201 with the new record, or 200 with the updated open record
#[instrument(name = "create_record", skip(state, payload))]
pub async fn create_record(
    State(state): State<AppState>,
    payload: Result<Json<RecordSubmission>, JsonRejection>,
) -> Result<(StatusCode, Json<MapRecord>), AppError> {
    let Json(submission) = payload?;
    info!(
        map_name = %submission.map_name,
        difficulty = %submission.difficulty,
        "Submitting record"
    );

    let service = RecordService::new(Arc::clone(&state.store), state.settings.clone());
    let response = match service.submit(submission).await? {
        SubmissionOutcome::Created(record) => (StatusCode::CREATED, Json(record)),
        SubmissionOutcome::Updated(record) => (StatusCode::OK, Json(record)),
    };

    Ok(response)
}
