use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{models::Message, service::MessageService, types::PostMessageRequest};
use crate::shared::{AppError, AppState};

/// HTTP handler for listing guestbook messages
///
/// GET /messages
#[instrument(name = "get_messages", skip(state))]
pub async fn get_messages(State(state): State<AppState>) -> Result<Json<Vec<Message>>, AppError> {
    let service = MessageService::new(Arc::clone(&state.store));
    Ok(Json(service.list().await?))
}

/// HTTP handler for posting a guestbook message
///
/// POST /messages
/// Returns the stored message with 201
#[instrument(name = "post_message", skip(state, payload))]
pub async fn post_message(
    State(state): State<AppState>,
    payload: Result<Json<PostMessageRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Message>), AppError> {
    let Json(request) = payload?;

    let service = MessageService::new(Arc::clone(&state.store));
    let message = service.post(request).await?;

    info!(message_id = message.id, "Message created");
    Ok((StatusCode::CREATED, Json(message)))
}
