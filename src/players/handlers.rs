use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{models::Player, service::PlayerService};
use crate::shared::{AppError, AppState};

/// HTTP handler for the contribution leaderboard
///
/// GET /leaderboard
#[instrument(name = "get_leaderboard", skip(state))]
pub async fn get_leaderboard(State(state): State<AppState>) -> Result<Json<Vec<Player>>, AppError> {
    let service = PlayerService::new(Arc::clone(&state.store));
    let players = service.leaderboard().await?;

    info!(player_count = players.len(), "Leaderboard served");
    Ok(Json(players))
}

/// HTTP handler for player name autocomplete
///
/// GET /player-options
#[instrument(name = "get_player_options", skip(state))]
pub async fn get_player_options(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, AppError> {
    let service = PlayerService::new(Arc::clone(&state.store));
    Ok(Json(service.player_names().await?))
}
