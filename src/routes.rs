use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::shared::AppState;
use crate::{growth, messages, players, records, summary};

/// Builds the full HTTP router with every endpoint nested under `/api`
pub fn build_router(state: AppState, cors_allowed_origins: &[String]) -> Router {
    let api = Router::new()
        .route("/summary", get(summary::get_summary))
        .route("/leaderboard", get(players::get_leaderboard))
        .route("/maps", get(records::get_maps))
        .route("/map-options", get(records::get_map_options))
        .route("/player-options", get(players::get_player_options))
        .route("/records", axum::routing::post(records::create_record))
        .route("/growth", get(growth::get_growth))
        .route(
            "/messages",
            get(messages::get_messages).post(messages::post_message),
        );

    Router::new()
        .nest("/api", api)
        .layer(cors_layer(cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the browser front end; no configured origins means any origin
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
