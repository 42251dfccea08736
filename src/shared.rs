use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::store::TrackerStore;

/// Tunables the reconciliation core needs at request time
#[derive(Debug, Clone)]
pub struct TrackerSettings {
    /// Target score written into a freshly created summary row
    pub target_score: i64,
    /// How many days of growth history `GET /growth` serves
    pub growth_window_days: i64,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            target_score: 10_000,
            growth_window_days: 7,
        }
    }
}

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TrackerStore>,
    pub settings: TrackerSettings,
}

impl AppState {
    pub fn new(store: Arc<dyn TrackerStore>, settings: TrackerSettings) -> Self {
        Self { store, settings }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
pub mod test_utils {
    use super::*;
    use crate::store::InMemoryStore;

    /// Builder for creating AppState with overrides for testing
    pub struct AppStateBuilder {
        store: Option<Arc<dyn TrackerStore>>,
        settings: TrackerSettings,
    }

    impl AppStateBuilder {
        pub fn new() -> Self {
            Self {
                store: None,
                settings: TrackerSettings::default(),
            }
        }

        pub fn with_store(mut self, store: Arc<dyn TrackerStore>) -> Self {
            self.store = Some(store);
            self
        }

        pub fn with_target_score(mut self, target_score: i64) -> Self {
            self.settings.target_score = target_score;
            self
        }

        pub fn build(self) -> AppState {
            AppState {
                store: self.store.unwrap_or_else(|| Arc::new(InMemoryStore::new())),
                settings: self.settings,
            }
        }
    }

    impl Default for AppStateBuilder {
        fn default() -> Self {
            Self::new()
        }
    }

    #[test]
    fn validation_errors_map_to_bad_request() {
        let response = AppError::Validation("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_errors_map_to_not_found() {
        let response = AppError::NotFound("gone".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn database_errors_map_to_server_error() {
        let response = AppError::DatabaseError("down".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
