use axum::Router;
use std::sync::Arc;

use ddnet_progress::{build_router, AppState, InMemoryStore, TrackerSettings};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
}

pub struct TestAppBuilder {
    settings: TrackerSettings,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            settings: TrackerSettings::default(),
        }
    }

    #[allow(dead_code)]
    pub fn with_target_score(mut self, target_score: i64) -> Self {
        self.settings.target_score = target_score;
        self
    }

    pub fn build(self) -> TestApp {
        let store = Arc::new(InMemoryStore::new());
        let state = AppState::new(store.clone(), self.settings);

        TestApp {
            router: build_router(state, &[]),
            store,
        }
    }
}
