#![allow(dead_code)] // Test utilities may not all be used in every test

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt; // for `oneshot`

use super::setup::TestApp;

/// Status and decoded JSON body of a response
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
}

// ============================================================================
// Action Helpers
// ============================================================================

impl TestApp {
    async fn send(&self, request: Request<Body>) -> Reply {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        Reply { status, body }
    }

    pub async fn get(&self, uri: &str) -> Reply {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post_raw(&self, uri: &str, body: &str) -> Reply {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> Reply {
        self.post_raw(uri, &body.to_string()).await
    }

    // ============================================================================
    // Convenience Action Methods
    // ============================================================================

    /// Submit a map record through `POST /api/records`
    pub async fn submit(&self, body: Value) -> Reply {
        self.post("/api/records", body).await
    }

    pub async fn summary(&self) -> Value {
        let reply = self.get("/api/summary").await;
        assert_eq!(reply.status, StatusCode::OK);
        reply.body
    }

    pub async fn player(&self, name: &str) -> Option<Value> {
        let reply = self.get("/api/leaderboard").await;
        assert_eq!(reply.status, StatusCode::OK);
        reply
            .body
            .as_array()
            .unwrap()
            .iter()
            .find(|p| p["name"] == name)
            .cloned()
    }
}
