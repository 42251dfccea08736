mod utils;

use axum::http::StatusCode;
use serde_json::json;
use utils::TestAppBuilder;

#[tokio::test]
async fn posted_messages_come_back_newest_first() {
    let app = TestAppBuilder::new().build();

    let first = app
        .post("/api/messages", json!({"user": "YuanYuan", "content": "Welcome!"}))
        .await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.body["user"], "YuanYuan");
    assert!(first.body["created_at"].is_string());

    let second = app
        .post("/api/messages", json!({"user": "Hardy", "content": "Insane maps tonight?"}))
        .await;
    assert_eq!(second.status, StatusCode::CREATED);

    let listed = app.get("/api/messages").await;
    assert_eq!(listed.status, StatusCode::OK);
    let messages = listed.body.as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["content"], "Insane maps tonight?");
    assert_eq!(messages[1]["content"], "Welcome!");
}

#[tokio::test]
async fn invalid_messages_are_bad_requests() {
    let app = TestAppBuilder::new().build();

    let missing_content = app.post("/api/messages", json!({"user": "Hardy"})).await;
    assert_eq!(missing_content.status, StatusCode::BAD_REQUEST);
    assert!(missing_content.body["error"].is_string());

    let blank = app
        .post("/api/messages", json!({"user": "Hardy", "content": "  "}))
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
    assert_eq!(blank.body["error"], "content is required");

    assert_eq!(app.get("/api/messages").await.body, json!([]));
}

#[tokio::test]
async fn summary_uses_configured_target() {
    let app = TestAppBuilder::new().with_target_score(32_450).build();

    let summary = app.summary().await;
    assert_eq!(summary["target_score"], 32_450);
    assert_eq!(summary["current_score"], 0);

    // Reading twice keeps a single summary row
    app.summary().await;
    assert_eq!(app.store.snapshot().await.summaries.len(), 1);
}

#[tokio::test]
async fn unknown_routes_are_not_found() {
    let app = TestAppBuilder::new().build();
    let reply = app.get("/api/nope").await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}
