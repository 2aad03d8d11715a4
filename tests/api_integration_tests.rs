//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::sync::Arc;
use std::time::Duration;

use api_queue::{
    api::create_router, rewards::InMemoryProfileStore, AppState, Executor, ExecutorConfig,
    ManualClock,
};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_state(clock: ManualClock) -> AppState {
    let executor =
        Executor::with_clock(ExecutorConfig::new(2, Duration::from_secs(30)), clock).unwrap();
    AppState::new(executor, Arc::new(InMemoryProfileStore::new()))
}

fn create_test_app() -> Router {
    create_router(create_test_state(ManualClock::new(0)))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// == Health / Status ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}

#[tokio::test]
async fn test_status_endpoint_idle() {
    let app = create_test_app();

    let (status, json) = send(&app, "GET", "/status", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["in_flight"], 0);
    assert_eq!(json["pending_count"], 0);
    assert_eq!(json["cache_size"], 0);
    assert_eq!(json["max_concurrent"], 2);
}

// == Profiles ==

#[tokio::test]
async fn test_create_then_get_profile() {
    let app = create_test_app();

    let (status, created) = send(&app, "PUT", "/profile/alice", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["user_id"], "alice");
    assert_eq!(created["points"], 0);
    assert_eq!(created["rank"], "Bronze");

    let (status, fetched) = send(&app, "GET", "/profile/alice", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_get_unknown_profile() {
    let app = create_test_app();

    let (status, json) = send(&app, "GET", "/profile/nobody", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("nobody"));
}

#[tokio::test]
async fn test_profile_reads_are_cached_until_expiry() {
    let clock = ManualClock::new(0);
    let app = create_router(create_test_state(clock.clone()));

    send(&app, "PUT", "/profile/bob", None).await;
    send(&app, "GET", "/profile/bob", None).await;

    let (status, reward) = send(
        &app,
        "POST",
        "/reward",
        Some(r#"{"user_id":"bob","action":"photo_post"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let total = reward["points"].as_u64().unwrap();
    assert!(total >= 10);

    // Within the window the earlier read is served from cache
    let (_, cached) = send(&app, "GET", "/profile/bob", None).await;
    assert_eq!(cached["points"], 0);

    clock.advance(Duration::from_secs(31));
    let (_, fresh) = send(&app, "GET", "/profile/bob", None).await;
    assert_eq!(fresh["points"].as_u64().unwrap(), total);

    let (_, stats) = send(&app, "GET", "/stats", None).await;
    assert_eq!(stats["hits"], 1);
    assert_eq!(stats["expirations"], 1);
}

// == Rewards ==

#[tokio::test]
async fn test_reward_accumulates_points() {
    let app = create_test_app();
    send(&app, "PUT", "/profile/carol", None).await;

    let mut expected = 0;
    for _ in 0..3 {
        let (status, json) = send(
            &app,
            "POST",
            "/reward",
            Some(r#"{"user_id":"carol","action":"status_post"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let earned = json["points_earned"].as_u64().unwrap();
        assert!((5..=14).contains(&earned));
        expected += earned;
        assert_eq!(json["points"].as_u64().unwrap(), expected);
        assert_eq!(json["action"], "status_post");
    }
}

#[tokio::test]
async fn test_reward_unknown_user() {
    let app = create_test_app();

    let (status, _) = send(
        &app,
        "POST",
        "/reward",
        Some(r#"{"user_id":"ghost","action":"message_sent"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reward_empty_user_id() {
    let app = create_test_app();

    let (status, json) = send(
        &app,
        "POST",
        "/reward",
        Some(r#"{"user_id":"","action":"message_sent"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json.get("error").is_some());
}

// == Cache ==

#[tokio::test]
async fn test_clear_cache_endpoint() {
    let app = create_test_app();
    send(&app, "PUT", "/profile/dave", None).await;
    send(&app, "GET", "/profile/dave", None).await;

    let (_, before) = send(&app, "GET", "/status", None).await;
    assert_eq!(before["cache_size"], 1);

    let (status, json) = send(&app, "DELETE", "/cache", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cleared"], 1);

    let (_, after) = send(&app, "GET", "/status", None).await;
    assert_eq!(after["cache_size"], 0);
}

#[tokio::test]
async fn test_concurrent_rewards_all_land() {
    let app = create_test_app();
    send(&app, "PUT", "/profile/erin", None).await;

    let requests = (0..10).map(|_| {
        let app = app.clone();
        tokio::spawn(async move {
            send(
                &app,
                "POST",
                "/reward",
                Some(r#"{"user_id":"erin","action":"unknown_action"}"#),
            )
            .await
        })
    });

    for handle in requests.collect::<Vec<_>>() {
        let (status, json) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["points_earned"], 1);
    }

    let (_, status) = send(&app, "GET", "/status", None).await;
    assert_eq!(status["in_flight"], 0);
    assert_eq!(status["pending_count"], 0);
}
