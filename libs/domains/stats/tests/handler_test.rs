//! Handler tests for the stats server routes.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_stats::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> axum::Router {
    handlers::router(StatsService::new(InMemoryHitRepository::new()))
}

fn post_hit(uri: &str, ip: &str, timestamp: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/hit")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "app": "ewm-main-service",
                "uri": uri,
                "ip": ip,
                "timestamp": timestamp
            })
            .to_string(),
        ))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_post_hit_returns_201_with_id() {
    let response = app()
        .oneshot(post_hit("/events/1", "10.0.0.1", "2025-03-01 10:00:00"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let hit: Value = json_body(response.into_body()).await;
    assert_eq!(hit["id"], 1);
    assert_eq!(hit["timestamp"], "2025-03-01 10:00:00");
}

#[tokio::test]
async fn test_post_hit_with_bad_timestamp_returns_400() {
    let response = app()
        .oneshot(post_hit("/events/1", "10.0.0.1", "2025-03-01T10:00:00Z"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_stats_unique_and_filtered() {
    let app = app();
    for ip in ["10.0.0.1", "10.0.0.1", "10.0.0.2"] {
        app.clone()
            .oneshot(post_hit("/events/1", ip, "2025-03-01 10:00:00"))
            .await
            .unwrap();
    }
    app.clone()
        .oneshot(post_hit("/events/2", "10.0.0.1", "2025-03-01 10:00:00"))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(get(
            "/stats?start=2025-03-01%2000:00:00&end=2025-03-02%2000:00:00",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let all: Vec<ViewStats> = json_body(response.into_body()).await;
    assert_eq!(all.len(), 2);
    assert_eq!((all[0].uri.as_str(), all[0].hits), ("/events/1", 3));

    let response = app
        .oneshot(get(
            "/stats?start=2025-03-01%2000:00:00&end=2025-03-02%2000:00:00&uris=/events/1&unique=true",
        ))
        .await
        .unwrap();
    let unique: Vec<ViewStats> = json_body(response.into_body()).await;
    assert_eq!(unique.len(), 1);
    assert_eq!(unique[0].hits, 2);
}

#[tokio::test]
async fn test_get_stats_start_after_end_returns_400() {
    let response = app()
        .oneshot(get(
            "/stats?start=2025-03-02%2000:00:00&end=2025-03-01%2000:00:00",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Start must not be after end");
}

#[tokio::test]
async fn test_get_stats_missing_start_returns_400() {
    let response = app()
        .oneshot(get("/stats?end=2025-03-01%2000:00:00"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
