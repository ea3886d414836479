//! Handler tests for the Categories domain (admin and public routers).

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_categories::usage::NoCategoryUsage;
use domain_categories::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn routers() -> (axum::Router, axum::Router) {
    let service = CategoryService::new(InMemoryCategoryRepository::new(), Arc::new(NoCategoryUsage));
    (
        handlers::admin_router(service.clone()),
        handlers::public_router(service),
    )
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_create_then_browse() {
    let (admin, public) = routers();

    let response = admin
        .oneshot(json_request("POST", "/", json!({ "name": "Concerts" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Category = json_body(response.into_body()).await;

    let response = public
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let all: Vec<Category> = json_body(response.into_body()).await;
    assert_eq!(all, vec![created.clone()]);

    let response = public
        .oneshot(
            Request::builder()
                .uri(format!("/{}", created.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_blank_name_is_bad_request() {
    let (admin, _) = routers();
    let response = admin
        .oneshot(json_request("POST", "/", json!({ "name": "" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rename_conflict_and_not_found() {
    let (admin, _) = routers();
    for name in ["Concerts", "Films"] {
        admin
            .clone()
            .oneshot(json_request("POST", "/", json!({ "name": name })))
            .await
            .unwrap();
    }

    let response = admin
        .clone()
        .oneshot(json_request("PATCH", "/2", json!({ "name": "concerts" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = admin
        .oneshot(json_request("PATCH", "/99", json!({ "name": "Theatre" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Category with id=99 was not found");
}

#[tokio::test]
async fn test_delete_category() {
    let (admin, public) = routers();
    admin
        .clone()
        .oneshot(json_request("POST", "/", json!({ "name": "Concerts" })))
        .await
        .unwrap();

    let response = admin
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = public
        .oneshot(Request::builder().uri("/1").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
