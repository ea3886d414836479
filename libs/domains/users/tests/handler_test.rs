//! Handler tests for the Users domain
//!
//! Exercise the admin router against the in-memory repository:
//! status codes, JSON bodies and error responses.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> axum::Router {
    handlers::router(UserService::new(InMemoryUserRepository::new()))
}

fn post_user(name: &str, email: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "name": name, "email": email }).to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_create_user_returns_201() {
    let response = app().oneshot(post_user("Ann", "ann@example.com")).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let user: User = json_body(response.into_body()).await;
    assert_eq!(user.id, 1);
    assert_eq!(user.email, "ann@example.com");
}

#[tokio::test]
async fn test_duplicate_email_returns_409() {
    let app = app();
    app.clone()
        .oneshot(post_user("Ann", "ann@example.com"))
        .await
        .unwrap();

    let response = app
        .oneshot(post_user("Annie", "ANN@example.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["status"], "CONFLICT");
    assert_eq!(body["message"], "User email must be unique");
}

#[tokio::test]
async fn test_invalid_email_returns_400() {
    let response = app().oneshot(post_user("Ann", "nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_users_by_ids() {
    let app = app();
    for (name, email) in [("Ann", "ann@example.com"), ("Bob", "bob@example.com"), ("Cid", "cid@example.com")] {
        app.clone().oneshot(post_user(name, email)).await.unwrap();
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/?ids=3&ids=1&from=0&size=10")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let users: Vec<User> = json_body(response.into_body()).await;
    assert_eq!(users.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1, 3]);
}

#[tokio::test]
async fn test_delete_user() {
    let app = app();
    app.clone()
        .oneshot(post_user("Ann", "ann@example.com"))
        .await
        .unwrap();

    let delete = |id: &str| {
        Request::builder()
            .method("DELETE")
            .uri(format!("/{}", id))
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(delete("1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.clone().oneshot(delete("1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(delete("abc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
