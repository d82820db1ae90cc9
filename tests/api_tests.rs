//! Tests for the HTTP API
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot`.

use std::collections::HashSet;
use std::fs;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chirpdb::api::{router, ApiError};
use chirpdb::DocumentStore;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_router() -> (TempDir, Arc<DocumentStore>, Router) {
    let temp_dir = TempDir::new().unwrap();
    let store = DocumentStore::open_path(temp_dir.path().join("db.json")).unwrap();
    store.ensure_initialized().unwrap();
    let store = Arc::new(store);
    let app = router(Arc::clone(&store));
    (temp_dir, store, app)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

fn alice() -> Value {
    json!({ "email": "a@x.com", "password": "pw", "name": "Alice", "age": 30 })
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_create_and_get_user() {
    let (_temp, _store, app) = setup_router();

    let (status, created) = send(&app, Method::POST, "/users", Some(alice())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["email"], "a@x.com");
    assert_eq!(created["name"], "Alice");
    assert_eq!(created["age"], 30);
    assert!(created["createdAt"].is_string());

    let (status, fetched) = send(&app, Method::GET, "/users?email=a@x.com", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_get_missing_user_is_404_with_error_body() {
    let (_temp, _store, app) = setup_router();

    let (status, body) = send(&app, Method::GET, "/users?email=ghost@x.com", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("ghost@x.com"), "unexpected message: {}", message);
}

#[tokio::test]
async fn test_update_user() {
    let (_temp, _store, app) = setup_router();
    let (_, created) = send(&app, Method::POST, "/users", Some(alice())).await;

    let update = json!({ "email": "a@x.com", "password": "new", "name": "Al", "age": 31 });
    let (status, updated) = send(&app, Method::PUT, "/users", Some(update)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Al");
    assert_eq!(updated["age"], 31);
    assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn test_update_missing_user_is_404() {
    let (_temp, _store, app) = setup_router();

    let (status, body) = send(&app, Method::PUT, "/users", Some(alice())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_delete_user() {
    let (_temp, store, app) = setup_router();
    send(&app, Method::POST, "/users", Some(alice())).await;

    let (status, body) = send(&app, Method::DELETE, "/users?email=a@x.com", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
    assert!(store.get_user("a@x.com").unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_delete_user_requires_email() {
    let (_temp, store, app) = setup_router();
    let before = fs::read(store.path()).unwrap();

    let (status, body) = send(&app, Method::DELETE, "/users", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request: email is required");

    let (status, _) = send(&app, Method::DELETE, "/users?email=", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(fs::read(store.path()).unwrap(), before);
}

#[tokio::test]
async fn test_missing_body_fields_default() {
    let (_temp, store, app) = setup_router();

    let body = json!({ "email": "b@x.com" });
    let (status, created) = send(&app, Method::POST, "/users", Some(body)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "");
    assert_eq!(created["age"], 0);
    assert_eq!(store.get_user("b@x.com").unwrap().password, "");
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let (_temp, _store, app) = setup_router();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/users")
        .header("content-type", "application/json")
        .body(Body::from("{ nope"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_wrong_age_type_is_400() {
    let (_temp, _store, app) = setup_router();

    let body = json!({ "email": "a@x.com", "age": "thirty" });
    let (status, body) = send(&app, Method::POST, "/users", Some(body)).await;

    assert!(status.is_client_error());
    assert!(body["error"].is_string());
}

// =============================================================================
// Posts
// =============================================================================

#[tokio::test]
async fn test_create_and_list_posts() {
    let (_temp, _store, app) = setup_router();
    send(&app, Method::POST, "/users", Some(alice())).await;
    let bob = json!({ "email": "b@x.com", "password": "pw", "name": "Bob", "age": 40 });
    send(&app, Method::POST, "/users", Some(bob)).await;

    let mut expected = HashSet::new();
    for text in ["one", "two", "three"] {
        let body = json!({ "userEmail": "a@x.com", "text": text });
        let (status, post) = send(&app, Method::POST, "/posts", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(post["userEmail"], "a@x.com");
        expected.insert(post["id"].as_str().unwrap().to_string());
    }
    let body = json!({ "userEmail": "b@x.com", "text": "other" });
    send(&app, Method::POST, "/posts", Some(body)).await;

    let (status, posts) = send(&app, Method::GET, "/posts?userEmail=a@x.com", None).await;

    assert_eq!(status, StatusCode::OK);
    let ids: HashSet<String> = posts
        .as_array()
        .unwrap()
        .iter()
        .map(|post| post["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_list_posts_for_unknown_user_is_empty_array() {
    let (_temp, _store, app) = setup_router();

    let (status, posts) = send(&app, Method::GET, "/posts?userEmail=ghost@x.com", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(posts, json!([]));
}

#[tokio::test]
async fn test_create_post_for_unknown_user_is_404() {
    let (_temp, store, app) = setup_router();

    let body = json!({ "userEmail": "ghost@x.com", "text": "hi" });
    let (status, body) = send(&app, Method::POST, "/posts", Some(body)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
    assert!(store.load().unwrap().posts.is_empty());
}

#[tokio::test]
async fn test_delete_post() {
    let (_temp, store, app) = setup_router();
    send(&app, Method::POST, "/users", Some(alice())).await;
    let body = json!({ "userEmail": "a@x.com", "text": "bye" });
    let (_, post) = send(&app, Method::POST, "/posts", Some(body)).await;
    let id = post["id"].as_str().unwrap();

    let (status, body) = send(&app, Method::DELETE, &format!("/posts?id={}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
    assert!(store.get_posts("a@x.com").unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_post_requires_id() {
    let (_temp, _store, app) = setup_router();

    let (status, body) = send(&app, Method::DELETE, "/posts", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

// =============================================================================
// Routing and Failure Shapes
// =============================================================================

#[tokio::test]
async fn test_unsupported_method_is_405_with_error_body() {
    let (_temp, _store, app) = setup_router();

    let (status, body) = send(&app, Method::PATCH, "/users", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error"], "method not allowed: PATCH");

    let (status, body) = send(&app, Method::PUT, "/posts", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_unknown_route_is_404_with_error_body() {
    let (_temp, _store, app) = setup_router();

    let (status, body) = send(&app, Method::GET, "/nowhere", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "no route for /nowhere");
}

#[tokio::test]
async fn test_ping() {
    let (_temp, _store, app) = setup_router();

    let (status, body) = send(&app, Method::GET, "/ping", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_corrupt_file_is_client_error_and_service_keeps_serving() {
    let (_temp, store, app) = setup_router();
    fs::write(store.path(), b"garbage").unwrap();

    let (status, body) = send(&app, Method::GET, "/users?email=a@x.com", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Corrupt"));

    store.ensure_initialized().unwrap();
    let (status, _) = send(&app, Method::POST, "/users", Some(alice())).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[test]
fn test_timeout_error_warns_operation_may_complete() {
    let err = ApiError::timeout();

    assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(err.message.contains("may still complete"));
}
