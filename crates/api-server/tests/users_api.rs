//! REST layer exercised through the real router on an in-memory store.

use std::sync::Arc;

use api_server::{dto::ErrorResponse, router};
use application::UserApp;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use domain::{DomainError, User, UserId, UserRepository};
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_router() -> Router {
    router(Arc::new(UserApp::in_memory()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
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
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

fn json_of(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

#[tokio::test]
async fn create_user_returns_created() {
    let app = test_router();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({"name": "John Doe", "email": "john@example.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        json_of(&body),
        json!({"id": 1, "name": "John Doe", "email": "john@example.com"})
    );
}

#[tokio::test]
async fn create_user_with_invalid_data_is_bad_request() {
    let app = test_router();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({"name": "", "email": "john@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.error, "Name cannot be empty");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({"name": "John"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_of(&body), json!({"error": "Invalid email"}));
}

#[tokio::test]
async fn list_and_count_users() {
    let app = test_router();
    for (name, email) in [("Alice", "alice@example.com"), ("Bob", "bob@example.com")] {
        send(&app, Method::POST, "/api/users", Some(json!({"name": name, "email": email}))).await;
    }

    let (status, body) = send(&app, Method::GET, "/api/users", None).await;
    assert_eq!(status, StatusCode::OK);
    let users = json_of(&body);
    assert_eq!(users.as_array().unwrap().len(), 2);
    assert_eq!(users[0]["name"], "Alice");
    assert_eq!(users[1]["name"], "Bob");

    let (status, body) = send(&app, Method::GET, "/api/users/count", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body), json!(2));
}

#[tokio::test]
async fn get_user_by_id_and_not_found() {
    let app = test_router();
    send(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({"name": "John Doe", "email": "john@example.com"})),
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/api/users/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body)["email"], "john@example.com");

    let (status, _) = send(&app, Method::GET, "/api/users/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/api/users/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_user_paths() {
    let app = test_router();
    send(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({"name": "John Doe", "email": "john@example.com"})),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/users/1",
        Some(json!({"name": "Jane Doe", "email": "jane@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json_of(&body),
        json!({"id": 1, "name": "Jane Doe", "email": "jane@example.com"})
    );

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/users/1",
        Some(json!({"name": "   ", "email": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body)["name"], "Jane Doe");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/users/999",
        Some(json!({"name": "Nobody"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/users/1",
        Some(json!({"name": "John", "email": "invalid"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_of(&body), json!({"error": "Invalid email"}));

    let (_, body) = send(&app, Method::GET, "/api/users/1", None).await;
    assert_eq!(json_of(&body)["name"], "Jane Doe");
}

#[tokio::test]
async fn delete_user_then_not_found() {
    let app = test_router();
    send(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({"name": "John Doe", "email": "john@example.com"})),
    )
    .await;

    let (status, body) = send(&app, Method::DELETE, "/api/users/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, _) = send(&app, Method::DELETE, "/api/users/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/api/users/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn complete_crud_workflow() {
    let app = test_router();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({"name": "Alice", "email": "alice@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = json_of(&body)["id"].as_i64().unwrap();

    let (status, body) = send(&app, Method::GET, &format!("/api/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body)["name"], "Alice");

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/users/{id}"),
        Some(json!({"name": "Alice Smith"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body)["name"], "Alice Smith");
    assert_eq!(json_of(&body)["email"], "alice@example.com");

    let (status, _) = send(&app, Method::DELETE, &format!("/api/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &format!("/api/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, Method::GET, "/api/users/count", None).await;
    assert_eq!(json_of(&body), json!(0));
}

#[tokio::test]
async fn health_check_ok() {
    let app = test_router();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

/// Store that always fails, to check the 500 mapping.
struct FailingRepository;

#[async_trait::async_trait]
impl UserRepository for FailingRepository {
    async fn save(&self, _user: &User) -> Result<User, DomainError> {
        Err(DomainError::repository("disk full"))
    }
    async fn find_by_id(&self, _id: UserId) -> Result<Option<User>, DomainError> {
        Err(DomainError::repository("disk full"))
    }
    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        Err(DomainError::repository("disk full"))
    }
    async fn exists_by_id(&self, _id: UserId) -> Result<bool, DomainError> {
        Err(DomainError::repository("disk full"))
    }
    async fn delete_by_id(&self, _id: UserId) -> Result<(), DomainError> {
        Err(DomainError::repository("disk full"))
    }
    async fn delete_all(&self) -> Result<(), DomainError> {
        Err(DomainError::repository("disk full"))
    }
    async fn count(&self) -> Result<u64, DomainError> {
        Err(DomainError::repository("disk full"))
    }
}

#[tokio::test]
async fn store_failures_are_internal_errors() {
    let app = router(Arc::new(UserApp::with_repository(Arc::new(FailingRepository))));

    let (status, body) = send(&app, Method::GET, "/api/users", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_of(&body), json!({"error": "Internal server error"}));

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({"name": "A", "email": "a@b.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
