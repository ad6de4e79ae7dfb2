#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use taskhub_api::auth::jwt::{generate_access_token, JwtConfig};
use taskhub_api::config::{ServerConfig, StoreBackend};
use taskhub_api::router::build_app_router;
use taskhub_api::state::AppState;
use taskhub_core::permissions::{ROLE_MEMBER, ROLE_VIEWER};
use taskhub_core::types::DbId;
use taskhub_db::memory::MemoryStore;
use taskhub_db::models::scope::Scope;
use taskhub_db::store::Stores;

pub const ACCOUNT_ID: DbId = 1;
pub const USER_ID: DbId = 10;
pub const OTHER_ACCOUNT_ID: DbId = 2;

/// Build a test `ServerConfig` with safe defaults and the in-memory backend.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
        database_url: None,
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// A router over a fresh in-memory store, plus the store for seeding.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

pub fn build_test_app() -> TestApp {
    let config = test_config();
    let store = Arc::new(MemoryStore::new());
    let state = AppState {
        stores: Stores::memory(store.clone()),
        config: Arc::new(config.clone()),
    };
    TestApp {
        router: build_app_router(state, &config),
        store,
    }
}

pub fn scope() -> Scope {
    Scope {
        account_id: ACCOUNT_ID,
        user_id: USER_ID,
    }
}

pub fn token_for(account_id: DbId, role: &str) -> String {
    generate_access_token(USER_ID, account_id, role, &test_config().jwt).unwrap()
}

pub fn member_token() -> String {
    token_for(ACCOUNT_ID, ROLE_MEMBER)
}

pub fn viewer_token() -> String {
    token_for(ACCOUNT_ID, ROLE_VIEWER)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn get_anonymous(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(app: &Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json(app: &Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Send a raw (possibly malformed) JSON body.
pub async fn post_raw(app: &Router, uri: &str, token: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a category through the API and return its id.
pub async fn create_category(app: &Router, name: &str, parent_id: Option<DbId>) -> DbId {
    let response = post_json(
        app,
        "/api/v1/category",
        &member_token(),
        serde_json::json!({ "name": name, "color": "#336699", "parentId": parent_id }),
    )
    .await;
    assert_eq!(response.status(), 201, "creating category {name}");
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a task through the API and return its id.
pub async fn create_task(app: &Router, title: &str) -> DbId {
    let response = post_json(
        app,
        "/api/v1/task",
        &member_token(),
        serde_json::json!({ "title": title }),
    )
    .await;
    assert_eq!(response.status(), 201, "creating task {title}");
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
