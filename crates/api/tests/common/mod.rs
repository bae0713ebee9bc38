//! Shared helpers for API integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use hookforge_api::config::ServerConfig;
use hookforge_api::router::build_app_router;
use hookforge_api::state::AppState;

/// User-Agent sent by the request helpers unless a test overrides it.
pub const TEST_USER_AGENT: &str = "hookforge-tests/1.0";

/// Build a test `ServerConfig` with safe defaults.
///
/// Rating is limited to three requests per minute so tests can reach the
/// limit quickly. Proxy headers are trusted so each test picks its client IP
/// with `X-Forwarded-For`.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        gallery_page_size: 20,
        gallery_default_sort: "newest".to_string(),
        rate_limit_max_requests: 3,
        rate_limit_window_secs: 60,
        identity_hash_salt: "test-salt".to_string(),
        trust_proxy_headers: true,
    }
}

/// Build the full application router with all middleware layers.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

/// Same as [`build_test_app`] with a caller-supplied configuration.
pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

/// Send a GET request from `client_ip`.
pub async fn get_as(app: Router, uri: &str, client_ip: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("x-forwarded-for", client_ip)
        .header("user-agent", TEST_USER_AGENT)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request from a fixed test client.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    get_as(app, uri, "192.0.2.1").await
}

/// Send a JSON POST request from `client_ip`.
pub async fn post_json_as(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    client_ip: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-forwarded-for", client_ip)
        .header("user-agent", TEST_USER_AGENT)
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a JSON POST request from a fixed test client.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_json_as(app, uri, body, "192.0.2.1").await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Save a generation through the API and return its id.
pub async fn create_generation(app: Router, project_idea: &str) -> String {
    let response = post_json(
        app,
        "/api/v1/generations",
        serde_json::json!({
            "project_idea": project_idea,
            "experience_level": "intermediate",
            "hook_preset": "standard",
            "files": [{ "path": "CLAUDE.md", "content": "# Rules" }],
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["id"].as_str().unwrap().to_string()
}
