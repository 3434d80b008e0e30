//! Common test utilities for integration tests
//!
//! Provides shared fixtures, helpers, and test utilities used across
//! multiple integration test files.

#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use gh_issues_local::adapters::storage::InMemoryStorage;
use gh_issues_local::{build_router, AppState, AuthSettings, IssueStore, RouterOptions};

pub const BASE_URL: &str = "http://localhost:8000";
pub const TEST_TOKEN: &str = "test-token";

/// Create a temporary directory for test isolation
///
/// Returns a TempDir that will be cleaned up when dropped.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// A store over fresh in-memory storage.
pub fn memory_store() -> IssueStore {
    IssueStore::new(Arc::new(InMemoryStorage::new()))
}

/// A router over fresh in-memory storage with the given gate.
pub fn test_router(auth: AuthSettings) -> Router {
    let state = AppState::new(memory_store(), auth);
    build_router(Arc::new(state), &RouterOptions::default())
}

/// A response split into the parts tests assert on.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Send one request through `router`. `body` is sent as JSON when present.
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> TestResponse {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::HOST, "localhost:8000");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn get(router: &Router, uri: &str) -> TestResponse {
    send(router, Method::GET, uri, None, None).await
}

pub async fn post(router: &Router, uri: &str, body: Value) -> TestResponse {
    send(router, Method::POST, uri, Some(body), None).await
}

pub async fn patch(router: &Router, uri: &str, body: Value) -> TestResponse {
    send(router, Method::PATCH, uri, Some(body), None).await
}
