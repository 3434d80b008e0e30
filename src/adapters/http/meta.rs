//! Health and auth-discovery endpoints used by the web UI.

use axum::{extract::State, response::Html, Json};
use serde::Serialize;
use std::sync::Arc;

use super::error::ApiResult;
use super::extract::ApiJson;
use super::params::VerifyRequest;
use super::state::AppState;

/// `GET /api/health` body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `ok`
    pub status: &'static str,
}

/// `GET /api/auth/status` body.
#[derive(Debug, Serialize)]
pub struct AuthStatusResponse {
    /// Whether data routes need a token
    pub required: bool,
}

/// `POST /api/auth/verify` body.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    /// Whether the candidate token is accepted
    pub valid: bool,
}

/// Built-in page for `/` when no frontend build is available.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("index.html"))
}

/// Liveness check.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Report whether the gate is on.
pub async fn auth_status(State(state): State<Arc<AppState>>) -> Json<AuthStatusResponse> {
    Json(AuthStatusResponse {
        required: state.auth.required,
    })
}

/// Check a candidate token. Always valid when the gate is off.
pub async fn auth_verify(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<VerifyRequest>,
) -> ApiResult<Json<VerifyResponse>> {
    let valid = !state.auth.required || state.auth.accepts(&req.token);
    Ok(Json(VerifyResponse { valid }))
}
