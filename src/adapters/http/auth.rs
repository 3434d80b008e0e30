//! Bearer-token gate for the data API.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::warn;

use super::error::ApiError;
use super::state::AppState;

/// Reachable without a token so the web UI can render its login flow.
const PUBLIC_PATHS: [&str; 3] = ["/api/health", "/api/auth/status", "/api/auth/verify"];

/// GitHub-style data prefixes; everything below them is gated.
const PROTECTED_PREFIXES: [&str; 4] = ["/repos/", "/search/", "/orgs/", "/user/"];

/// Whether `path` serves data and needs a token. Static frontend assets do not.
pub fn is_protected(path: &str) -> bool {
    if PUBLIC_PATHS.contains(&path) {
        return false;
    }
    path == "/issues"
        || PROTECTED_PREFIXES
            .iter()
            .any(|prefix| path.starts_with(prefix))
        || path.starts_with("/api/")
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Reject protected requests without the configured bearer token.
pub async fn require_token(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if !state.auth.required || !is_protected(request.uri().path()) {
        return next.run(request).await;
    }

    let authorized = bearer_token(&request).is_some_and(|token| state.auth.accepts(token));
    if authorized {
        next.run(request).await
    } else {
        warn!(path = %request.uri().path(), "rejected unauthenticated request");
        ApiError::Unauthorized.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_paths_are_open() {
        assert!(!is_protected("/api/health"));
        assert!(!is_protected("/api/auth/status"));
        assert!(!is_protected("/api/auth/verify"));
        assert!(!is_protected("/"));
        assert!(!is_protected("/assets/index.js"));
    }

    #[test]
    fn test_data_paths_are_protected() {
        assert!(is_protected("/issues"));
        assert!(is_protected("/repos/o/r/issues"));
        assert!(is_protected("/search/issues"));
        assert!(is_protected("/orgs/acme/issues"));
        assert!(is_protected("/user/issues"));
        assert!(is_protected("/api/anything-else"));
        assert!(!is_protected("/issues-board"));
    }
}
