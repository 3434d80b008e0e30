//! Extractors that reject with GitHub-style 422 bodies and derive the
//! public base URL.

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::{header::HOST, request::Parts},
    Json,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::error::{ApiError, FieldError};
use super::state::AppState;

/// `Query<T>` that fails with 422.
#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::validation(FieldError::unparsable(rejection.body_text())))?;
        Ok(Self(value))
    }
}

/// `Path<T>` that fails with 422.
#[derive(Debug)]
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::validation(FieldError::unparsable(rejection.body_text())))?;
        Ok(Self(value))
    }
}

/// `Json<T>` that fails with 422.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::validation(FieldError::unparsable(rejection.body_text())))?;
        Ok(Self(value))
    }
}

/// Scheme and authority used to build resource URLs, without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(pub String);

impl BaseUrl {
    /// The URL as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequestParts<Arc<AppState>> for BaseUrl {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        if let Some(configured) = &state.base_url {
            return Ok(Self(configured.trim_end_matches('/').to_string()));
        }

        let host = parts
            .headers
            .get(HOST)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .or_else(|| parts.uri.authority().map(ToString::to_string))
            .unwrap_or_else(|| "localhost".to_string());
        Ok(Self(format!("http://{host}")))
    }
}
