//! Error responses in GitHub's REST error shape.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::domain::errors::{StorageError, StoreError};

const DOCUMENTATION_URL: &str = "https://docs.github.com/rest";

/// One entry of a 422 `errors` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Offending parameter, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// GitHub error code
    pub code: String,
    /// Human-readable reason
    pub message: String,
}

impl FieldError {
    /// An invalid value for `field`.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            code: "invalid".to_string(),
            message: message.into(),
        }
    }

    /// An error from a rejected extractor, which does not name its field.
    pub fn unparsable(message: impl Into<String>) -> Self {
        Self {
            field: None,
            code: "invalid".to_string(),
            message: message.into(),
        }
    }
}

/// Failures a handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 404
    #[error("not found")]
    NotFound,

    /// 422 with the listed field errors
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// 401
    #[error("unauthorized")]
    Unauthorized,

    /// Store failure; 404 for invalid paths, otherwise 500
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// A 422 with a single field error.
    pub fn validation(error: FieldError) -> Self {
        Self::Validation(vec![error])
    }
}

#[derive(Serialize)]
struct GitHubError<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a [FieldError]>,
    documentation_url: &'a str,
}

#[derive(Serialize)]
struct DetailError<'a> {
    detail: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound | Self::Store(StoreError::Storage(StorageError::InvalidPath(_))) => (
                StatusCode::NOT_FOUND,
                Json(GitHubError {
                    message: "Not Found",
                    errors: None,
                    documentation_url: DOCUMENTATION_URL,
                }),
            )
                .into_response(),
            Self::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(GitHubError {
                    message: "Validation Failed",
                    errors: Some(&errors),
                    documentation_url: DOCUMENTATION_URL,
                }),
            )
                .into_response(),
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(DetailError {
                    detail: "Unauthorized",
                }),
            )
                .into_response(),
            Self::Store(e) => {
                error!(error = %e, "store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(GitHubError {
                        message: "Internal Server Error",
                        errors: None,
                        documentation_url: DOCUMENTATION_URL,
                    }),
                )
                    .into_response()
            }
        }
    }
}

/// Handler result.
pub type ApiResult<T> = Result<T, ApiError>;
