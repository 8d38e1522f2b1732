//! Mapping from handler failures to HTTP responses.
//!
//! Every error renders as `{"error": "<message>"}`.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use todo_core::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The path id is not a positive integer.
    #[error("Invalid ID")]
    InvalidId,

    /// The request body is missing or is not a valid todo payload.
    #[error("{0}")]
    BadRequest(String),

    #[error("Todo not found")]
    NotFound,

    /// `Origin` is neither the configured front end nor this host.
    #[error("Origin not allowed")]
    OriginNotAllowed,

    #[error(transparent)]
    Storage(#[from] StoreError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidId | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::OriginNotAllowed => StatusCode::FORBIDDEN,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// The only path parameter is the todo id.
impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        ApiError::InvalidId
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Storage(e) = &self {
            error!(error = %e, "storage failure");
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
