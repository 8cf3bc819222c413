//! # REST API Errors
//!
//! Maps operation failures onto HTTP status codes and the failure envelope.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{debug, error};

use crate::books::{BookError, ValidationError};

use super::response::ErrorResponse;

/// Message sent for every server-side failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Message sent for unmatched routes
pub const ENDPOINT_NOT_FOUND_MESSAGE: &str = "Endpoint not found";

/// Result type for REST handlers
pub type RestResult<T> = Result<T, RestError>;

/// REST API errors
#[derive(Debug, Clone, Error)]
pub enum RestError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Validation failure or duplicate book
    #[error("{0}")]
    BadRequest(String),

    /// Referenced book does not exist
    #[error("{0}")]
    NotFound(String),

    /// No route matches the request
    #[error("Endpoint not found")]
    EndpointNotFound,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Store or other unexpected failure; the detail stays server-side
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RestError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RestError::NotFound(_) => StatusCode::NOT_FOUND,
            RestError::EndpointNotFound => StatusCode::NOT_FOUND,
            RestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client
    pub fn public_message(&self) -> String {
        match self {
            RestError::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<BookError> for RestError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::Validation(_) | BookError::Duplicate => {
                RestError::BadRequest(err.to_string())
            }
            BookError::NotFound => RestError::NotFound(err.to_string()),
            BookError::Store(store_err) => RestError::Internal(store_err.to_string()),
        }
    }
}

impl From<JsonRejection> for RestError {
    fn from(rejection: JsonRejection) -> Self {
        BookError::from(ValidationError::MalformedBody(rejection.body_text())).into()
    }
}

impl From<RestError> for ErrorResponse {
    fn from(err: RestError) -> Self {
        ErrorResponse::failure(err.public_message())
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            RestError::Internal(detail) => error!(%detail, "request failed"),
            other => debug!(status = status.as_u16(), error = %other, "request rejected"),
        }
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
