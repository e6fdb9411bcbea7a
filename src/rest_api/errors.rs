//! Service error taxonomy and HTTP mapping
//!
//! Every failure a handler can produce, with its status code. Errors render
//! as structured JSON carrying a `message` clients can read and match on.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::models::DataValidationError;

/// Result type for handler operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the HTTP layer
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Client payload failed a field check
    #[error(transparent)]
    Validation(#[from] DataValidationError),

    /// Malformed query parameter on the listing endpoint
    #[error("Invalid query parameter: {0}")]
    InvalidQueryParam(String),

    /// Referenced product does not exist
    #[error("Product with id '{0}' was not found.")]
    NotFound(i64),

    /// Write request without a JSON content type
    #[error("Content-Type must be application/json")]
    UnsupportedMediaType,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Store-level failure
    #[error("Database error: {0}")]
    Database(String),
}

impl ServiceError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::InvalidQueryParam(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError::Database(err.to_string())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
}

impl From<ServiceError> for ErrorResponse {
    fn from(err: ServiceError) -> Self {
        Self {
            status: err.status_code().as_u16(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
