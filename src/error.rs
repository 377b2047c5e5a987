//! Unified error types for the family API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::family::MemberField;

/// Process-level error type: startup, configuration and serving.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Prometheus exporter could not be installed.
    #[error("metrics error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Create-payload validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Body parsed as JSON but is not an object.
    #[error("request body must be a JSON object")]
    NotAnObject,

    /// Field missing, wrong type or blank.
    #[error("{0} is required")]
    Required(MemberField),

    /// Field could not be coerced to an integer.
    #[error("{0} must be an integer")]
    NotAnInteger(MemberField),

    /// Field must be strictly positive.
    #[error("{0} must be > 0")]
    NotPositive(MemberField),

    /// Integer does not fit the stored type.
    #[error("{0} is out of range")]
    OutOfRange(MemberField),

    /// Field must be a JSON array.
    #[error("{0} must be a list")]
    NotAList(MemberField),

    /// Array holds an element that is not an integer.
    #[error("{0} must contain only integers")]
    NonIntegerElement(MemberField),
}

impl ValidationError {
    /// The field this error refers to.
    pub fn field(&self) -> MemberField {
        match self {
            ValidationError::NotAnObject => MemberField::Body,
            ValidationError::Required(field)
            | ValidationError::NotAnInteger(field)
            | ValidationError::NotPositive(field)
            | ValidationError::OutOfRange(field)
            | ValidationError::NotAList(field)
            | ValidationError::NonIntegerElement(field) => *field,
        }
    }
}

/// HTTP-facing error, rendered as `{"error": "..."}`.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed request (content type, unparseable body).
    #[error("{0}")]
    BadRequest(String),

    /// Body parsed but failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Requested resource does not exist.
    #[error("{0}")]
    NotFound(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// The canonical 404 for a missing member.
    pub fn member_not_found() -> Self {
        Self::not_found("Member not found")
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type for handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
