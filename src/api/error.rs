//! API error handling.
//!
//! This module provides error types and response formatting for the API.
//! Every error body carries a stable machine-readable `code` next to a
//! human-readable `message`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::domain::InvalidTodoId;
use crate::infrastructure::RepositoryError;

// =============================================================================
// Error Kind
// =============================================================================

/// The kinds of error the API reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required field is missing or blank.
    Validation,
    /// A path parameter is not a valid todo ID.
    InvalidId,
    /// The request body is not valid JSON for the endpoint.
    InvalidBody,
    /// The storage backend failed.
    Storage,
}

impl ErrorKind {
    /// Stable code for programmatic handling.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::InvalidId => "INVALID_ID",
            Self::InvalidBody => "INVALID_BODY",
            Self::Storage => "STORAGE_ERROR",
        }
    }

    /// HTTP status for this kind.
    #[must_use]
    pub const fn status(self) -> StatusCode {
        match self {
            Self::Validation | Self::InvalidId | Self::InvalidBody => StatusCode::BAD_REQUEST,
            Self::Storage => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// =============================================================================
// API Error
// =============================================================================

/// API error structure for JSON responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional field-level errors for validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
    /// Underlying error detail, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            code: kind.code().to_string(),
            message: message.into(),
            details: None,
            error: None,
        }
    }
}

/// Field-level error for validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the field that failed validation.
    pub field: String,
    /// Error message for this field.
    pub message: String,
}

impl FieldError {
    /// Creates a new field error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

// =============================================================================
// API Error Response
// =============================================================================

/// API error response containing status code and error details.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Error details.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a new API error response.
    #[must_use]
    pub const fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    fn of_kind(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::new(kind.status(), ApiError::new(kind, message))
    }

    /// Creates a 400 Bad Request response for validation errors.
    #[must_use]
    pub fn validation_error(message: impl Into<String>, details: Vec<FieldError>) -> Self {
        let mut response = Self::of_kind(ErrorKind::Validation, message);
        response.error.details = Some(details);
        response
    }

    /// Creates a 400 Bad Request response for a malformed todo ID.
    #[must_use]
    pub fn invalid_id(error: &InvalidTodoId) -> Self {
        Self::of_kind(ErrorKind::InvalidId, error.to_string())
    }

    /// Creates a 400 Bad Request response for an unreadable request body.
    #[must_use]
    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self::of_kind(ErrorKind::InvalidBody, message)
    }

    /// Creates a 500 Internal Server Error response for a storage failure.
    ///
    /// `message` describes the failed operation; the repository error is
    /// passed through in the `error` field.
    #[must_use]
    pub fn storage(message: impl Into<String>, error: &RepositoryError) -> Self {
        tracing::error!(%error, "Storage error");
        let mut response = Self::of_kind(ErrorKind::Storage, message);
        response.error.error = Some(error.to_string());
        response
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<InvalidTodoId> for ApiErrorResponse {
    fn from(error: InvalidTodoId) -> Self {
        Self::invalid_id(&error)
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Validation error type for request validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Summary shown as the response message.
    pub message: String,
    /// Field-level errors.
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Creates a validation error with a single field error.
    ///
    /// The field message doubles as the summary.
    #[must_use]
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            errors: vec![FieldError::new(field, message.clone())],
            message,
        }
    }
}

impl From<ValidationError> for ApiErrorResponse {
    fn from(error: ValidationError) -> Self {
        Self::validation_error(error.message, error.errors)
    }
}

// =============================================================================
// Tests
// =============================================================================
