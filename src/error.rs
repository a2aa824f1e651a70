//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1002,
///     "message": "missing required field: facultyName",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`GatewayError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                |
/// |-----------|-----------------|----------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request            |
/// | 2000–2999 | Not Found       | 404 Not Found              |
/// | 3000–3999 | Server          | 500 Internal Server Error  |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A required request field was absent or blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Class with the given ID was not found.
    #[error("class not found: {0}")]
    ClassNotFound(String),

    /// Student is not enrolled in the class (or in any class).
    #[error("student not enrolled: {0}")]
    StudentNotEnrolled(String),

    /// Faculty member is not assigned to the class.
    #[error("faculty not assigned to class: {0}")]
    FacultyNotAssigned(String),

    /// Faculty member teaches no class.
    #[error("no classes found for faculty: {0}")]
    NoClassesForFaculty(String),

    /// User is neither a student nor a faculty member of any class.
    #[error("no classes found for user: {0}")]
    NoClassesForUser(String),

    /// Roster or check-in store failure.
    #[error("store error: {0}")]
    StoreError(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::MissingField(_) => 1002,
            Self::ClassNotFound(_) => 2001,
            Self::StudentNotEnrolled(_) => 2002,
            Self::FacultyNotAssigned(_) => 2003,
            Self::NoClassesForFaculty(_) => 2004,
            Self::NoClassesForUser(_) => 2005,
            Self::StoreError(_) => 3001,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::MissingField(_) => StatusCode::BAD_REQUEST,
            Self::ClassNotFound(_)
            | Self::StudentNotEnrolled(_)
            | Self::FacultyNotAssigned(_)
            | Self::NoClassesForFaculty(_)
            | Self::NoClassesForUser(_) => StatusCode::NOT_FOUND,
            Self::StoreError(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client.
    ///
    /// Server-side failures are reported generically; their detail only
    /// goes to the log.
    fn public_message(&self) -> String {
        match self {
            Self::StoreError(_) => "failed to read or write the backing store".to_string(),
            Self::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<sqlx::Error> for GatewayError {
    fn from(err: sqlx::Error) -> Self {
        Self::StoreError(err.to_string())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.public_message(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
