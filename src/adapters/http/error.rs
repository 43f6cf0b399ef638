//! API error mapping.
//!
//! One error envelope for every endpoint: domain errors carry an
//! `ErrorCode`, and this module decides which HTTP status each code
//! maps to. Handlers return `Result<_, ApiError>` and rely on `?`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::enrollment::EnrollmentError;
use crate::domain::foundation::{AuthError, DomainError};

/// JSON error body returned by every endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }
}

/// API error type that converts domain errors to HTTP responses.
pub struct ApiError(EnrollmentError);

impl From<EnrollmentError> for ApiError {
    fn from(err: EnrollmentError) -> Self {
        Self(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err.into())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InsufficientPermissions => {
                Self(EnrollmentError::forbidden("Admin role required"))
            }
            other => Self(EnrollmentError::infrastructure(other.to_string())),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            EnrollmentError::NotFound(_)
            | EnrollmentError::NotFoundForCourse { .. }
            | EnrollmentError::NotFoundForSession(_) => {
                (StatusCode::NOT_FOUND, "ENROLLMENT_NOT_FOUND")
            }
            EnrollmentError::CourseNotFound(_) => (StatusCode::NOT_FOUND, "COURSE_NOT_FOUND"),
            EnrollmentError::AlreadyEnrolled { .. } => (StatusCode::CONFLICT, "ALREADY_ENROLLED"),
            EnrollmentError::NotEligible { .. } => (StatusCode::PAYMENT_REQUIRED, "NOT_ELIGIBLE"),
            EnrollmentError::QuizNotFound(_) => (StatusCode::NOT_FOUND, "QUIZ_NOT_FOUND"),
            EnrollmentError::SubmissionNotFound(_) => {
                (StatusCode::NOT_FOUND, "SUBMISSION_NOT_FOUND")
            }
            EnrollmentError::InvalidDecision(_) => (StatusCode::BAD_REQUEST, "INVALID_DECISION"),
            EnrollmentError::PaymentIncomplete(_) => {
                (StatusCode::PAYMENT_REQUIRED, "PAYMENT_INCOMPLETE")
            }
            EnrollmentError::PaymentFailed { .. } => {
                (StatusCode::PAYMENT_REQUIRED, "PAYMENT_FAILED")
            }
            EnrollmentError::InvalidState { .. } => {
                (StatusCode::CONFLICT, "INVALID_STATE_TRANSITION")
            }
            EnrollmentError::InvalidWebhookSignature => {
                (StatusCode::UNAUTHORIZED, "INVALID_WEBHOOK_SIGNATURE")
            }
            EnrollmentError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            EnrollmentError::ValidationFailed { .. } => {
                (StatusCode::BAD_REQUEST, "VALIDATION_FAILED")
            }
            EnrollmentError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        }

        let body = ErrorResponse::new(error_code, self.0.message());
        (status, Json(body)).into_response()
    }
}
