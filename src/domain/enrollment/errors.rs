//! Enrollment-specific error types.
//!
//! Errors related to enrollment operations, assessment handling, and
//! payment reconciliation.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound / CourseNotFound / QuizNotFound / SubmissionNotFound | 404 |
//! | AlreadyEnrolled | 409 |
//! | NotEligible | 402 |
//! | InvalidDecision | 400 |
//! | PaymentIncomplete | 400 |
//! | PaymentFailed | 402 |
//! | InvalidWebhookSignature | 401 |
//! | Forbidden | 403 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{
    CourseId, DomainError, EnrollmentId, ErrorCode, MilestoneId, StudentId, UnitId,
};

/// Enrollment-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrollmentError {
    /// Enrollment was not found by id.
    NotFound(EnrollmentId),

    /// No enrollment exists for this student/course pair.
    NotFoundForCourse { student: StudentId, course: CourseId },

    /// No enrollment carries this checkout session id.
    NotFoundForSession(String),

    /// Course does not exist in the catalog.
    CourseNotFound(CourseId),

    /// Student already has an enrollment for this course.
    AlreadyEnrolled { student: StudentId, course: CourseId },

    /// Enrollment payment is not completed, so the operation is not allowed.
    NotEligible { payment_status: String },

    /// The unit has no quiz (or the quiz has no questions).
    QuizNotFound(UnitId),

    /// No assignment submission exists for this milestone.
    SubmissionNotFound(MilestoneId),

    /// Review decision is not one of the accepted values.
    InvalidDecision(String),

    /// Checkout session exists but the provider has not settled it.
    PaymentIncomplete(String),

    /// Payment provider call failed.
    PaymentFailed { reason: String },

    /// Invalid state for the requested operation.
    InvalidState { current: String, attempted: String },

    /// Webhook signature verification failed.
    InvalidWebhookSignature,

    /// Caller is not allowed to act on this enrollment.
    Forbidden(String),

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl EnrollmentError {
    // Constructor functions for cleaner error creation

    pub fn not_found(id: EnrollmentId) -> Self {
        EnrollmentError::NotFound(id)
    }

    pub fn not_found_for_course(student: StudentId, course: CourseId) -> Self {
        EnrollmentError::NotFoundForCourse { student, course }
    }

    pub fn not_found_for_session(session_id: impl Into<String>) -> Self {
        EnrollmentError::NotFoundForSession(session_id.into())
    }

    pub fn course_not_found(course: CourseId) -> Self {
        EnrollmentError::CourseNotFound(course)
    }

    pub fn already_enrolled(student: StudentId, course: CourseId) -> Self {
        EnrollmentError::AlreadyEnrolled { student, course }
    }

    pub fn not_eligible(payment_status: impl Into<String>) -> Self {
        EnrollmentError::NotEligible {
            payment_status: payment_status.into(),
        }
    }

    pub fn quiz_not_found(unit: UnitId) -> Self {
        EnrollmentError::QuizNotFound(unit)
    }

    pub fn submission_not_found(milestone: MilestoneId) -> Self {
        EnrollmentError::SubmissionNotFound(milestone)
    }

    pub fn invalid_decision(decision: impl Into<String>) -> Self {
        EnrollmentError::InvalidDecision(decision.into())
    }

    pub fn payment_incomplete(session_id: impl Into<String>) -> Self {
        EnrollmentError::PaymentIncomplete(session_id.into())
    }

    pub fn payment_failed(reason: impl Into<String>) -> Self {
        EnrollmentError::PaymentFailed {
            reason: reason.into(),
        }
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        EnrollmentError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn invalid_webhook_signature() -> Self {
        EnrollmentError::InvalidWebhookSignature
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        EnrollmentError::Forbidden(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EnrollmentError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        EnrollmentError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            EnrollmentError::NotFound(_)
            | EnrollmentError::NotFoundForCourse { .. }
            | EnrollmentError::NotFoundForSession(_) => ErrorCode::EnrollmentNotFound,
            EnrollmentError::CourseNotFound(_) => ErrorCode::CourseNotFound,
            EnrollmentError::AlreadyEnrolled { .. } => ErrorCode::AlreadyEnrolled,
            EnrollmentError::NotEligible { .. } => ErrorCode::NotEligible,
            EnrollmentError::QuizNotFound(_) => ErrorCode::QuizNotFound,
            EnrollmentError::SubmissionNotFound(_) => ErrorCode::SubmissionNotFound,
            EnrollmentError::InvalidDecision(_) => ErrorCode::InvalidDecision,
            EnrollmentError::PaymentIncomplete(_) => ErrorCode::PaymentIncomplete,
            EnrollmentError::PaymentFailed { .. } => ErrorCode::PaymentProviderError,
            EnrollmentError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            EnrollmentError::InvalidWebhookSignature => ErrorCode::InvalidWebhookSignature,
            EnrollmentError::Forbidden(_) => ErrorCode::Forbidden,
            EnrollmentError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            EnrollmentError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            EnrollmentError::NotFound(id) => format!("Enrollment not found: {}", id),
            EnrollmentError::NotFoundForCourse { student, course } => {
                format!("No enrollment for student {} in course {}", student, course)
            }
            EnrollmentError::NotFoundForSession(session_id) => {
                format!("No enrollment for checkout session {}", session_id)
            }
            EnrollmentError::CourseNotFound(course) => format!("Course not found: {}", course),
            EnrollmentError::AlreadyEnrolled { student, course } => {
                format!("Student {} is already enrolled in course {}", student, course)
            }
            EnrollmentError::NotEligible { payment_status } => {
                format!(
                    "Enrollment payment is '{}'; progress and assessments require a completed payment",
                    payment_status
                )
            }
            EnrollmentError::QuizNotFound(unit) => format!("No quiz found for unit {}", unit),
            EnrollmentError::SubmissionNotFound(milestone) => {
                format!("No assignment submission for milestone {}", milestone)
            }
            EnrollmentError::InvalidDecision(decision) => {
                format!(
                    "Invalid review decision '{}', expected approved, rejected or reviewed",
                    decision
                )
            }
            EnrollmentError::PaymentIncomplete(session_id) => {
                format!("Payment for session {} has not settled", session_id)
            }
            EnrollmentError::PaymentFailed { reason } => format!("Payment failed: {}", reason),
            EnrollmentError::InvalidState { current, attempted } => {
                format!("Cannot {} enrollment in {} state", attempted, current)
            }
            EnrollmentError::InvalidWebhookSignature => "Invalid webhook signature".to_string(),
            EnrollmentError::Forbidden(message) => message.clone(),
            EnrollmentError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            EnrollmentError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Returns true if this error should trigger a retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            EnrollmentError::Infrastructure(_) | EnrollmentError::PaymentFailed { .. }
        )
    }
}

impl std::fmt::Display for EnrollmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for EnrollmentError {}

impl From<DomainError> for EnrollmentError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::PaymentProviderError => EnrollmentError::PaymentFailed {
                reason: err.to_string(),
            },
            ErrorCode::InvalidStateTransition => EnrollmentError::InvalidState {
                current: "unknown".to_string(),
                attempted: err.to_string(),
            },
            ErrorCode::InvalidWebhookSignature => EnrollmentError::InvalidWebhookSignature,
            ErrorCode::Forbidden => EnrollmentError::Forbidden(err.to_string()),
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => EnrollmentError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.to_string(),
            },
            _ => EnrollmentError::Infrastructure(err.to_string()),
        }
    }
}

impl From<EnrollmentError> for DomainError {
    fn from(err: EnrollmentError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
