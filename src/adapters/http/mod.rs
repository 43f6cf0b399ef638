//! HTTP adapters - REST API implementations.
//!
//! Route modules by surface: `enrollment` (student-facing), `payment`
//! (checkout and reconciliation), `admin` (review and reporting).
//! `error` holds the single domain-error-to-status mapping and
//! `middleware` the Bearer-token layer.

pub mod admin;
pub mod enrollment;
pub mod error;
pub mod middleware;
pub mod payment;

use std::sync::Arc;

use axum::Router;

use crate::application::handlers::admin::{
    GetCourseRosterHandler, GetEnrollmentStatsHandler, ListReviewQueueHandler,
    ReviewSubmissionHandler,
};
use crate::application::handlers::enrollment::{
    CheckEnrollmentHandler, GetEnrollmentDetailsHandler, GetStudentEnrollmentsHandler,
    MarkUnitCompleteHandler, SubmitAssignmentHandler, SubmitQuizHandler,
};
use crate::application::handlers::payment::{
    ConfirmPaymentHandler, HandlePaymentWebhookHandler, InitiateCheckoutHandler,
    VerifyPaymentHandler,
};
use crate::ports::{CourseCatalog, EnrollmentReader, EnrollmentRepository, PaymentProvider};

pub use error::{ApiError, ErrorResponse};
pub use middleware::{auth_middleware, AuthState, RequireAdmin, RequireAuth};

/// Shared application state containing all dependencies.
///
/// Cloned per request; all fields are Arc-wrapped ports so handlers can
/// be constructed on demand.
#[derive(Clone)]
pub struct AppState {
    pub enrollment_repository: Arc<dyn EnrollmentRepository>,
    pub enrollment_reader: Arc<dyn EnrollmentReader>,
    pub course_catalog: Arc<dyn CourseCatalog>,
    pub payment_provider: Arc<dyn PaymentProvider>,
}

impl AppState {
    // Student-facing handlers

    pub fn list_enrollments_handler(&self) -> GetStudentEnrollmentsHandler {
        GetStudentEnrollmentsHandler::new(self.enrollment_reader.clone())
    }

    pub fn enrollment_details_handler(&self) -> GetEnrollmentDetailsHandler {
        GetEnrollmentDetailsHandler::new(self.enrollment_repository.clone())
    }

    pub fn check_enrollment_handler(&self) -> CheckEnrollmentHandler {
        CheckEnrollmentHandler::new(self.enrollment_repository.clone())
    }

    pub fn mark_unit_complete_handler(&self) -> MarkUnitCompleteHandler {
        MarkUnitCompleteHandler::new(
            self.enrollment_repository.clone(),
            self.course_catalog.clone(),
        )
    }

    pub fn submit_quiz_handler(&self) -> SubmitQuizHandler {
        SubmitQuizHandler::new(
            self.enrollment_repository.clone(),
            self.course_catalog.clone(),
        )
    }

    pub fn submit_assignment_handler(&self) -> SubmitAssignmentHandler {
        SubmitAssignmentHandler::new(
            self.enrollment_repository.clone(),
            self.course_catalog.clone(),
        )
    }

    // Payment handlers

    pub fn initiate_checkout_handler(&self) -> InitiateCheckoutHandler {
        InitiateCheckoutHandler::new(
            self.enrollment_repository.clone(),
            self.course_catalog.clone(),
            self.payment_provider.clone(),
        )
    }

    pub fn verify_payment_handler(&self) -> VerifyPaymentHandler {
        VerifyPaymentHandler::new(
            self.enrollment_repository.clone(),
            self.payment_provider.clone(),
        )
    }

    pub fn webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(
            self.payment_provider.clone(),
            ConfirmPaymentHandler::new(self.enrollment_repository.clone()),
        )
    }

    // Admin handlers

    pub fn review_submission_handler(&self) -> ReviewSubmissionHandler {
        ReviewSubmissionHandler::new(self.enrollment_repository.clone())
    }

    pub fn review_queue_handler(&self) -> ListReviewQueueHandler {
        ListReviewQueueHandler::new(self.enrollment_reader.clone())
    }

    pub fn course_roster_handler(&self) -> GetCourseRosterHandler {
        GetCourseRosterHandler::new(self.enrollment_reader.clone())
    }

    pub fn enrollment_stats_handler(&self) -> GetEnrollmentStatsHandler {
        GetEnrollmentStatsHandler::new(self.enrollment_reader.clone())
    }
}

/// Builds the complete API router, suitable for mounting at `/api`.
///
/// - `/enrollments` - student endpoints (Bearer auth)
/// - `/payments` - checkout and verify (Bearer auth)
/// - `/webhooks` - provider deliveries (signature auth, no Bearer)
/// - `/admin` - review and reporting (Bearer auth + admin role)
pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/enrollments", enrollment::enrollment_routes())
        .nest("/payments", payment::payment_routes())
        .nest("/webhooks", payment::webhook_routes())
        .nest("/admin", admin::admin_routes())
}
