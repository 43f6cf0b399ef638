//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod admin;
pub mod enrollment;
pub mod payment;

pub use admin::{
    GetCourseRosterHandler, GetEnrollmentStatsHandler, ListReviewQueueHandler,
    ReviewSubmissionCommand, ReviewSubmissionHandler,
};
pub use enrollment::{
    CheckEnrollmentHandler, EnrollmentAccess, GetEnrollmentDetailsHandler,
    GetStudentEnrollmentsHandler, MarkUnitCompleteCommand, MarkUnitCompleteHandler,
    MarkUnitCompleteResult, SubmitAssignmentCommand, SubmitAssignmentHandler, SubmitQuizCommand,
    SubmitQuizHandler, SubmitQuizResult,
};
pub use payment::{
    ConfirmPaymentHandler, ConfirmPaymentResult, HandlePaymentWebhookHandler,
    InitiateCheckoutCommand, InitiateCheckoutHandler, InitiateCheckoutResult, VerifyPaymentHandler,
    WebhookOutcome,
};
