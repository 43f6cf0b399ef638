//! Enrollment module - the core aggregate and its collaborators.

mod aggregate;
mod assessment;
mod errors;
mod payment_status;
mod progress;
mod status;
mod stripe_event;
mod webhook_errors;
mod webhook_verifier;

pub use aggregate::Enrollment;
pub use assessment::{
    grade_quiz, AssignmentSubmission, QuizAttempt, QuizGrade, ReviewDecision, SubmissionStatus,
};
pub use errors::EnrollmentError;
pub use payment_status::PaymentStatus;
pub use progress::compute_progress;
pub use status::EnrollmentStatus;
pub use stripe_event::{StripeEvent, StripeEventData, StripeEventType};
pub use webhook_errors::WebhookError;
pub use webhook_verifier::{SignatureHeader, StripeWebhookVerifier};
