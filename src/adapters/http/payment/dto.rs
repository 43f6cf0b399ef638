//! HTTP DTOs for checkout and payment reconciliation endpoints.

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to enroll in a course, paying if it has a price.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    /// The course to enroll in.
    pub course_id: crate::domain::foundation::CourseId,
    /// URL to redirect after successful checkout.
    pub success_url: String,
    /// URL to redirect after cancelled checkout.
    pub cancel_url: String,
}

/// Request to verify a checkout session after redirect.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyPaymentRequest {
    /// The provider checkout session id.
    pub session_id: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response to checkout initiation.
///
/// `checkout_url` is null for free courses; the enrollment is already
/// live in that case.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    pub enrollment: EnrollmentSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_url: Option<String>,
}

/// Minimal enrollment echo used by the payment endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentSummary {
    pub id: String,
    pub course_id: String,
    pub payment_status: crate::domain::enrollment::PaymentStatus,
    pub progress: u8,
}

impl From<&crate::domain::enrollment::Enrollment> for EnrollmentSummary {
    fn from(enrollment: &crate::domain::enrollment::Enrollment) -> Self {
        Self {
            id: enrollment.id.to_string(),
            course_id: enrollment.course.to_string(),
            payment_status: enrollment.payment_status,
            progress: enrollment.progress.value(),
        }
    }
}

/// Response to payment verification.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyPaymentResponse {
    pub enrollment: EnrollmentSummary,
    /// False when an earlier verify or webhook already settled it.
    pub newly_confirmed: bool,
}

/// Acknowledgement body returned to the webhook sender.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookAckResponse {
    pub received: bool,
}
