//! ConfirmPaymentHandler - the single idempotent payment transition.
//!
//! Both confirmation paths (client verify and provider webhook) end
//! here, so they can never diverge in side effects. The repository's
//! conditional update guarantees that under a race exactly one caller
//! applies the transition and the other observes it already applied.

use std::sync::Arc;

use crate::domain::enrollment::{Enrollment, EnrollmentError};
use crate::ports::EnrollmentRepository;

/// Result of confirming a checkout session.
#[derive(Debug, Clone)]
pub struct ConfirmPaymentResult {
    pub enrollment: Enrollment,
    /// True when this call performed the pending -> completed transition.
    pub newly_confirmed: bool,
}

/// Applies the pending -> completed transition for a checkout session.
pub struct ConfirmPaymentHandler {
    repository: Arc<dyn EnrollmentRepository>,
}

impl ConfirmPaymentHandler {
    pub fn new(repository: Arc<dyn EnrollmentRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, session_id: &str) -> Result<ConfirmPaymentResult, EnrollmentError> {
        let transition = self
            .repository
            .complete_payment(session_id)
            .await?
            .ok_or_else(|| EnrollmentError::not_found_for_session(session_id))?;

        let newly_confirmed = transition.was_applied();
        let enrollment = transition.into_enrollment();

        if newly_confirmed {
            tracing::info!(
                enrollment_id = %enrollment.id,
                session_id,
                "Payment confirmed, enrollment activated"
            );
        } else {
            tracing::debug!(
                enrollment_id = %enrollment.id,
                session_id,
                "Payment already confirmed, no-op"
            );
        }

        Ok(ConfirmPaymentResult {
            enrollment,
            newly_confirmed,
        })
    }
}
