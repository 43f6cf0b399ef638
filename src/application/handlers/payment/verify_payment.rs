//! VerifyPaymentHandler - client-initiated settlement check.
//!
//! Thin entry point over the shared confirmation transition: looks up
//! the enrollment for the session, asks the provider whether the
//! session settled, then delegates to `ConfirmPaymentHandler`.

use std::sync::Arc;

use crate::domain::enrollment::EnrollmentError;
use crate::ports::{EnrollmentRepository, PaymentProvider};

use super::confirm_payment::{ConfirmPaymentHandler, ConfirmPaymentResult};

/// Handler for the client-initiated verify call.
pub struct VerifyPaymentHandler {
    repository: Arc<dyn EnrollmentRepository>,
    payment_provider: Arc<dyn PaymentProvider>,
    confirm: ConfirmPaymentHandler,
}

impl VerifyPaymentHandler {
    pub fn new(
        repository: Arc<dyn EnrollmentRepository>,
        payment_provider: Arc<dyn PaymentProvider>,
    ) -> Self {
        Self {
            confirm: ConfirmPaymentHandler::new(repository.clone()),
            repository,
            payment_provider,
        }
    }

    pub async fn handle(&self, session_id: &str) -> Result<ConfirmPaymentResult, EnrollmentError> {
        // The session must belong to a known enrollment before we spend
        // a provider round-trip on it.
        self.repository
            .find_by_payment_id(session_id)
            .await?
            .ok_or_else(|| EnrollmentError::not_found_for_session(session_id))?;

        let status = self
            .payment_provider
            .get_checkout_session(session_id)
            .await
            .map_err(|e| EnrollmentError::payment_failed(e.message))?
            .ok_or_else(|| EnrollmentError::not_found_for_session(session_id))?;

        if !status.settled {
            return Err(EnrollmentError::payment_incomplete(session_id));
        }

        self.confirm.handle(session_id).await
    }
}
