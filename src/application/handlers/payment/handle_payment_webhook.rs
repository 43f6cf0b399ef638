//! HandlePaymentWebhookHandler - provider-pushed confirmation path.
//!
//! Verifies the delivery's authenticity (fail closed), then runs the
//! same idempotent transition as the client verify path for
//! `checkout.session.completed` events. Other event types are
//! acknowledged without side effects so the provider stops retrying.

use std::sync::Arc;

use crate::domain::enrollment::EnrollmentError;
use crate::ports::{PaymentProvider, WebhookEventType};

use super::confirm_payment::ConfirmPaymentHandler;

/// Outcome of processing one webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// A settlement event was applied (or re-observed) successfully.
    Confirmed { newly_confirmed: bool },

    /// The event type carries no action for this service.
    Ignored { event_type: String },
}

/// Handler for provider webhook deliveries.
pub struct HandlePaymentWebhookHandler {
    payment_provider: Arc<dyn PaymentProvider>,
    confirm: ConfirmPaymentHandler,
}

impl HandlePaymentWebhookHandler {
    pub fn new(
        payment_provider: Arc<dyn PaymentProvider>,
        confirm: ConfirmPaymentHandler,
    ) -> Self {
        Self {
            payment_provider,
            confirm,
        }
    }

    pub async fn handle(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookOutcome, EnrollmentError> {
        let event = self
            .payment_provider
            .verify_webhook(payload, signature)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected webhook delivery");
                EnrollmentError::invalid_webhook_signature()
            })?;

        match event.event_type {
            WebhookEventType::CheckoutSessionCompleted => {
                let session_id = event.session_id.ok_or_else(|| {
                    EnrollmentError::validation("session_id", "missing from settlement event")
                })?;

                let result = self.confirm.handle(&session_id).await?;
                Ok(WebhookOutcome::Confirmed {
                    newly_confirmed: result.newly_confirmed,
                })
            }
            other => {
                tracing::debug!(
                    event_id = %event.id,
                    event_type = other.as_str(),
                    "Ignoring webhook event type"
                );
                Ok(WebhookOutcome::Ignored {
                    event_type: other.as_str().to_string(),
                })
            }
        }
    }
}
