//! Payment provider port for checkout and webhook processing.
//!
//! Abstracts the payment provider (Stripe) behind a trait so handlers
//! never talk to the provider API directly. The contract covers the
//! three interactions the enrollment lifecycle needs: opening a hosted
//! checkout session, reading a session's settlement state back, and
//! authenticating webhook deliveries.

use crate::domain::foundation::{CourseId, DomainError, EnrollmentId, ErrorCode, StudentId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Request to create a hosted checkout session.
#[derive(Debug, Clone)]
pub struct CreateCheckoutRequest {
    /// Student opening the session.
    pub student_id: StudentId,
    /// Course being purchased.
    pub course_id: CourseId,
    /// Enrollment the session settles, carried as provider metadata.
    pub enrollment_id: EnrollmentId,
    /// Display name shown on the hosted checkout page.
    pub course_title: String,
    /// Amount in the smallest currency unit.
    pub amount_cents: i64,
    /// Where the provider redirects after a successful payment.
    pub success_url: String,
    /// Where the provider redirects if the student backs out.
    pub cancel_url: String,
}

/// A hosted checkout session created at the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider session id (`cs_...` at Stripe).
    pub id: String,
    /// URL the student is redirected to.
    pub url: String,
}

/// Settlement state of a checkout session as reported by the provider.
#[derive(Debug, Clone)]
pub struct CheckoutSessionStatus {
    /// Provider session id.
    pub id: String,
    /// True once the provider reports the session as paid.
    pub settled: bool,
}

/// Type of webhook event received from the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEventType {
    /// A checkout session finished with a successful payment.
    CheckoutSessionCompleted,
    /// A checkout session expired without payment.
    CheckoutSessionExpired,
    /// Any event type this service does not act on.
    Unknown(String),
}

impl WebhookEventType {
    pub fn from_str(s: &str) -> Self {
        match s {
            "checkout.session.completed" => WebhookEventType::CheckoutSessionCompleted,
            "checkout.session.expired" => WebhookEventType::CheckoutSessionExpired,
            other => WebhookEventType::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            WebhookEventType::CheckoutSessionCompleted => "checkout.session.completed",
            WebhookEventType::CheckoutSessionExpired => "checkout.session.expired",
            WebhookEventType::Unknown(s) => s,
        }
    }
}

/// A verified webhook event, reduced to what handlers act on.
#[derive(Debug, Clone)]
pub struct WebhookEvent {
    /// Provider event id (`evt_...` at Stripe).
    pub id: String,
    /// Classified event type.
    pub event_type: WebhookEventType,
    /// The checkout session the event refers to, when present.
    pub session_id: Option<String>,
    /// Unix timestamp the provider created the event.
    pub created_at: i64,
}

// ============================================================================
// Payment Errors
// ============================================================================

/// Error codes for payment operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentErrorCode {
    /// Network error communicating with payment provider.
    NetworkError,
    /// Authentication with the provider failed (bad API key).
    AuthenticationFailed,
    /// Requested resource not found at the provider.
    NotFound,
    /// Provider rate limit exceeded.
    RateLimitExceeded,
    /// Webhook signature verification failed.
    InvalidWebhook,
    /// Provider returned an error for the request itself.
    ProviderError,
    /// Unexpected error.
    Unknown,
}

impl PaymentErrorCode {
    /// Whether retrying the operation might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PaymentErrorCode::NetworkError | PaymentErrorCode::RateLimitExceeded
        )
    }
}

/// Error from payment provider operations.
#[derive(Debug, Clone)]
pub struct PaymentError {
    /// Classified error code.
    pub code: PaymentErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Raw error code from the provider, if any.
    pub provider_code: Option<String>,
    /// Whether the operation can be retried.
    pub retryable: bool,
}

impl PaymentError {
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            retryable: code.is_retryable(),
            code,
            message: message.into(),
            provider_code: None,
        }
    }

    pub fn with_provider_code(mut self, provider_code: impl Into<String>) -> Self {
        self.provider_code = Some(provider_code.into());
        self
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::AuthenticationFailed, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NotFound, message)
    }

    pub fn invalid_webhook(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::InvalidWebhook, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::ProviderError, message)
    }
}

impl fmt::Display for PaymentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Payment error ({:?}): {}", self.code, self.message)?;
        if let Some(code) = &self.provider_code {
            write!(f, " [provider: {}]", code)?;
        }
        Ok(())
    }
}

impl std::error::Error for PaymentError {}

impl From<PaymentError> for DomainError {
    fn from(err: PaymentError) -> Self {
        let code = match err.code {
            PaymentErrorCode::InvalidWebhook => ErrorCode::InvalidWebhookSignature,
            _ => ErrorCode::PaymentProviderError,
        };
        let mut domain_err = DomainError::new(code, err.message);
        if let Some(provider_code) = err.provider_code {
            domain_err = domain_err.with_detail("provider_code", provider_code);
        }
        domain_err
    }
}

// ============================================================================
// Payment Provider Trait
// ============================================================================

/// Port for payment provider integration.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Creates a hosted checkout session for a paid course.
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError>;

    /// Reads a checkout session's settlement state from the provider.
    ///
    /// Returns `None` when the provider does not know the session id.
    async fn get_checkout_session(
        &self,
        session_id: &str,
    ) -> Result<Option<CheckoutSessionStatus>, PaymentError>;

    /// Verifies a webhook delivery and classifies the event.
    ///
    /// # Errors
    ///
    /// Returns `InvalidWebhook` when the signature is not authentic or
    /// the timestamp is outside the acceptance window.
    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, PaymentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // ══════════════════════════════════════════════════════════════
    // Event Type Classification Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn known_event_types_round_trip() {
        assert_eq!(
            WebhookEventType::from_str("checkout.session.completed"),
            WebhookEventType::CheckoutSessionCompleted
        );
        assert_eq!(
            WebhookEventType::from_str("checkout.session.expired"),
            WebhookEventType::CheckoutSessionExpired
        );
        assert_eq!(
            WebhookEventType::CheckoutSessionCompleted.as_str(),
            "checkout.session.completed"
        );
    }

    #[test]
    fn unrecognized_event_types_are_preserved() {
        let event_type = WebhookEventType::from_str("invoice.paid");
        assert_eq!(
            event_type,
            WebhookEventType::Unknown("invoice.paid".to_string())
        );
        assert_eq!(event_type.as_str(), "invoice.paid");
    }

    // ══════════════════════════════════════════════════════════════
    // Payment Error Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn network_errors_are_retryable() {
        let err = PaymentError::network("connection refused");
        assert!(err.retryable);
        assert_eq!(err.code, PaymentErrorCode::NetworkError);
    }

    #[test]
    fn authentication_errors_are_not_retryable() {
        let err = PaymentError::authentication("invalid API key");
        assert!(!err.retryable);
    }

    #[test]
    fn rate_limit_is_retryable() {
        assert!(PaymentErrorCode::RateLimitExceeded.is_retryable());
    }

    #[test]
    fn provider_code_shows_in_display() {
        let err = PaymentError::provider("card declined").with_provider_code("card_declined");
        let display = format!("{}", err);
        assert!(display.contains("card declined"));
        assert!(display.contains("card_declined"));
    }

    #[test]
    fn invalid_webhook_converts_to_signature_error_code() {
        let err = PaymentError::invalid_webhook("bad signature");
        let domain: DomainError = err.into();
        assert_eq!(domain.code, ErrorCode::InvalidWebhookSignature);
    }

    #[test]
    fn other_errors_convert_to_provider_error_code() {
        let err = PaymentError::network("timeout");
        let domain: DomainError = err.into();
        assert_eq!(domain.code, ErrorCode::PaymentProviderError);
    }
}
