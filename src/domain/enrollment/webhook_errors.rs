//! Webhook error types for Stripe webhook handling.
//!
//! All of these are answered with a deterministic rejection; signature
//! failures must never look different from each other to the sender.

use thiserror::Error;

/// Errors that occur during webhook verification.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Webhook signature verification failed.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Webhook timestamp is outside the acceptable window (5 minutes).
    #[error("Timestamp out of range")]
    TimestampOutOfRange,

    /// Event timestamp is in the future beyond clock skew tolerance.
    #[error("Invalid timestamp")]
    InvalidTimestamp,

    /// Failed to parse webhook payload or signature header.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Required field missing from webhook payload.
    #[error("Missing field: {0}")]
    MissingField(&'static str),
}

impl WebhookError {
    /// Returns true for failures of the authenticity check itself, as
    /// opposed to malformed-but-authentic payloads.
    pub fn is_signature_failure(&self) -> bool {
        matches!(
            self,
            WebhookError::InvalidSignature
                | WebhookError::TimestampOutOfRange
                | WebhookError::InvalidTimestamp
        )
    }
}
