//! Stripe webhook signature verification.
//!
//! Implements secure verification of Stripe webhook signatures using
//! HMAC-SHA256, with timestamp validation to prevent replay attacks.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::stripe_event::StripeEvent;
use super::webhook_errors::WebhookError;

/// Maximum allowed age for webhook events (5 minutes).
const MAX_EVENT_AGE_SECS: i64 = 300;

/// Maximum allowed clock skew for future events (1 minute).
const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Parsed components from the Stripe-Signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Unix timestamp when the signature was generated.
    pub timestamp: i64,
    /// v1 signature (HMAC-SHA256).
    pub v1_signature: Vec<u8>,
}

impl SignatureHeader {
    /// Parses a Stripe-Signature header string.
    ///
    /// Format: `t=<timestamp>,v1=<signature>[,...]`. Unknown fields are
    /// ignored for forward compatibility.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::ParseError` if the header format is invalid.
    pub fn parse(header: &str) -> Result<Self, WebhookError> {
        let mut timestamp: Option<i64> = None;
        let mut v1_signature: Option<Vec<u8>> = None;

        for part in header.split(',') {
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| WebhookError::ParseError("invalid header format".to_string()))?;

            match key {
                "t" => {
                    timestamp = Some(value.parse().map_err(|_| {
                        WebhookError::ParseError("invalid timestamp".to_string())
                    })?);
                }
                "v1" => {
                    v1_signature = Some(hex::decode(value).map_err(|_| {
                        WebhookError::ParseError("invalid v1 signature hex".to_string())
                    })?);
                }
                _ => {}
            }
        }

        let timestamp =
            timestamp.ok_or_else(|| WebhookError::ParseError("missing timestamp".to_string()))?;
        let v1_signature = v1_signature
            .ok_or_else(|| WebhookError::ParseError("missing v1 signature".to_string()))?;

        Ok(SignatureHeader {
            timestamp,
            v1_signature,
        })
    }
}

/// Verifier for Stripe webhook signatures.
pub struct StripeWebhookVerifier {
    /// The webhook signing secret from the Stripe dashboard.
    secret: String,
}

impl StripeWebhookVerifier {
    /// Creates a new verifier with the given webhook secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Verifies the webhook signature and parses the event.
    ///
    /// # Verification Steps
    ///
    /// 1. Parse the signature header
    /// 2. Validate timestamp is within acceptable range
    /// 3. Compute expected signature using HMAC-SHA256
    /// 4. Compare signatures using constant-time comparison
    /// 5. Parse the JSON payload into a StripeEvent
    ///
    /// # Errors
    ///
    /// - `InvalidSignature` - Signature verification failed
    /// - `TimestampOutOfRange` - Event is older than 5 minutes
    /// - `InvalidTimestamp` - Event timestamp is in the future
    /// - `ParseError` - Failed to parse header or JSON payload
    pub fn verify_and_parse(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<StripeEvent, WebhookError> {
        let header = SignatureHeader::parse(signature_header)?;

        self.validate_timestamp(header.timestamp)?;

        let expected_signature = self.compute_signature(header.timestamp, payload);

        if !constant_time_compare(&expected_signature, &header.v1_signature) {
            return Err(WebhookError::InvalidSignature);
        }

        let event: StripeEvent = serde_json::from_slice(payload)
            .map_err(|e| WebhookError::ParseError(e.to_string()))?;

        Ok(event)
    }

    /// Builds a valid `Stripe-Signature` header for a payload.
    ///
    /// Used by the in-memory payment provider and test fixtures to
    /// produce events that pass the real verification path.
    pub fn sign(&self, timestamp: i64, payload: &[u8]) -> String {
        let signature = self.compute_signature(timestamp, payload);
        format!("t={},v1={}", timestamp, hex::encode(signature))
    }

    /// Validates that the timestamp is within acceptable bounds.
    fn validate_timestamp(&self, timestamp: i64) -> Result<(), WebhookError> {
        let now = chrono::Utc::now().timestamp();
        let age = now - timestamp;

        if age > MAX_EVENT_AGE_SECS {
            return Err(WebhookError::TimestampOutOfRange);
        }

        if age < -MAX_CLOCK_SKEW_SECS {
            return Err(WebhookError::InvalidTimestamp);
        }

        Ok(())
    }

    /// Computes the HMAC-SHA256 signature for the given timestamp and payload.
    fn compute_signature(&self, timestamp: i64, payload: &[u8]) -> Vec<u8> {
        let signed_payload = format!("{}.{}", timestamp, String::from_utf8_lossy(payload));

        let mut mac =
            Hmac::<Sha256>::new_from_slice(self.secret.as_bytes()).expect("HMAC accepts any key");
        mac.update(signed_payload.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}

/// Performs constant-time comparison of two byte slices.
///
/// Prevents timing attacks that could leak information about the
/// expected signature.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "whsec_test_secret_12345";

    fn valid_payload() -> &'static str {
        r#"{"id":"evt_1","type":"checkout.session.completed","created":1704067200,"data":{"object":{"id":"cs_test_1"}},"livemode":false}"#
    }

    // ══════════════════════════════════════════════════════════════
    // SignatureHeader Parsing Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn parse_header_with_v1_only() {
        let signature = "a".repeat(64);
        let header_str = format!("t=1234567890,v1={}", signature);

        let header = SignatureHeader::parse(&header_str).unwrap();

        assert_eq!(header.timestamp, 1234567890);
        assert_eq!(header.v1_signature.len(), 32);
    }

    #[test]
    fn parse_header_ignores_unknown_fields() {
        let signature = "a".repeat(64);
        let header_str = format!("t=1234567890,v1={},v0=legacy,scheme=hmac", signature);

        let header = SignatureHeader::parse(&header_str).unwrap();
        assert_eq!(header.timestamp, 1234567890);
    }

    #[test]
    fn parse_header_missing_timestamp_fails() {
        let result = SignatureHeader::parse(&format!("v1={}", "a".repeat(64)));
        assert!(matches!(result, Err(WebhookError::ParseError(_))));
    }

    #[test]
    fn parse_header_missing_v1_fails() {
        let result = SignatureHeader::parse("t=1234567890");
        assert!(matches!(result, Err(WebhookError::ParseError(_))));
    }

    #[test]
    fn parse_header_invalid_hex_fails() {
        let result = SignatureHeader::parse("t=1234567890,v1=not-hex!");
        assert!(matches!(result, Err(WebhookError::ParseError(_))));
    }

    // ══════════════════════════════════════════════════════════════
    // Verification Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn valid_signature_verifies_and_parses() {
        let verifier = StripeWebhookVerifier::new(TEST_SECRET);
        let payload = valid_payload();
        let now = chrono::Utc::now().timestamp();
        let header = verifier.sign(now, payload.as_bytes());

        let event = verifier.verify_and_parse(payload.as_bytes(), &header).unwrap();
        assert_eq!(event.id, "evt_1");
        assert_eq!(event.event_type, "checkout.session.completed");
    }

    #[test]
    fn wrong_secret_fails_verification() {
        let signer = StripeWebhookVerifier::new("whsec_other_secret");
        let verifier = StripeWebhookVerifier::new(TEST_SECRET);
        let payload = valid_payload();
        let now = chrono::Utc::now().timestamp();
        let header = signer.sign(now, payload.as_bytes());

        let result = verifier.verify_and_parse(payload.as_bytes(), &header);
        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
    }

    #[test]
    fn tampered_payload_fails_verification() {
        let verifier = StripeWebhookVerifier::new(TEST_SECRET);
        let payload = valid_payload();
        let now = chrono::Utc::now().timestamp();
        let header = verifier.sign(now, payload.as_bytes());

        let tampered = payload.replace("cs_test_1", "cs_test_2");
        let result = verifier.verify_and_parse(tampered.as_bytes(), &header);
        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
    }

    #[test]
    fn old_event_is_rejected() {
        let verifier = StripeWebhookVerifier::new(TEST_SECRET);
        let payload = valid_payload();
        let stale = chrono::Utc::now().timestamp() - MAX_EVENT_AGE_SECS - 10;
        let header = verifier.sign(stale, payload.as_bytes());

        let result = verifier.verify_and_parse(payload.as_bytes(), &header);
        assert!(matches!(result, Err(WebhookError::TimestampOutOfRange)));
    }

    #[test]
    fn future_event_beyond_skew_is_rejected() {
        let verifier = StripeWebhookVerifier::new(TEST_SECRET);
        let payload = valid_payload();
        let future = chrono::Utc::now().timestamp() + MAX_CLOCK_SKEW_SECS + 10;
        let header = verifier.sign(future, payload.as_bytes());

        let result = verifier.verify_and_parse(payload.as_bytes(), &header);
        assert!(matches!(result, Err(WebhookError::InvalidTimestamp)));
    }

    #[test]
    fn small_clock_skew_is_tolerated() {
        let verifier = StripeWebhookVerifier::new(TEST_SECRET);
        let payload = valid_payload();
        let slightly_ahead = chrono::Utc::now().timestamp() + 30;
        let header = verifier.sign(slightly_ahead, payload.as_bytes());

        assert!(verifier.verify_and_parse(payload.as_bytes(), &header).is_ok());
    }

    #[test]
    fn authentic_but_malformed_json_is_a_parse_error() {
        let verifier = StripeWebhookVerifier::new(TEST_SECRET);
        let payload = "not json at all";
        let now = chrono::Utc::now().timestamp();
        let header = verifier.sign(now, payload.as_bytes());

        let result = verifier.verify_and_parse(payload.as_bytes(), &header);
        assert!(matches!(result, Err(WebhookError::ParseError(_))));
    }

    #[test]
    fn constant_time_compare_handles_length_mismatch() {
        assert!(!constant_time_compare(b"abc", b"abcd"));
        assert!(constant_time_compare(b"abc", b"abc"));
        assert!(!constant_time_compare(b"abc", b"abd"));
    }
}
