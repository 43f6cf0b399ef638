//! Mock payment provider for testing.
//!
//! Configurable `PaymentProvider` implementation for unit and
//! integration tests. Supports:
//! - Issuing checkout sessions and marking them settled
//! - Error injection per method
//! - Call tracking
//! - Real webhook signatures through `StripeWebhookVerifier`

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::enrollment::StripeWebhookVerifier;
use crate::ports::{
    CheckoutSession, CheckoutSessionStatus, CreateCheckoutRequest, PaymentError, PaymentProvider,
    WebhookEvent, WebhookEventType,
};

const MOCK_WEBHOOK_SECRET: &str = "whsec_mock_secret";

/// Mock payment provider.
///
/// Sessions start unsettled; tests settle them with [`settle_session`]
/// and can then confirm through verify or a signed webhook.
///
/// [`settle_session`]: MockPaymentProvider::settle_session
pub struct MockPaymentProvider {
    inner: Arc<Mutex<MockState>>,
    verifier: StripeWebhookVerifier,
}

#[derive(Default)]
struct MockState {
    /// Issued sessions by id, with their settlement flag.
    sessions: HashMap<String, bool>,

    /// Monotonic counter for session ids.
    next_session: u64,

    /// Specific errors by method name.
    method_errors: HashMap<String, PaymentError>,

    /// Track method calls for assertions.
    call_log: Vec<String>,
}

impl Default for MockPaymentProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPaymentProvider {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockState::default())),
            verifier: StripeWebhookVerifier::new(MOCK_WEBHOOK_SECRET),
        }
    }

    /// Mark a session as paid at the "provider".
    pub fn settle_session(&self, session_id: &str) {
        self.inner
            .lock()
            .unwrap()
            .sessions
            .insert(session_id.to_string(), true);
    }

    /// Set an error for a specific method.
    pub fn set_method_error(&self, method: &str, error: PaymentError) {
        self.inner
            .lock()
            .unwrap()
            .method_errors
            .insert(method.to_string(), error);
    }

    /// Get count of calls to a method.
    pub fn call_count(&self, method: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .call_log
            .iter()
            .filter(|c| *c == method)
            .count()
    }

    /// Builds a `checkout.session.completed` payload with an authentic
    /// signature, as the provider would deliver it.
    pub fn signed_completed_webhook(&self, session_id: &str) -> (Vec<u8>, String) {
        let now = chrono::Utc::now().timestamp();
        let payload = serde_json::json!({
            "id": format!("evt_mock_{}", session_id),
            "type": "checkout.session.completed",
            "created": now,
            "data": { "object": { "id": session_id } },
            "livemode": false,
        })
        .to_string()
        .into_bytes();
        let signature = self.verifier.sign(now, &payload);
        (payload, signature)
    }

    fn record_call(&self, method: &str) {
        self.inner.lock().unwrap().call_log.push(method.to_string());
    }

    fn check_error(&self, method: &str) -> Result<(), PaymentError> {
        if let Some(error) = self.inner.lock().unwrap().method_errors.get(method) {
            return Err(error.clone());
        }
        Ok(())
    }
}

impl Clone for MockPaymentProvider {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            verifier: StripeWebhookVerifier::new(MOCK_WEBHOOK_SECRET),
        }
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        self.record_call("create_checkout_session");
        self.check_error("create_checkout_session")?;

        let mut state = self.inner.lock().unwrap();
        state.next_session += 1;
        let id = format!("cs_mock_{}", state.next_session);
        state.sessions.insert(id.clone(), false);

        // Metadata is carried by the real adapter; here only the URL
        // reflects what the student would be redirected to.
        let _ = request;

        Ok(CheckoutSession {
            url: format!("https://checkout.stripe.com/c/pay/{}", id),
            id,
        })
    }

    async fn get_checkout_session(
        &self,
        session_id: &str,
    ) -> Result<Option<CheckoutSessionStatus>, PaymentError> {
        self.record_call("get_checkout_session");
        self.check_error("get_checkout_session")?;

        let state = self.inner.lock().unwrap();
        Ok(state
            .sessions
            .get(session_id)
            .map(|&settled| CheckoutSessionStatus {
                id: session_id.to_string(),
                settled,
            }))
    }

    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, PaymentError> {
        self.record_call("verify_webhook");
        self.check_error("verify_webhook")?;

        let event = self
            .verifier
            .verify_and_parse(payload, signature)
            .map_err(|e| PaymentError::invalid_webhook(e.to_string()))?;

        let session_id = event
            .data
            .object
            .get("id")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());

        Ok(WebhookEvent {
            id: event.id.clone(),
            event_type: WebhookEventType::from_str(&event.event_type),
            session_id,
            created_at: event.created,
        })
    }
}
