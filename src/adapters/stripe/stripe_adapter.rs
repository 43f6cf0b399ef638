//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` trait against the Stripe API:
//! hosted checkout sessions for one-time course purchases, settlement
//! lookups, and webhook verification.
//!
//! # Security
//!
//! - Webhook authenticity goes through the domain verifier (HMAC-SHA256,
//!   constant-time comparison, replay-window checks)
//! - Secrets handled via `secrecy::SecretString`

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::enrollment::StripeWebhookVerifier;
use crate::ports::{
    CheckoutSession, CheckoutSessionStatus, CreateCheckoutRequest, PaymentError, PaymentErrorCode,
    PaymentProvider, WebhookEvent, WebhookEventType,
};

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Webhook signing secret (whsec_...).
    webhook_secret: SecretString,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,

    /// Whether to reject test-mode events (production).
    require_livemode: bool,
}

impl StripeConfig {
    pub fn new(api_key: impl Into<String>, webhook_secret: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            webhook_secret: SecretString::new(webhook_secret.into()),
            api_base_url: "https://api.stripe.com".to_string(),
            require_livemode: false,
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Require livemode events in production.
    pub fn with_require_livemode(mut self, require: bool) -> Self {
        self.require_livemode = require;
        self
    }
}

// Stripe API response shapes, reduced to the fields this adapter reads.

#[derive(Debug, Deserialize)]
struct StripeCheckoutSessionResponse {
    id: String,
    url: Option<String>,
    /// "paid", "unpaid" or "no_payment_required".
    payment_status: String,
}

/// Stripe payment provider adapter.
pub struct StripePaymentAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
    verifier: StripeWebhookVerifier,
}

impl StripePaymentAdapter {
    pub fn new(config: StripeConfig) -> Self {
        let verifier = StripeWebhookVerifier::new(config.webhook_secret.expose_secret());
        Self {
            config,
            http_client: reqwest::Client::new(),
            verifier,
        }
    }

    fn provider_error(context: &str, detail: impl std::fmt::Display) -> PaymentError {
        PaymentError::new(
            PaymentErrorCode::ProviderError,
            format!("{}: {}", context, detail),
        )
    }
}

#[async_trait]
impl PaymentProvider for StripePaymentAdapter {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        let params = vec![
            ("mode", "payment".to_string()),
            ("line_items[0][price_data][currency]", "usd".to_string()),
            (
                "line_items[0][price_data][unit_amount]",
                request.amount_cents.to_string(),
            ),
            (
                "line_items[0][price_data][product_data][name]",
                request.course_title,
            ),
            ("line_items[0][quantity]", "1".to_string()),
            ("success_url", request.success_url),
            ("cancel_url", request.cancel_url),
            ("metadata[student_id]", request.student_id.to_string()),
            ("metadata[course_id]", request.course_id.to_string()),
            (
                "metadata[enrollment_id]",
                request.enrollment_id.to_string(),
            ),
        ];

        tracing::debug!(
            course_id = %request.course_id,
            amount_cents = request.amount_cents,
            "Creating Stripe checkout session"
        );

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(error = %error_text, "Stripe checkout session creation failed");
            return Err(Self::provider_error("Stripe API error", error_text));
        }

        let session: StripeCheckoutSessionResponse = response
            .json()
            .await
            .map_err(|e| Self::provider_error("Failed to parse Stripe response", e))?;

        let url = session
            .url
            .unwrap_or_else(|| format!("https://checkout.stripe.com/c/pay/{}", session.id));

        Ok(CheckoutSession {
            id: session.id,
            url,
        })
    }

    async fn get_checkout_session(
        &self,
        session_id: &str,
    ) -> Result<Option<CheckoutSessionStatus>, PaymentError> {
        let url = format!(
            "{}/v1/checkout/sessions/{}",
            self.config.api_base_url, session_id
        );

        let response = self
            .http_client
            .get(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Self::provider_error("Stripe API error", error_text));
        }

        let session: StripeCheckoutSessionResponse = response
            .json()
            .await
            .map_err(|e| Self::provider_error("Failed to parse Stripe response", e))?;

        Ok(Some(CheckoutSessionStatus {
            id: session.id,
            settled: session.payment_status == "paid",
        }))
    }

    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, PaymentError> {
        let event = self
            .verifier
            .verify_and_parse(payload, signature)
            .map_err(|e| {
                tracing::warn!(error = %e, "Webhook signature verification failed");
                PaymentError::invalid_webhook(e.to_string())
            })?;

        if self.config.require_livemode && !event.livemode {
            tracing::warn!(event_id = %event.id, "Rejected test mode event in production");
            return Err(PaymentError::invalid_webhook(
                "Test mode events not allowed in production",
            ));
        }

        let session_id = event
            .data
            .object
            .get("id")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());

        let webhook_event = WebhookEvent {
            id: event.id.clone(),
            event_type: WebhookEventType::from_str(&event.event_type),
            session_id,
            created_at: event.created,
        };

        tracing::info!(
            event_id = %webhook_event.id,
            event_type = ?webhook_event.event_type,
            "Webhook signature verified"
        );

        Ok(webhook_event)
    }
}
