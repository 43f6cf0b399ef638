//! Axum router configuration for payment endpoints.

use axum::{routing::post, Router};

use super::super::AppState;
use super::handlers::{handle_stripe_webhook, initiate_checkout, verify_payment};

/// Create the payment API router.
///
/// # Routes (require authentication)
/// - `POST /checkout` - Enroll in a course, paying if it has a price
/// - `POST /verify` - Verify a checkout session after redirect
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(initiate_checkout))
        .route("/verify", post(verify_payment))
}

/// Create the webhook router.
///
/// Separate from the payment routes because webhooks carry no Bearer
/// auth; they are authenticated by provider signature.
///
/// # Routes
/// - `POST /stripe` - Handle Stripe webhook deliveries
pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/stripe", post(handle_stripe_webhook))
}
