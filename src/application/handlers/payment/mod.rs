//! Payment reconciliation handlers.
//!
//! `initiate_checkout` opens the lifecycle; the two confirmation entry
//! points (`verify_payment`, `handle_payment_webhook`) are thin shells
//! over the single idempotent transition in `confirm_payment`.

mod confirm_payment;
mod handle_payment_webhook;
mod initiate_checkout;
mod verify_payment;

pub use confirm_payment::{ConfirmPaymentHandler, ConfirmPaymentResult};
pub use handle_payment_webhook::{HandlePaymentWebhookHandler, WebhookOutcome};
pub use initiate_checkout::{
    InitiateCheckoutCommand, InitiateCheckoutHandler, InitiateCheckoutResult,
};
pub use verify_payment::VerifyPaymentHandler;
