//! HTTP adapter for checkout and payment reconciliation.
//!
//! - `POST /api/payments/checkout` - Enroll, paying if the course has a price
//! - `POST /api/payments/verify` - Verify a checkout session after redirect
//! - `POST /api/webhooks/stripe` - Handle Stripe webhook deliveries

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{payment_routes, webhook_routes};
