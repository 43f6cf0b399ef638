//! HTTP handlers for checkout and payment reconciliation.
//!
//! The webhook endpoint carries no Bearer auth: the provider signature
//! is the authentication, verified inside the application handler.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::payment::{InitiateCheckoutCommand, InitiateCheckoutResult};
use crate::domain::enrollment::EnrollmentError;

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::AppState;
use super::dto::{
    CheckoutRequest, CheckoutResponse, EnrollmentSummary, VerifyPaymentRequest,
    VerifyPaymentResponse, WebhookAckResponse,
};

/// POST /api/payments/checkout - Enroll, paying if the course has a price
pub async fn initiate_checkout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CheckoutRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .initiate_checkout_handler()
        .handle(InitiateCheckoutCommand {
            student_id: user.id,
            course_id: request.course_id,
            success_url: request.success_url,
            cancel_url: request.cancel_url,
        })
        .await?;

    let response = match result {
        InitiateCheckoutResult::Enrolled(enrollment) => CheckoutResponse {
            enrollment: EnrollmentSummary::from(&enrollment),
            checkout_url: None,
        },
        InitiateCheckoutResult::CheckoutRequired {
            enrollment,
            checkout,
        } => CheckoutResponse {
            enrollment: EnrollmentSummary::from(&enrollment),
            checkout_url: Some(checkout.url),
        },
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/payments/verify - Client-initiated settlement check
pub async fn verify_payment(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(request): Json<VerifyPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .verify_payment_handler()
        .handle(&request.session_id)
        .await?;

    Ok(Json(VerifyPaymentResponse {
        enrollment: EnrollmentSummary::from(&result.enrollment),
        newly_confirmed: result.newly_confirmed,
    }))
}

/// POST /api/webhooks/stripe - Provider-pushed settlement events
pub async fn handle_stripe_webhook(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
    body: axum::body::Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let signature = headers
        .get("Stripe-Signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            EnrollmentError::validation("Stripe-Signature", "Missing Stripe-Signature header")
        })?;

    state.webhook_handler().handle(&body, signature).await?;

    Ok(Json(WebhookAckResponse { received: true }))
}
