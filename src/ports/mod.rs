//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `EnrollmentRepository` - Write side for the Enrollment aggregate
//! - `EnrollmentReader` - Query side for listings, rosters and stats
//! - `CourseCatalog` - Read-only course definitions
//!
//! ## Integration Ports
//!
//! - `PaymentProvider` - Checkout sessions and webhook verification
//! - `TokenVerifier` - Bearer token validation for the HTTP layer

mod course_catalog;
mod enrollment_reader;
mod enrollment_repository;
mod payment_provider;
mod token_verifier;

pub use course_catalog::CourseCatalog;
pub use enrollment_reader::{
    DailyEnrollmentCount, EnrollmentReader, EnrollmentStats, EnrollmentView, ReviewQueueEntry,
};
pub use enrollment_repository::{EnrollmentRepository, PaymentTransition};
pub use payment_provider::{
    CheckoutSession, CheckoutSessionStatus, CreateCheckoutRequest, PaymentError, PaymentErrorCode,
    PaymentProvider, WebhookEvent, WebhookEventType,
};
pub use token_verifier::TokenVerifier;
