//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - JWT token verification
//! - `http` - Axum routes, handlers and middleware
//! - `memory` - In-memory stores for tests and local development
//! - `postgres` - PostgreSQL-backed persistence
//! - `stripe` - Stripe checkout and webhook integration

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod stripe;
