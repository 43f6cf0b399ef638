//! Authentication adapters.
//!
//! Implementations of the `TokenVerifier` port:
//!
//! - `jwt` - Production HS256 verifier for identity-service tokens
//! - `mock` - Test implementation that needs no real tokens

mod jwt;
mod mock;

pub use jwt::{JwtConfig, JwtTokenVerifier};
pub use mock::MockTokenVerifier;
