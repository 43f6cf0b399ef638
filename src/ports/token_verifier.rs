//! Token verification port for JWT validation.
//!
//! Defines the contract for validating access tokens and extracting
//! user identity. It is provider-agnostic; a JWT implementation exists
//! for production and a mock for tests.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts user identity.
///
/// HTTP middleware uses this to validate Bearer tokens before a
/// request reaches a handler.
///
/// # Contract
///
/// Implementations must:
/// - Validate the token signature
/// - Validate expiry claims
/// - Return `AuthError::InvalidToken` for malformed/bad signature tokens
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Return `AuthError::ServiceUnavailable` for transient errors
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Validate a JWT access token and return the authenticated user.
    ///
    /// `token` is the raw JWT without the "Bearer " prefix.
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{StudentId, UserRole};
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// Simple mock implementation for testing the trait
    struct TestTokenVerifier {
        tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    }

    impl TestTokenVerifier {
        fn new() -> Self {
            Self {
                tokens: RwLock::new(HashMap::new()),
            }
        }

        fn add_valid_token(&self, token: &str, user: AuthenticatedUser) {
            self.tokens.write().unwrap().insert(token.to_string(), user);
        }
    }

    #[async_trait]
    impl TokenVerifier for TestTokenVerifier {
        async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
            self.tokens
                .read()
                .unwrap()
                .get(token)
                .cloned()
                .ok_or(AuthError::InvalidToken)
        }
    }

    fn test_user() -> AuthenticatedUser {
        AuthenticatedUser::new(
            StudentId::new("student-123").unwrap(),
            "student@example.com",
            UserRole::Student,
        )
    }

    #[tokio::test]
    async fn token_verifier_returns_user_for_valid_token() {
        let verifier = TestTokenVerifier::new();
        verifier.add_valid_token("valid-token-123", test_user());

        let result = verifier.verify("valid-token-123").await;

        assert!(result.is_ok());
        let user = result.unwrap();
        assert_eq!(user.id.as_str(), "student-123");
        assert_eq!(user.email, "student@example.com");
    }

    #[tokio::test]
    async fn token_verifier_returns_error_for_invalid_token() {
        let verifier = TestTokenVerifier::new();

        let result = verifier.verify("invalid-token").await;

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn token_verifier_trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn TokenVerifier>();
    }
}
