//! Mock authentication adapter for testing.
//!
//! Implements the `TokenVerifier` port from a static token map, avoiding
//! the need to mint real JWTs in tests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, StudentId, UserRole};
use crate::ports::TokenVerifier;

/// Mock token verifier for testing.
///
/// Stores a map of tokens to users. Tokens not in the map return
/// `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockTokenVerifier {
    /// Map of valid tokens to their associated users
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Optional error to return for all verifications (for error testing)
    force_error: RwLock<Option<AuthError>>,
}

impl MockTokenVerifier {
    /// Creates a new empty mock verifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.tokens.write().unwrap().insert(token.into(), user);
        self
    }

    /// Adds a valid token for a plain student with the given ID.
    pub fn with_student(self, token: impl Into<String>, student_id: impl Into<String>) -> Self {
        let student_id = student_id.into();
        let user = AuthenticatedUser::new(
            StudentId::new(&student_id).unwrap(),
            format!("{}@test.example.com", student_id),
            UserRole::Student,
        );
        self.with_user(token, user)
    }

    /// Adds a valid token for an admin with the given ID.
    pub fn with_admin(self, token: impl Into<String>, admin_id: impl Into<String>) -> Self {
        let admin_id = admin_id.into();
        let user = AuthenticatedUser::new(
            StudentId::new(&admin_id).unwrap(),
            format!("{}@test.example.com", admin_id),
            UserRole::Admin,
        );
        self.with_user(token, user)
    }

    /// Forces all verifications to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    /// Clears the forced error and returns to normal operation.
    pub fn clear_error(&self) {
        *self.force_error.write().unwrap() = None;
    }

    /// Registers a new valid token at runtime.
    pub fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        self.tokens.write().unwrap().insert(token.into(), user);
    }

    /// Removes a token, making it invalid.
    pub fn remove_token(&self, token: &str) {
        self.tokens.write().unwrap().remove(token);
    }
}

#[async_trait]
impl TokenVerifier for MockTokenVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
