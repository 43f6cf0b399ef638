//! Authentication types for the domain layer.
//!
//! These types represent an authenticated caller extracted from a JWT token.
//! They have no provider dependencies; the `TokenVerifier` port populates
//! them from whatever identity provider issued the token.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::StudentId;

/// Role claim carried in the access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Instructor,
    Admin,
}

impl UserRole {
    /// Parses a role claim string. Unknown values are rejected so a
    /// mis-issued token cannot silently gain or lose privileges.
    pub fn from_claim(s: &str) -> Option<Self> {
        match s {
            "student" => Some(Self::Student),
            "instructor" => Some(Self::Instructor),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Returns the claim string for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Instructor => "instructor",
            Self::Admin => "admin",
        }
    }

    /// Returns true for roles allowed to use the admin surface.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Authenticated user extracted from a validated JWT.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the auth provider (`sub` claim).
    pub id: StudentId,

    /// User's email address from the token claims.
    pub email: String,

    /// Role claim, gates the admin endpoints.
    pub role: UserRole,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    ///
    /// Typically called by the `TokenVerifier` adapter after successfully
    /// validating a token.
    pub fn new(id: StudentId, email: impl Into<String>, role: UserRole) -> Self {
        Self {
            id,
            email: email.into(),
            role,
        }
    }

    /// Returns true if this user may use the admin surface.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// User is authenticated but lacks the required role for this action.
    #[error("Insufficient permissions")]
    InsufficientPermissions,

    /// The authentication service is unavailable (network, config, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}
