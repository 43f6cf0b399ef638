//! Authentication middleware and extractors for axum.
//!
//! This module provides:
//! - `auth_middleware` - Layer that verifies Bearer tokens and injects the user into extensions
//! - `RequireAuth` - Extractor that requires authentication
//! - `RequireAdmin` - Extractor that additionally requires the admin role
//!
//! The middleware uses the `TokenVerifier` port, keeping it
//! provider-agnostic: the production JWT verifier and the test mock
//! slot in interchangeably.
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedUser into extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor reads from extensions
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::TokenVerifier;

/// Auth middleware state - wraps the token verifier.
pub type AuthState = Arc<dyn TokenVerifier>;

/// Authentication middleware that verifies Bearer tokens.
///
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Verifies it through the `TokenVerifier` port
/// 3. On success, injects `AuthenticatedUser` into request extensions
/// 4. On missing token, continues without injecting (webhook routes
///    authenticate by signature instead)
/// 5. On invalid token, returns 401 Unauthorized
pub async fn auth_middleware(
    State(verifier): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match token {
        Some(token) => match verifier.verify(token).await {
            Ok(user) => {
                request.extensions_mut().insert(user);
                next.run(request).await
            }
            Err(e) => {
                let (status, message) = match &e {
                    AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired"),
                    AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
                    AuthError::ServiceUnavailable(msg) => {
                        tracing::error!("Auth service unavailable: {}", msg);
                        (
                            StatusCode::SERVICE_UNAVAILABLE,
                            "Authentication service unavailable",
                        )
                    }
                    _ => (StatusCode::UNAUTHORIZED, "Authentication failed"),
                };

                (
                    status,
                    Json(serde_json::json!({
                        "error": message,
                        "code": "AUTH_ERROR"
                    })),
                )
                    .into_response()
            }
        },
        None => {
            // No token - handlers enforce auth via RequireAuth
            next.run(request).await
        }
    }
}

/// Extractor that requires authentication.
///
/// Returns 401 if the auth middleware did not inject a user.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<AuthenticatedUser>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Extractor that requires the admin role.
///
/// Returns 401 without a user, 403 for an authenticated non-admin.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user = parts
                .extensions
                .get::<AuthenticatedUser>()
                .cloned()
                .ok_or(AuthRejection::Unauthenticated)?;

            if !user.is_admin() {
                return Err(AuthRejection::Forbidden);
            }

            Ok(RequireAdmin(user))
        })
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No valid authentication token was provided.
    Unauthenticated,
    /// The caller is authenticated but not an admin.
    Forbidden,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AuthRejection::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHENTICATED",
                "Authentication required",
            ),
            AuthRejection::Forbidden => {
                (StatusCode::FORBIDDEN, "FORBIDDEN", "Admin role required")
            }
        };

        (
            status,
            Json(serde_json::json!({
                "error": message,
                "code": code
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockTokenVerifier;
    use crate::domain::foundation::{StudentId, UserRole};

    fn student_user() -> AuthenticatedUser {
        AuthenticatedUser::new(
            StudentId::new("student-123").unwrap(),
            "alice@example.com",
            UserRole::Student,
        )
    }

    fn admin_user() -> AuthenticatedUser {
        AuthenticatedUser::new(
            StudentId::new("ops-1").unwrap(),
            "ops@example.com",
            UserRole::Admin,
        )
    }

    // ══════════════════════════════════════════════════════════════
    // TokenVerifier Tests (indirect via MockTokenVerifier)
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn verifier_returns_user_for_valid_token() {
        let verifier: Arc<dyn TokenVerifier> =
            Arc::new(MockTokenVerifier::new().with_user("valid-token", student_user()));

        let result = verifier.verify("valid-token").await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap().email, "alice@example.com");
    }

    #[tokio::test]
    async fn verifier_returns_error_for_invalid_token() {
        let verifier: Arc<dyn TokenVerifier> = Arc::new(MockTokenVerifier::new());

        let result = verifier.verify("invalid-token").await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    // ══════════════════════════════════════════════════════════════
    // RequireAuth Extractor Tests
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn require_auth_extracts_user_from_extensions() {
        use axum::extract::FromRequestParts;
        use axum::http::Request;

        let mut request: Request<()> = Request::builder().uri("/test").body(()).unwrap();
        request.extensions_mut().insert(student_user());

        let (mut parts, _body) = request.into_parts();
        let result: Result<RequireAuth, AuthRejection> =
            RequireAuth::from_request_parts(&mut parts, &()).await;

        assert!(result.is_ok());
        let RequireAuth(user) = result.unwrap();
        assert_eq!(user.email, "alice@example.com");
    }

    #[tokio::test]
    async fn require_auth_fails_without_user() {
        use axum::extract::FromRequestParts;
        use axum::http::Request;

        let request: Request<()> = Request::builder().uri("/test").body(()).unwrap();
        let (mut parts, _body) = request.into_parts();

        let result: Result<RequireAuth, AuthRejection> =
            RequireAuth::from_request_parts(&mut parts, &()).await;

        assert!(matches!(result, Err(AuthRejection::Unauthenticated)));
    }

    // ══════════════════════════════════════════════════════════════
    // RequireAdmin Extractor Tests
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn require_admin_accepts_admin() {
        use axum::extract::FromRequestParts;
        use axum::http::Request;

        let mut request: Request<()> = Request::builder().uri("/test").body(()).unwrap();
        request.extensions_mut().insert(admin_user());

        let (mut parts, _body) = request.into_parts();
        let result: Result<RequireAdmin, AuthRejection> =
            RequireAdmin::from_request_parts(&mut parts, &()).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn require_admin_rejects_plain_student() {
        use axum::extract::FromRequestParts;
        use axum::http::Request;

        let mut request: Request<()> = Request::builder().uri("/test").body(()).unwrap();
        request.extensions_mut().insert(student_user());

        let (mut parts, _body) = request.into_parts();
        let result: Result<RequireAdmin, AuthRejection> =
            RequireAdmin::from_request_parts(&mut parts, &()).await;

        assert!(matches!(result, Err(AuthRejection::Forbidden)));
    }

    #[tokio::test]
    async fn require_admin_rejects_unauthenticated() {
        use axum::extract::FromRequestParts;
        use axum::http::Request;

        let request: Request<()> = Request::builder().uri("/test").body(()).unwrap();
        let (mut parts, _body) = request.into_parts();

        let result: Result<RequireAdmin, AuthRejection> =
            RequireAdmin::from_request_parts(&mut parts, &()).await;

        assert!(matches!(result, Err(AuthRejection::Unauthenticated)));
    }

    // ══════════════════════════════════════════════════════════════
    // Rejection Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn unauthenticated_rejection_returns_401() {
        let response = AuthRejection::Unauthenticated.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn forbidden_rejection_returns_403() {
        let response = AuthRejection::Forbidden.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn bearer_token_extraction() {
        let token = "Bearer my-secret-token".strip_prefix("Bearer ");
        assert_eq!(token, Some("my-secret-token"));

        assert_eq!("my-secret-token".strip_prefix("Bearer "), None);
        assert_eq!("Basic dXNlcjpwYXNz".strip_prefix("Bearer "), None);
    }

    #[test]
    fn auth_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuthState>();
        assert_send_sync::<RequireAuth>();
        assert_send_sync::<RequireAdmin>();
    }
}
