//! JWT adapter for access-token verification.
//!
//! Implements the `TokenVerifier` port against HS256-signed access
//! tokens from the identity service. Verification checks:
//!
//! 1. Signature against the shared signing secret
//! 2. Issuer, audience, and expiry claims
//! 3. A well-formed role claim; unknown roles are rejected outright

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, TokenData, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, StudentId, UserRole};
use crate::ports::TokenVerifier;

/// Configuration for the JWT verifier.
#[derive(Clone)]
pub struct JwtConfig {
    /// Shared HS256 signing secret.
    pub signing_secret: SecretString,

    /// Expected issuer claim.
    pub issuer: String,

    /// Expected audience claim.
    pub audience: String,
}

impl JwtConfig {
    pub fn new(
        signing_secret: SecretString,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            signing_secret,
            issuer: issuer.into(),
            audience: audience.into(),
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish_non_exhaustive()
    }
}

/// Claims carried in an access token.
#[derive(Debug, Serialize, Deserialize)]
struct AccessTokenClaims {
    /// Subject - the student ID
    sub: String,

    /// Issuer
    iss: String,

    /// Audience
    aud: String,

    /// Expiry timestamp (Unix epoch seconds)
    exp: i64,

    /// User's email address
    email: String,

    /// Role claim
    role: String,
}

/// HS256 token verifier.
///
/// This is the production implementation of `TokenVerifier`.
pub struct JwtTokenVerifier {
    config: JwtConfig,
    decoding_key: DecodingKey,
}

impl JwtTokenVerifier {
    pub fn new(config: JwtConfig) -> Self {
        let decoding_key =
            DecodingKey::from_secret(config.signing_secret.expose_secret().as_bytes());
        Self {
            config,
            decoding_key,
        }
    }

    fn decode_claims(&self, token: &str) -> Result<TokenData<AccessTokenClaims>, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&[&self.config.audience]);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        decode::<AccessTokenClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidIssuer => {
                    tracing::warn!("Invalid issuer in token");
                    AuthError::InvalidToken
                }
                ErrorKind::InvalidAudience => {
                    tracing::warn!("Invalid audience in token");
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::warn!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            }
        })
    }
}

#[async_trait]
impl TokenVerifier for JwtTokenVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = self.decode_claims(token)?.claims;

        let student_id = StudentId::new(&claims.sub).map_err(|_| {
            tracing::warn!("Invalid subject in token: {}", claims.sub);
            AuthError::InvalidToken
        })?;

        let role = UserRole::from_claim(&claims.role).ok_or_else(|| {
            tracing::warn!("Unknown role claim in token: {}", claims.role);
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedUser::new(student_id, claims.email, role))
    }
}

impl std::fmt::Debug for JwtTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenVerifier")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-signing-secret";
    const ISSUER: &str = "https://auth.learntrack.test";
    const AUDIENCE: &str = "learntrack-api";

    fn verifier() -> JwtTokenVerifier {
        JwtTokenVerifier::new(JwtConfig::new(
            SecretString::from(SECRET.to_string()),
            ISSUER,
            AUDIENCE,
        ))
    }

    fn issue(claims: &AccessTokenClaims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn valid_claims(role: &str) -> AccessTokenClaims {
        AccessTokenClaims {
            sub: "student-123".to_string(),
            iss: ISSUER.to_string(),
            aud: AUDIENCE.to_string(),
            exp: chrono::Utc::now().timestamp() + 3600,
            email: "alice@example.com".to_string(),
            role: role.to_string(),
        }
    }

    #[tokio::test]
    async fn valid_token_yields_authenticated_user() {
        let token = issue(&valid_claims("student"), SECRET);

        let user = verifier().verify(&token).await.unwrap();

        assert_eq!(user.id.as_str(), "student-123");
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.role, UserRole::Student);
    }

    #[tokio::test]
    async fn admin_role_claim_is_honored() {
        let token = issue(&valid_claims("admin"), SECRET);

        let user = verifier().verify(&token).await.unwrap();

        assert!(user.is_admin());
    }

    #[tokio::test]
    async fn wrong_secret_is_rejected() {
        let token = issue(&valid_claims("student"), "some-other-secret");

        let result = verifier().verify(&token).await;

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn expired_token_is_token_expired() {
        let mut claims = valid_claims("student");
        claims.exp = chrono::Utc::now().timestamp() - 120;
        let token = issue(&claims, SECRET);

        let result = verifier().verify(&token).await;

        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[tokio::test]
    async fn wrong_issuer_is_rejected() {
        let mut claims = valid_claims("student");
        claims.iss = "https://evil.example.com".to_string();
        let token = issue(&claims, SECRET);

        let result = verifier().verify(&token).await;

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn wrong_audience_is_rejected() {
        let mut claims = valid_claims("student");
        claims.aud = "other-api".to_string();
        let token = issue(&claims, SECRET);

        let result = verifier().verify(&token).await;

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn unknown_role_claim_is_rejected() {
        let token = issue(&valid_claims("superuser"), SECRET);

        let result = verifier().verify(&token).await;

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let result = verifier().verify("not-a-jwt").await;

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn verifier_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<JwtTokenVerifier>();
    }
}
