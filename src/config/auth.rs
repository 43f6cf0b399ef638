//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum secret length accepted in production.
const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Authentication configuration (JWT verification)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC signing secret shared with the identity service
    pub jwt_secret: String,

    /// Expected `iss` claim for access tokens
    pub jwt_issuer: String,

    /// Expected `aud` claim for access tokens
    pub jwt_audience: String,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// In production, requires a signing secret of at least 32 bytes.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.jwt_secret.is_empty() {
            return Err(ValidationError::MissingRequired("JWT_SECRET"));
        }
        if self.jwt_issuer.is_empty() {
            return Err(ValidationError::MissingRequired("JWT_ISSUER"));
        }
        if self.jwt_audience.is_empty() {
            return Err(ValidationError::MissingRequired("JWT_AUDIENCE"));
        }

        if *environment == Environment::Production
            && self.jwt_secret.len() < MIN_PRODUCTION_SECRET_LEN
        {
            return Err(ValidationError::JwtSecretTooShort);
        }

        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_issuer: String::new(),
            jwt_audience: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "a-development-secret-of-32-chars!".to_string(),
            jwt_issuer: "https://auth.example.com".to_string(),
            jwt_audience: "learntrack-api".to_string(),
        }
    }

    #[test]
    fn test_validation_missing_secret() {
        let config = AuthConfig::default();
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_validation_missing_issuer() {
        let config = AuthConfig {
            jwt_issuer: String::new(),
            ..valid_config()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_validation_missing_audience() {
        let config = AuthConfig {
            jwt_audience: String::new(),
            ..valid_config()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_validation_production_requires_strong_secret() {
        let config = AuthConfig {
            jwt_secret: "short".to_string(),
            ..valid_config()
        };
        // Allowed in development
        assert!(config.validate(&Environment::Development).is_ok());
        // Rejected in production
        assert!(config.validate(&Environment::Production).is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid_config().validate(&Environment::Production).is_ok());
    }
}
