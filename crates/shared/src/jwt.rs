//! JWT token utilities.
//!
//! Issues and verifies HS256 bearer tokens. A token encodes the user's email
//! as subject plus a numeric `user_id` claim that handlers use for all
//! ownership checks.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingError(String),

    #[error("Failed to decode token: {0}")]
    DecodingError(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token is missing the user_id claim")]
    MissingUserId,
}

/// JWT token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user email)
    pub sub: String,
    /// Username for display/logging
    pub username: String,
    /// Numeric user id; tokens without it are rejected, never anonymous
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Returns the numeric user id, failing when the claim is absent.
    pub fn user_id(&self) -> Result<i64, JwtError> {
        self.user_id.ok_or(JwtError::MissingUserId)
    }
}

/// Default leeway in seconds for clock skew tolerance
pub const DEFAULT_LEEWAY_SECS: u64 = 30;

/// Configuration for JWT token generation and validation.
#[derive(Clone)]
pub struct JwtConfig {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    /// Token lifetime in minutes
    pub expiry_minutes: i64,
    /// Leeway in seconds for clock skew tolerance
    pub leeway_secs: u64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("expiry_minutes", &self.expiry_minutes)
            .field("leeway_secs", &self.leeway_secs)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

impl JwtConfig {
    /// Creates a new JwtConfig from a shared HS256 secret.
    pub fn new(secret: &str, expiry_minutes: i64) -> Self {
        Self::with_leeway(secret, expiry_minutes, DEFAULT_LEEWAY_SECS)
    }

    /// Creates a new JwtConfig with a custom clock-skew leeway.
    pub fn with_leeway(secret: &str, expiry_minutes: i64, leeway_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_minutes,
            leeway_secs,
        }
    }

    /// Issues an access token for the given user.
    pub fn issue(&self, user_id: i64, username: &str, email: &str) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: email.to_string(),
            username: username.to_string(),
            user_id: Some(user_id),
            exp: (now + Duration::minutes(self.expiry_minutes)).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    /// Verifies a token's signature and expiry and returns its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = self.leeway_secs;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidToken,
                _ => JwtError::DecodingError(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> JwtConfig {
        // Strict for testing - no leeway
        JwtConfig::with_leeway("test_secret_key_for_jwt_testing_12345", 30, 0)
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let config = create_test_config();

        let token = config.issue(42, "acme", "ads@acme.test").unwrap();
        assert!(token.contains('.'), "JWT should have dots separating parts");

        let claims = config.verify(&token).unwrap();
        assert_eq!(claims.sub, "ads@acme.test");
        assert_eq!(claims.username, "acme");
        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = create_test_config();

        // Encode claims whose expiry is already in the past.
        let now = Utc::now();
        let claims = Claims {
            sub: "ads@acme.test".into(),
            username: "acme".into(),
            user_id: Some(1),
            exp: (now - Duration::minutes(5)).timestamp(),
            iat: (now - Duration::minutes(35)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test_secret_key_for_jwt_testing_12345"),
        )
        .unwrap();

        let result = config.verify(&token);
        assert!(matches!(result, Err(JwtError::TokenExpired)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let config = create_test_config();
        let other = JwtConfig::with_leeway("a_completely_different_secret", 30, 0);

        let token = other.issue(1, "acme", "ads@acme.test").unwrap();
        let result = config.verify(&token);

        assert!(matches!(result, Err(JwtError::InvalidToken)));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let config = create_test_config();
        assert!(config.verify("not_a_jwt").is_err());
        assert!(config.verify("invalid.token.here").is_err());
    }

    #[test]
    fn test_missing_user_id_claim_is_an_error() {
        let config = create_test_config();

        let now = Utc::now();
        let claims = Claims {
            sub: "ads@acme.test".into(),
            username: "acme".into(),
            user_id: None,
            exp: (now + Duration::minutes(30)).timestamp(),
            iat: now.timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test_secret_key_for_jwt_testing_12345"),
        )
        .unwrap();

        // The token itself verifies, but the claim lookup must fail.
        let verified = config.verify(&token).unwrap();
        assert!(matches!(verified.user_id(), Err(JwtError::MissingUserId)));
    }

    #[test]
    fn test_jwt_error_display() {
        assert!(format!("{}", JwtError::TokenExpired).contains("expired"));
        assert!(format!("{}", JwtError::InvalidToken).contains("Invalid"));
        assert!(format!("{}", JwtError::MissingUserId).contains("user_id"));
    }
}
