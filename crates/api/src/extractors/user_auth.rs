//! Bearer-token authentication extractor.
//!
//! Validates the JWT in the Authorization header and exposes the embedded
//! numeric user id as the authenticated principal. No server-side session
//! store is consulted.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use shared::jwt::{JwtConfig, JwtError};

use crate::app::AppState;
use crate::error::ApiError;

/// Authenticated user information from a verified JWT.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Numeric user id from the `user_id` claim.
    pub user_id: i64,
    /// Username from the token, for logging.
    pub username: String,
}

impl AuthenticatedUser {
    /// Validates a bearer token and extracts the principal.
    ///
    /// A token without a `user_id` claim is rejected; it is never treated as
    /// an anonymous caller.
    pub fn from_token(jwt: &JwtConfig, token: &str) -> Result<Self, JwtError> {
        let claims = jwt.verify(token)?;
        let user_id = claims.user_id()?;

        Ok(Self {
            user_id,
            username: claims.username,
        })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::Unauthorized("Invalid Authorization header format".to_string())
        })?;

        Self::from_token(&state.jwt, token).map_err(|e| {
            tracing::debug!("JWT validation failed: {}", e);
            ApiError::Unauthorized("Invalid or expired token".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_jwt() -> JwtConfig {
        JwtConfig::with_leeway("extractor-test-secret", 30, 0)
    }

    #[test]
    fn test_from_token_valid() {
        let jwt = test_jwt();
        let token = jwt.issue(7, "acme", "ads@acme.test").unwrap();

        let user = AuthenticatedUser::from_token(&jwt, &token).unwrap();
        assert_eq!(user.user_id, 7);
        assert_eq!(user.username, "acme");
    }

    #[test]
    fn test_from_token_garbage_rejected() {
        let jwt = test_jwt();
        assert!(AuthenticatedUser::from_token(&jwt, "garbage").is_err());
    }

    #[test]
    fn test_from_token_missing_user_id_rejected() {
        use chrono::{Duration, Utc};
        use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

        let now = Utc::now();
        let claims = shared::jwt::Claims {
            sub: "ads@acme.test".into(),
            username: "acme".into(),
            user_id: None,
            exp: (now + Duration::minutes(30)).timestamp(),
            iat: now.timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"extractor-test-secret"),
        )
        .unwrap();

        let result = AuthenticatedUser::from_token(&test_jwt(), &token);
        assert!(matches!(result, Err(JwtError::MissingUserId)));
    }
}
