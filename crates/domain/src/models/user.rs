//! User domain model and account payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Represents a registered account owning campaigns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Argon2id PHC string; never serialized to clients
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub company_name: String,
    pub created_at: DateTime<Utc>,
}

/// Request payload for user registration.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct SignupRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 200, message = "Company name must be 1-200 characters"))]
    pub company_name: String,
}

/// Form-encoded credentials for the login endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Request payload for a full-field user update.
///
/// The password is re-hashed only when a new one is supplied.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,

    #[validate(length(min = 1, max = 200, message = "Company name must be 1-200 characters"))]
    pub company_name: String,
}

/// Response payload for user records (no credential material).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub company_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            company_name: user.company_name,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_signup() -> SignupRequest {
        SignupRequest {
            username: "acme_ads".into(),
            email: "ads@acme.test".into(),
            password: "s3cure-password".into(),
            company_name: "Acme Inc".into(),
        }
    }

    #[test]
    fn test_signup_request_valid() {
        assert!(valid_signup().validate().is_ok());
    }

    #[test]
    fn test_signup_request_invalid_email() {
        let mut request = valid_signup();
        request.email = "not-an-email".into();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_signup_request_short_password() {
        let mut request = valid_signup();
        request.password = "short".into();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_request_password_optional() {
        let request = UpdateUserRequest {
            username: "acme_ads".into(),
            email: "ads@acme.test".into(),
            password: None,
            company_name: "Acme Inc".into(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_user_response_hides_hash() {
        let user = User {
            id: 1,
            username: "acme_ads".into(),
            email: "ads@acme.test".into(),
            password_hash: "$argon2id$secret".into(),
            company_name: "Acme Inc".into(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(json.contains("acme_ads"));
    }
}
