//! Authentication service for user registration and login.

use sqlx::PgPool;
use thiserror::Error;

use domain::models::User;
use persistence::repositories::UserRepository;
use shared::jwt::{JwtConfig, JwtError};
use shared::password::{hash_password, verify_password, PasswordError};

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("Username already taken")]
    UsernameAlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    TokenError(#[from] JwtError),

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub access_token: String,
    pub token_type: &'static str,
}

/// Authentication service.
pub struct AuthService {
    users: UserRepository,
    jwt: JwtConfig,
}

impl AuthService {
    /// Creates a new AuthService over the given pool and JWT configuration.
    pub fn new(pool: PgPool, jwt: JwtConfig) -> Self {
        Self {
            users: UserRepository::new(pool),
            jwt,
        }
    }

    /// Registers a new user with a hashed password.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        company_name: &str,
    ) -> Result<User, AuthError> {
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists);
        }
        if self.users.find_by_username(username).await?.is_some() {
            return Err(AuthError::UsernameAlreadyExists);
        }

        let password_hash = hash_password(password)?;
        let entity = self
            .users
            .create(username, email, &password_hash, company_name)
            .await?;

        Ok(entity.into())
    }

    /// Verifies credentials and issues a bearer token.
    ///
    /// Unknown username and wrong password are indistinguishable to the
    /// caller.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AuthError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.jwt.issue(user.id, &user.username, &user.email)?;

        Ok(LoginResult {
            access_token,
            token_type: "bearer",
        })
    }
}
