//! Authentication routes for user registration and login.

use axum::{extract::State, http::StatusCode, Form, Json};
use serde::Serialize;
use validator::Validate;

use domain::models::{LoginForm, SignupRequest, UserResponse};

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::auth::{AuthError, AuthService};

/// Response body for a successful login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Register a new user.
///
/// POST /auth/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    request.validate()?;

    let service = AuthService::new(state.pool.clone(), state.jwt.clone());
    let user = service
        .register(
            &request.username,
            &request.email,
            &request.password,
            &request.company_name,
        )
        .await
        .map_err(map_auth_error)?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Exchange form-encoded credentials for a bearer token.
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    let service = AuthService::new(state.pool.clone(), state.jwt.clone());
    let result = service
        .login(&form.username, &form.password)
        .await
        .map_err(map_auth_error)?;

    Ok(Json(TokenResponse {
        access_token: result.access_token,
        token_type: result.token_type.to_string(),
    }))
}

fn map_auth_error(error: AuthError) -> ApiError {
    match error {
        AuthError::EmailAlreadyExists => {
            ApiError::Validation("Email already registered".to_string())
        }
        AuthError::UsernameAlreadyExists => {
            ApiError::Validation("Username already taken".to_string())
        }
        AuthError::InvalidCredentials => ApiError::Unauthorized("Invalid credentials".to_string()),
        AuthError::DatabaseError(db_err) => ApiError::from(db_err),
        AuthError::TokenError(e) => ApiError::Internal(format!("Token error: {}", e)),
        AuthError::PasswordError(e) => ApiError::Internal(format!("Password error: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_invalid_credentials_is_unauthorized() {
        let error = map_auth_error(AuthError::InvalidCredentials);
        assert!(matches!(error, ApiError::Unauthorized(_)));
    }

    #[test]
    fn test_map_duplicate_email_is_validation() {
        let error = map_auth_error(AuthError::EmailAlreadyExists);
        assert!(matches!(error, ApiError::Validation(_)));
    }

    #[test]
    fn test_token_response_shape() {
        let response = TokenResponse {
            access_token: "abc.def.ghi".into(),
            token_type: "bearer".into(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["token_type"], "bearer");
        assert_eq!(json["access_token"], "abc.def.ghi");
    }
}
