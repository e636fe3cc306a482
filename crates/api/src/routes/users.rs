//! User record routes.
//!
//! These require a valid bearer token but are not scoped to the caller: any
//! authenticated user may read or mutate any user record. This is an
//! admin-style surface (see DESIGN.md on authorization policy).

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use domain::models::{UpdateUserRequest, User, UserResponse};
use persistence::repositories::UserRepository;
use shared::password::hash_password;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthenticatedUser;

/// GET /users/:user_id
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthenticatedUser,
    Path(user_id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    let repo = UserRepository::new(state.pool.clone());
    let user = repo
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(User::from(user).into()))
}

/// GET /users/
pub async fn list_users(
    State(state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let repo = UserRepository::new(state.pool.clone());
    let users = repo.list_all().await?;

    Ok(Json(
        users
            .into_iter()
            .map(|e| UserResponse::from(User::from(e)))
            .collect(),
    ))
}

/// PUT /users/:user_id
///
/// Full-field replace; the password is re-hashed only when a new one is
/// supplied.
pub async fn update_user(
    State(state): State<AppState>,
    _auth: AuthenticatedUser,
    Path(user_id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    request.validate()?;

    let repo = UserRepository::new(state.pool.clone());
    let existing = repo
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let password_hash = match &request.password {
        Some(password) => hash_password(password)
            .map_err(|e| ApiError::Internal(format!("Password error: {}", e)))?,
        None => existing.password_hash,
    };

    let updated = repo
        .update(
            user_id,
            &request.username,
            &request.email,
            &password_hash,
            &request.company_name,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(User::from(updated).into()))
}

/// DELETE /users/:user_id
pub async fn delete_user(
    State(state): State<AppState>,
    _auth: AuthenticatedUser,
    Path(user_id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    let repo = UserRepository::new(state.pool.clone());
    let user = repo
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    repo.delete(user_id).await?;

    Ok(Json(User::from(user).into()))
}
