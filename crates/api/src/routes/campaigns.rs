//! Campaign CRUD routes, scoped to the authenticated owner.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use validator::Validate;

use domain::models::{Campaign, CampaignResponse, CreateCampaignRequest};
use persistence::repositories::CampaignRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthenticatedUser;

/// Confirmation body for deletes.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub detail: String,
}

/// POST /campaigns/
pub async fn create_campaign(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Json(request): Json<CreateCampaignRequest>,
) -> Result<(StatusCode, Json<CampaignResponse>), ApiError> {
    request.validate()?;

    let repo = CampaignRepository::new(state.pool.clone());
    let campaign = repo
        .create(
            &request.name,
            &request.platform,
            request.start_date,
            request.end_date,
            request.budget,
            auth.user_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(Campaign::from(campaign).into())))
}

/// GET /campaigns/
pub async fn list_campaigns(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<CampaignResponse>>, ApiError> {
    let repo = CampaignRepository::new(state.pool.clone());
    let campaigns = repo.list_by_owner(auth.user_id).await?;

    Ok(Json(
        campaigns
            .into_iter()
            .map(|e| CampaignResponse::from(Campaign::from(e)))
            .collect(),
    ))
}

/// GET /campaigns/:campaign_id
pub async fn get_campaign(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(campaign_id): Path<i64>,
) -> Result<Json<CampaignResponse>, ApiError> {
    let repo = CampaignRepository::new(state.pool.clone());
    let campaign = repo
        .find_owned(campaign_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Campaign not found".to_string()))?;

    Ok(Json(Campaign::from(campaign).into()))
}

/// PUT /campaigns/:campaign_id
///
/// Full-record replace of the editable fields.
pub async fn update_campaign(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(campaign_id): Path<i64>,
    Json(request): Json<CreateCampaignRequest>,
) -> Result<Json<CampaignResponse>, ApiError> {
    request.validate()?;

    let repo = CampaignRepository::new(state.pool.clone());
    let campaign = repo
        .update_owned(
            campaign_id,
            auth.user_id,
            &request.name,
            &request.platform,
            request.start_date,
            request.end_date,
            request.budget,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Campaign not found".to_string()))?;

    Ok(Json(Campaign::from(campaign).into()))
}

/// DELETE /campaigns/:campaign_id
///
/// Dependent metrics and feedback are removed by the store-enforced cascade.
pub async fn delete_campaign(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(campaign_id): Path<i64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let repo = CampaignRepository::new(state.pool.clone());
    let deleted = repo.delete_owned(campaign_id, auth.user_id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Campaign not found".to_string()));
    }

    Ok(Json(DeleteResponse {
        detail: "Campaign deleted successfully".to_string(),
    }))
}
