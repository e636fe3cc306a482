//! Feedback exchange routes.
//!
//! These endpoints form the contract with the external analysis workflow
//! and carry no bearer token: the outbound send names its own webhook and
//! the inbound receive is called back by the workflow itself.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use domain::models::{
    Feedback, FeedbackResponse, ReceiveFeedbackRequest, SendMetricsRequest, SendMetricsResponse,
};
use persistence::repositories::{CampaignRepository, FeedbackRepository, MetricRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::analysis::{AnalysisError, AnalysisService};

pub(crate) fn map_analysis_error(error: AnalysisError) -> ApiError {
    match error {
        AnalysisError::CampaignNotFound(id) => {
            ApiError::NotFound(format!("Campaign {} not found", id))
        }
        AnalysisError::MetricNotFound {
            campaign_id,
            metric_id,
        } => ApiError::NotFound(format!(
            "Metric {} not found for campaign {}",
            metric_id, campaign_id
        )),
        AnalysisError::NoMetrics(id) => {
            ApiError::NotFound(format!("No metrics recorded for campaign {}", id))
        }
        AnalysisError::Transport(e) => {
            ApiError::ServiceUnavailable(format!("Webhook delivery failed: {}", e))
        }
        AnalysisError::Database(e) => ApiError::from(e),
    }
}

/// POST /feedbacks/send-to-n8n
///
/// Sends one metric's derived figures to the webhook named in the request.
pub async fn send_to_n8n(
    State(state): State<AppState>,
    Json(request): Json<SendMetricsRequest>,
) -> Result<Json<SendMetricsResponse>, ApiError> {
    request.validate()?;

    let service = AnalysisService::new(state.pool.clone());
    let outcome = service
        .send_metric(request.campaign_id, request.metric_id, &request.webhook_url)
        .await
        .map_err(map_analysis_error)?;

    Ok(Json(SendMetricsResponse {
        success: true,
        message: "Metrics sent successfully".to_string(),
        campaign_id: outcome.campaign_id,
        metric_id: outcome.metric_id,
        webhook_status: Some(outcome.webhook_status),
    }))
}

/// POST /feedbacks/receive-from-n8n
///
/// Stores generated feedback posted back by the workflow. The referenced
/// metric must belong to the referenced campaign.
pub async fn receive_from_n8n(
    State(state): State<AppState>,
    Json(request): Json<ReceiveFeedbackRequest>,
) -> Result<(StatusCode, Json<FeedbackResponse>), ApiError> {
    request.validate()?;

    let campaigns = CampaignRepository::new(state.pool.clone());
    campaigns
        .find_by_id(request.campaign_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Campaign not found".to_string()))?;

    let metrics = MetricRepository::new(state.pool.clone());
    metrics
        .find_for_campaign(request.metric_id, request.campaign_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound("Metric not found for this campaign".to_string())
        })?;

    let repo = FeedbackRepository::new(state.pool.clone());
    let feedback = repo
        .create(request.campaign_id, request.metric_id, &request.feedback_text)
        .await?;

    Ok((StatusCode::CREATED, Json(Feedback::from(feedback).into())))
}

/// GET /feedbacks/campaign/:campaign_id
pub async fn list_campaign_feedback(
    State(state): State<AppState>,
    Path(campaign_id): Path<i64>,
) -> Result<Json<Vec<FeedbackResponse>>, ApiError> {
    let campaigns = CampaignRepository::new(state.pool.clone());
    campaigns
        .find_by_id(campaign_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Campaign not found".to_string()))?;

    let repo = FeedbackRepository::new(state.pool.clone());
    let feedbacks = repo.list_by_campaign(campaign_id).await?;

    Ok(Json(
        feedbacks
            .into_iter()
            .map(|e| FeedbackResponse::from(Feedback::from(e)))
            .collect(),
    ))
}

/// GET /feedbacks/:feedback_id
pub async fn get_feedback(
    State(state): State<AppState>,
    Path(feedback_id): Path<i64>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    let repo = FeedbackRepository::new(state.pool.clone());
    let feedback = repo
        .find_by_id(feedback_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Feedback not found".to_string()))?;

    Ok(Json(Feedback::from(feedback).into()))
}

/// DELETE /feedbacks/:feedback_id
pub async fn delete_feedback(
    State(state): State<AppState>,
    Path(feedback_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let repo = FeedbackRepository::new(state.pool.clone());
    let deleted = repo.delete(feedback_id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Feedback not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaign_not_found_maps_to_404() {
        let error = map_analysis_error(AnalysisError::CampaignNotFound(7));
        assert!(matches!(error, ApiError::NotFound(_)));
    }

    #[test]
    fn test_no_metrics_maps_to_404() {
        let error = map_analysis_error(AnalysisError::NoMetrics(7));
        assert!(matches!(error, ApiError::NotFound(_)));
    }

    #[test]
    fn test_metric_not_found_names_both_ids() {
        let error = map_analysis_error(AnalysisError::MetricNotFound {
            campaign_id: 3,
            metric_id: 9,
        });
        match error {
            ApiError::NotFound(message) => {
                assert!(message.contains('3'));
                assert!(message.contains('9'));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
