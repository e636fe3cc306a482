//! Metric CRUD, bulk import, and analyze routes.
//!
//! Every operation verifies that the underlying campaign belongs to the
//! authenticated user; a miss reads as not-found, matching the campaign
//! routes.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use sqlx::Acquire;
use validator::Validate;

use domain::models::{
    CreateMetricRequest, ImportReport, Metric, MetricResponse, RawImportRow,
    REQUIRED_IMPORT_COLUMNS,
};
use persistence::repositories::metric::MetricInput;
use persistence::repositories::{CampaignRepository, MetricRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthenticatedUser;
use crate::services::AnalysisService;

/// Confirmation body for deletes.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub detail: String,
}

/// Response for the analyze push.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AnalyzeResponse {
    pub message: String,
    pub webhook_status: u16,
}

/// POST /metrics/
pub async fn create_metric(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Json(request): Json<CreateMetricRequest>,
) -> Result<(StatusCode, Json<MetricResponse>), ApiError> {
    request.validate()?;

    let campaigns = CampaignRepository::new(state.pool.clone());
    campaigns
        .find_owned(request.campaign_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Campaign not found".to_string()))?;

    let repo = MetricRepository::new(state.pool.clone());
    let metric = repo
        .create(&MetricInput {
            campaign_id: request.campaign_id,
            impressions: request.impressions,
            clicks: request.clicks,
            conversions: request.conversions,
            total_spend: request.total_spend,
            record_date: request.record_date,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(Metric::from(metric).into())))
}

/// GET /metrics/
///
/// All metrics across the caller's campaigns.
pub async fn list_metrics(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<MetricResponse>>, ApiError> {
    let repo = MetricRepository::new(state.pool.clone());
    let metrics = repo.list_for_owner(auth.user_id).await?;

    Ok(Json(
        metrics
            .into_iter()
            .map(|e| MetricResponse::from(Metric::from(e)))
            .collect(),
    ))
}

/// GET /metrics/:campaign_id
pub async fn list_campaign_metrics(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(campaign_id): Path<i64>,
) -> Result<Json<Vec<MetricResponse>>, ApiError> {
    let campaigns = CampaignRepository::new(state.pool.clone());
    campaigns
        .find_owned(campaign_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Campaign not found".to_string()))?;

    let repo = MetricRepository::new(state.pool.clone());
    let metrics = repo.list_by_campaign(campaign_id).await?;

    Ok(Json(
        metrics
            .into_iter()
            .map(|e| MetricResponse::from(Metric::from(e)))
            .collect(),
    ))
}

/// PUT /metrics/:metric_id
pub async fn update_metric(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(metric_id): Path<i64>,
    Json(request): Json<CreateMetricRequest>,
) -> Result<Json<MetricResponse>, ApiError> {
    request.validate()?;

    // The target campaign of the update must also be the caller's.
    let campaigns = CampaignRepository::new(state.pool.clone());
    campaigns
        .find_owned(request.campaign_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Campaign not found".to_string()))?;

    let repo = MetricRepository::new(state.pool.clone());
    let metric = repo
        .update_owned(
            metric_id,
            auth.user_id,
            &MetricInput {
                campaign_id: request.campaign_id,
                impressions: request.impressions,
                clicks: request.clicks,
                conversions: request.conversions,
                total_spend: request.total_spend,
                record_date: request.record_date,
            },
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Metric not found".to_string()))?;

    Ok(Json(Metric::from(metric).into()))
}

/// DELETE /metrics/:metric_id
pub async fn delete_metric(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(metric_id): Path<i64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let repo = MetricRepository::new(state.pool.clone());
    let deleted = repo.delete_owned(metric_id, auth.user_id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Metric not found".to_string()));
    }

    Ok(Json(DeleteResponse {
        detail: "Metric deleted successfully".to_string(),
    }))
}

/// POST /metrics/upload-metrics
///
/// CSV bulk import. Rows are processed sequentially inside one transaction
/// committed at the end; a bad row is recorded as an error string and
/// skipped, never aborting the batch.
pub async fn upload_metrics(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    mut multipart: Multipart,
) -> Result<Json<ImportReport>, ApiError> {
    let mut file_bytes: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Failed to parse multipart data: {}", e)))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::Validation(format!("Failed to read file: {}", e)))?;
            file_bytes = Some((filename, bytes.to_vec()));
        }
    }

    let (filename, bytes) =
        file_bytes.ok_or_else(|| ApiError::Validation("Missing 'file' field".to_string()))?;

    if !filename.to_lowercase().ends_with(".csv") {
        return Err(ApiError::Validation(
            "Unsupported file format, expected .csv".to_string(),
        ));
    }
    if bytes.is_empty() {
        return Err(ApiError::Validation("The file is empty".to_string()));
    }

    let mut reader = csv::ReaderBuilder::new().from_reader(bytes.as_slice());

    let headers = reader
        .headers()
        .map_err(|e| ApiError::Validation(format!("Failed to read file: {}", e)))?
        .clone();
    let missing: Vec<&str> = REQUIRED_IMPORT_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h == **column))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(ApiError::Validation(format!(
            "Required columns missing: {}",
            missing.join(", ")
        )));
    }

    let campaigns = CampaignRepository::new(state.pool.clone());
    let metrics = MetricRepository::new(state.pool.clone());
    let today = Utc::now().date_naive();

    let mut tx = state.pool.begin().await.map_err(ApiError::from)?;
    let mut inserted = 0usize;
    let mut errors = Vec::new();

    for (index, record) in reader.deserialize::<RawImportRow>().enumerate() {
        let raw = match record {
            Ok(raw) => raw,
            Err(e) => {
                errors.push(format!("Row {}: unreadable record: {}", index + 1, e));
                continue;
            }
        };

        let row = match raw.parse() {
            Ok(row) => row,
            Err(message) => {
                errors.push(message);
                continue;
            }
        };

        let campaign = match campaigns
            .find_owned_by_name(&row.campaign_name, auth.user_id)
            .await
        {
            Ok(Some(campaign)) => campaign,
            Ok(None) => {
                errors.push(format!("Campaign not found: {}", row.campaign_name));
                continue;
            }
            Err(e) => {
                errors.push(format!(
                    "Row for campaign '{}': lookup failed: {}",
                    row.campaign_name, e
                ));
                continue;
            }
        };

        let input = MetricInput {
            campaign_id: campaign.id,
            impressions: row.impressions,
            clicks: row.clicks,
            conversions: row.conversions,
            total_spend: row.total_spend,
            record_date: today,
        };

        // A savepoint per row: a rejected insert must not abort the outer
        // transaction, or the final commit would silently roll back every
        // row already written.
        let mut savepoint = tx.begin().await.map_err(ApiError::from)?;
        match metrics.create_in_tx(&mut savepoint, &input).await {
            Ok(_) => {
                savepoint.commit().await.map_err(ApiError::from)?;
                inserted += 1;
            }
            Err(e) => {
                savepoint.rollback().await.map_err(ApiError::from)?;
                errors.push(format!(
                    "Row for campaign '{}': insert failed: {}",
                    row.campaign_name, e
                ));
            }
        }
    }

    // Single commit: rows already inserted survive later per-row failures.
    tx.commit().await.map_err(ApiError::from)?;

    Ok(Json(ImportReport {
        message: "Import finished".to_string(),
        inserted,
        errors,
    }))
}

/// POST /metrics/analyze/:campaign_id
///
/// Pushes every metric of an owned campaign to the configured automation
/// webhook.
pub async fn analyze_campaign(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(campaign_id): Path<i64>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let webhook_url = state.config.automation.webhook_url.clone();
    if webhook_url.is_empty() {
        return Err(ApiError::ServiceUnavailable(
            "Automation webhook URL is not configured".to_string(),
        ));
    }

    let service = AnalysisService::new(state.pool.clone());
    let status = service
        .analyze_campaign(campaign_id, auth.user_id, &webhook_url)
        .await
        .map_err(crate::routes::feedbacks::map_analysis_error)?;

    Ok(Json(AnalyzeResponse {
        message: "Metrics sent for analysis".to_string(),
        webhook_status: status,
    }))
}
