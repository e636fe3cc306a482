//! Feedback exchange gateway.
//!
//! Handles outbound delivery of derived metrics to the external analysis
//! workflow: one HTTP POST per request, bounded timeout, no retry. The
//! inbound half (feedback ingestion) lives in the feedback routes; this
//! service only talks upstream.

use reqwest::Client;
use serde::Serialize;
use sqlx::PgPool;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use domain::models::{Campaign, Metric, MetricAnalysisPayload, MetricResponse};
use persistence::repositories::{CampaignRepository, MetricRepository};

/// Timeout for the feedback-send path.
const SEND_TIMEOUT_SECS: u64 = 30;

/// Errors that can occur while exchanging metrics with the workflow.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Campaign {0} not found")]
    CampaignNotFound(i64),

    #[error("Metric {metric_id} not found for campaign {campaign_id}")]
    MetricNotFound { campaign_id: i64, metric_id: i64 },

    #[error("No metrics recorded for campaign {0}")]
    NoMetrics(i64),

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result of a successful outbound delivery.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub campaign_id: i64,
    pub metric_id: i64,
    pub webhook_status: u16,
}

/// Envelope for the whole-campaign analyze push.
#[derive(Debug, Serialize)]
struct CampaignMetricsEnvelope {
    metrics: Vec<MetricResponse>,
}

/// Service for pushing metrics to external analysis webhooks.
pub struct AnalysisService {
    campaigns: CampaignRepository,
    metrics: MetricRepository,
    client: Client,
}

impl AnalysisService {
    /// Creates a new analysis service over the given pool.
    pub fn new(pool: PgPool) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(SEND_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            campaigns: CampaignRepository::new(pool.clone()),
            metrics: MetricRepository::new(pool),
            client,
        }
    }

    /// Sends one metric's derived figures to a caller-supplied webhook.
    ///
    /// When `metric_id` is absent the campaign's most recently dated metric
    /// is used. Exactly one delivery attempt is made.
    pub async fn send_metric(
        &self,
        campaign_id: i64,
        metric_id: Option<i64>,
        webhook_url: &str,
    ) -> Result<DispatchOutcome, AnalysisError> {
        let campaign: Campaign = self
            .campaigns
            .find_by_id(campaign_id)
            .await?
            .ok_or(AnalysisError::CampaignNotFound(campaign_id))?
            .into();

        let metric: Metric = match metric_id {
            Some(id) => self
                .metrics
                .find_for_campaign(id, campaign_id)
                .await?
                .ok_or(AnalysisError::MetricNotFound {
                    campaign_id,
                    metric_id: id,
                })?
                .into(),
            None => self
                .metrics
                .latest_for_campaign(campaign_id)
                .await?
                .ok_or(AnalysisError::NoMetrics(campaign_id))?
                .into(),
        };

        let payload = MetricAnalysisPayload::build(&campaign, &metric);

        let response = self
            .client
            .post(webhook_url)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;

        let status = response.status().as_u16();
        info!(
            campaign_id,
            metric_id = metric.id,
            status,
            "Delivered derived metrics to analysis webhook"
        );

        Ok(DispatchOutcome {
            campaign_id,
            metric_id: metric.id,
            webhook_status: status,
        })
    }

    /// Pushes every metric of a campaign to the configured automation webhook.
    ///
    /// Raw counters only; derivation happens on the feedback-send path.
    pub async fn analyze_campaign(
        &self,
        campaign_id: i64,
        owner_id: i64,
        webhook_url: &str,
    ) -> Result<u16, AnalysisError> {
        self.campaigns
            .find_owned(campaign_id, owner_id)
            .await?
            .ok_or(AnalysisError::CampaignNotFound(campaign_id))?;

        let rows = self.metrics.list_by_campaign(campaign_id).await?;
        if rows.is_empty() {
            return Err(AnalysisError::NoMetrics(campaign_id));
        }

        let envelope = CampaignMetricsEnvelope {
            metrics: rows
                .into_iter()
                .map(|e| MetricResponse::from(Metric::from(e)))
                .collect(),
        };

        let response = self
            .client
            .post(webhook_url)
            .json(&envelope)
            .send()
            .await
            .map_err(|e| {
                warn!(campaign_id, error = %e, "Automation webhook unreachable");
                e
            })?
            .error_for_status()?;

        Ok(response.status().as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_analyze_envelope_wraps_rows_in_metrics_array() {
        let envelope = CampaignMetricsEnvelope {
            metrics: vec![MetricResponse {
                id: 31,
                campaign_id: 7,
                impressions: 10_000,
                clicks: 200,
                conversions: 25,
                total_spend: 150.0,
                record_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            }],
        };

        let json = serde_json::to_value(&envelope).unwrap();
        assert!(json["metrics"].is_array());
        assert_eq!(json["metrics"][0]["id"], 31);
        assert_eq!(json["metrics"][0]["campaign_id"], 7);
        assert_eq!(json["metrics"][0]["record_date"], "2024-03-15");
        // Raw counters only; derived ratios belong to the send path.
        assert!(json["metrics"][0].get("ctr").is_none());
    }

    #[test]
    fn test_empty_metrics_is_a_named_error() {
        let error = AnalysisError::NoMetrics(7);
        assert!(error.to_string().contains('7'));
    }
}
