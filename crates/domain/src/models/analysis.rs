//! Payload types exchanged with the external analysis workflow.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::derivation::DerivedMetrics;
use crate::models::{Campaign, Metric};

/// Request to push one metric's derived figures to a caller-supplied webhook.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct SendMetricsRequest {
    pub campaign_id: i64,

    /// Defaults to the campaign's most recently dated metric when absent.
    pub metric_id: Option<i64>,

    #[validate(url(message = "Invalid webhook URL"))]
    pub webhook_url: String,
}

/// Structured payload delivered to the analysis webhook: campaign identity,
/// raw counters, and the derived ratios.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MetricAnalysisPayload {
    pub campaign_id: i64,
    pub campaign_name: String,
    pub campaign_platform: String,
    pub metric_id: i64,
    pub impressions: i64,
    pub clicks: i64,
    pub conversions: i64,
    pub total_spend: f64,
    pub record_date: NaiveDate,
    pub ctr: f64,
    pub conversion_rate: f64,
    pub cpc: f64,
    pub cpa: f64,
}

impl MetricAnalysisPayload {
    /// Builds the outbound payload from a campaign/metric pair.
    pub fn build(campaign: &Campaign, metric: &Metric) -> Self {
        let derived = DerivedMetrics::from_counters(
            metric.impressions,
            metric.clicks,
            metric.conversions,
            metric.total_spend,
        );

        Self {
            campaign_id: campaign.id,
            campaign_name: campaign.name.clone(),
            campaign_platform: campaign.platform.clone(),
            metric_id: metric.id,
            impressions: metric.impressions,
            clicks: metric.clicks,
            conversions: metric.conversions,
            total_spend: metric.total_spend,
            record_date: metric.record_date,
            ctr: derived.ctr,
            conversion_rate: derived.conversion_rate,
            cpc: derived.cpc,
            cpa: derived.cpa,
        }
    }
}

/// Response returned after pushing metrics to the webhook.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SendMetricsResponse {
    pub success: bool,
    pub message: String,
    pub campaign_id: i64,
    pub metric_id: i64,
    pub webhook_status: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pair() -> (Campaign, Metric) {
        let campaign = Campaign {
            id: 7,
            name: "Spring Sale".into(),
            platform: "google_ads".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: None,
            budget: Some(2000.0),
            user_id: 1,
        };
        let metric = Metric {
            id: 31,
            campaign_id: 7,
            impressions: 10_000,
            clicks: 200,
            conversions: 25,
            total_spend: 150.0,
            record_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        };
        (campaign, metric)
    }

    #[test]
    fn test_payload_carries_derived_ratios() {
        let (campaign, metric) = sample_pair();
        let payload = MetricAnalysisPayload::build(&campaign, &metric);

        assert_eq!(payload.ctr, 2.0);
        assert_eq!(payload.conversion_rate, 12.5);
        assert_eq!(payload.cpc, 0.75);
        assert_eq!(payload.cpa, 6.0);
        assert_eq!(payload.campaign_name, "Spring Sale");
        assert_eq!(payload.metric_id, 31);
    }

    #[test]
    fn test_payload_serializes_record_date_as_iso() {
        let (campaign, metric) = sample_pair();
        let payload = MetricAnalysisPayload::build(&campaign, &metric);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["record_date"], "2024-03-15");
        assert_eq!(json["campaign_platform"], "google_ads");
        assert_eq!(json["cpa"], 6.0);
    }

    #[test]
    fn test_send_request_validates_url() {
        let request = SendMetricsRequest {
            campaign_id: 1,
            metric_id: None,
            webhook_url: "not a url".into(),
        };
        assert!(request.validate().is_err());

        let request = SendMetricsRequest {
            campaign_id: 1,
            metric_id: Some(3),
            webhook_url: "https://n8n.example.com/webhook/abc".into(),
        };
        assert!(request.validate().is_ok());
    }
}
