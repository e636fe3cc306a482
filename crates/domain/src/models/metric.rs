//! Metric domain model and payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One period's raw performance counters for a campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metric {
    pub id: i64,
    pub campaign_id: i64,
    pub impressions: i64,
    pub clicks: i64,
    pub conversions: i64,
    pub total_spend: f64,
    pub record_date: NaiveDate,
}

/// Request payload for creating or fully replacing a metric.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateMetricRequest {
    pub campaign_id: i64,

    #[validate(range(min = 0, message = "Impressions cannot be negative"))]
    pub impressions: i64,

    #[validate(range(min = 0, message = "Clicks cannot be negative"))]
    pub clicks: i64,

    #[validate(range(min = 0, message = "Conversions cannot be negative"))]
    pub conversions: i64,

    #[validate(range(min = 0.0, message = "Total spend cannot be negative"))]
    pub total_spend: f64,

    pub record_date: NaiveDate,
}

/// Response payload for metric records.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MetricResponse {
    pub id: i64,
    pub campaign_id: i64,
    pub impressions: i64,
    pub clicks: i64,
    pub conversions: i64,
    pub total_spend: f64,
    pub record_date: NaiveDate,
}

impl From<Metric> for MetricResponse {
    fn from(metric: Metric) -> Self {
        Self {
            id: metric.id,
            campaign_id: metric.campaign_id,
            impressions: metric.impressions,
            clicks: metric.clicks,
            conversions: metric.conversions,
            total_spend: metric.total_spend,
            record_date: metric.record_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateMetricRequest {
        CreateMetricRequest {
            campaign_id: 1,
            impressions: 10_000,
            clicks: 250,
            conversions: 12,
            total_spend: 340.5,
            record_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        }
    }

    #[test]
    fn test_metric_request_valid() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_metric_request_negative_counters_rejected() {
        let mut request = valid_request();
        request.clicks = -1;
        assert!(request.validate().is_err());

        let mut request = valid_request();
        request.total_spend = -0.01;
        assert!(request.validate().is_err());
    }
}
