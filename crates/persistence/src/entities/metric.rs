//! Metric entity (database row mapping).

use chrono::NaiveDate;
use sqlx::FromRow;

/// Database row mapping for the metrics table.
#[derive(Debug, Clone, FromRow)]
pub struct MetricEntity {
    pub id: i64,
    pub campaign_id: i64,
    pub impressions: i64,
    pub clicks: i64,
    pub conversions: i64,
    pub total_spend: f64,
    pub record_date: NaiveDate,
}

impl From<MetricEntity> for domain::models::Metric {
    fn from(entity: MetricEntity) -> Self {
        Self {
            id: entity.id,
            campaign_id: entity.campaign_id,
            impressions: entity.impressions,
            clicks: entity.clicks,
            conversions: entity.conversions,
            total_spend: entity.total_spend,
            record_date: entity.record_date,
        }
    }
}
