//! Campaign entity (database row mapping).

use chrono::NaiveDate;
use sqlx::FromRow;

/// Database row mapping for the campaigns table.
#[derive(Debug, Clone, FromRow)]
pub struct CampaignEntity {
    pub id: i64,
    pub name: String,
    pub platform: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<f64>,
    pub user_id: i64,
}

impl From<CampaignEntity> for domain::models::Campaign {
    fn from(entity: CampaignEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            platform: entity.platform,
            start_date: entity.start_date,
            end_date: entity.end_date,
            budget: entity.budget,
            user_id: entity.user_id,
        }
    }
}
