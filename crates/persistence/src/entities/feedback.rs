//! Feedback entity (database row mapping).

use sqlx::FromRow;

/// Database row mapping for the feedbacks table.
#[derive(Debug, Clone, FromRow)]
pub struct FeedbackEntity {
    pub id: i64,
    pub campaign_id: i64,
    pub metric_id: i64,
    pub feedback_text: String,
}

impl From<FeedbackEntity> for domain::models::Feedback {
    fn from(entity: FeedbackEntity) -> Self {
        Self {
            id: entity.id,
            campaign_id: entity.campaign_id,
            metric_id: entity.metric_id,
            feedback_text: entity.feedback_text,
        }
    }
}
