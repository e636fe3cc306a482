//! Feedback repository for database operations.

use sqlx::PgPool;

use crate::entities::FeedbackEntity;

/// Repository for feedback-related database operations.
#[derive(Clone)]
pub struct FeedbackRepository {
    pool: PgPool,
}

impl FeedbackRepository {
    /// Creates a new FeedbackRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a feedback row referencing an existing campaign and metric.
    pub async fn create(
        &self,
        campaign_id: i64,
        metric_id: i64,
        feedback_text: &str,
    ) -> Result<FeedbackEntity, sqlx::Error> {
        sqlx::query_as::<_, FeedbackEntity>(
            r#"
            INSERT INTO feedbacks (campaign_id, metric_id, feedback_text)
            VALUES ($1, $2, $3)
            RETURNING id, campaign_id, metric_id, feedback_text
            "#,
        )
        .bind(campaign_id)
        .bind(metric_id)
        .bind(feedback_text)
        .fetch_one(&self.pool)
        .await
    }

    /// Find a feedback record by id.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<FeedbackEntity>, sqlx::Error> {
        sqlx::query_as::<_, FeedbackEntity>(
            r#"
            SELECT id, campaign_id, metric_id, feedback_text
            FROM feedbacks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// List all feedback for one campaign.
    pub async fn list_by_campaign(&self, campaign_id: i64) -> Result<Vec<FeedbackEntity>, sqlx::Error> {
        sqlx::query_as::<_, FeedbackEntity>(
            r#"
            SELECT id, campaign_id, metric_id, feedback_text
            FROM feedbacks
            WHERE campaign_id = $1
            ORDER BY id
            "#,
        )
        .bind(campaign_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Delete a feedback record; returns true when a row was removed.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM feedbacks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
