//! Campaign repository for database operations.
//!
//! Ownership-scoped lookups take the owner's user id so handlers cannot reach
//! another user's campaigns.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::entities::CampaignEntity;

/// Repository for campaign-related database operations.
#[derive(Clone)]
pub struct CampaignRepository {
    pool: PgPool,
}

impl CampaignRepository {
    /// Creates a new CampaignRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a campaign owned by the given user.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        name: &str,
        platform: &str,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        budget: Option<f64>,
        user_id: i64,
    ) -> Result<CampaignEntity, sqlx::Error> {
        sqlx::query_as::<_, CampaignEntity>(
            r#"
            INSERT INTO campaigns (name, platform, start_date, end_date, budget, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, platform, start_date, end_date, budget, user_id
            "#,
        )
        .bind(name)
        .bind(platform)
        .bind(start_date)
        .bind(end_date)
        .bind(budget)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }

    /// List all campaigns owned by a user.
    pub async fn list_by_owner(&self, user_id: i64) -> Result<Vec<CampaignEntity>, sqlx::Error> {
        sqlx::query_as::<_, CampaignEntity>(
            r#"
            SELECT id, name, platform, start_date, end_date, budget, user_id
            FROM campaigns
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Find a campaign by id regardless of owner (external feedback surface).
    pub async fn find_by_id(&self, id: i64) -> Result<Option<CampaignEntity>, sqlx::Error> {
        sqlx::query_as::<_, CampaignEntity>(
            r#"
            SELECT id, name, platform, start_date, end_date, budget, user_id
            FROM campaigns
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Find a campaign only if it is owned by the given user.
    pub async fn find_owned(
        &self,
        id: i64,
        user_id: i64,
    ) -> Result<Option<CampaignEntity>, sqlx::Error> {
        sqlx::query_as::<_, CampaignEntity>(
            r#"
            SELECT id, name, platform, start_date, end_date, budget, user_id
            FROM campaigns
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Resolve an owned campaign by its name (used by the bulk import).
    pub async fn find_owned_by_name(
        &self,
        name: &str,
        user_id: i64,
    ) -> Result<Option<CampaignEntity>, sqlx::Error> {
        sqlx::query_as::<_, CampaignEntity>(
            r#"
            SELECT id, name, platform, start_date, end_date, budget, user_id
            FROM campaigns
            WHERE name = $1 AND user_id = $2
            "#,
        )
        .bind(name)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Full-field update of an owned campaign.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_owned(
        &self,
        id: i64,
        user_id: i64,
        name: &str,
        platform: &str,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        budget: Option<f64>,
    ) -> Result<Option<CampaignEntity>, sqlx::Error> {
        sqlx::query_as::<_, CampaignEntity>(
            r#"
            UPDATE campaigns
            SET name = $3, platform = $4, start_date = $5, end_date = $6, budget = $7
            WHERE id = $1 AND user_id = $2
            RETURNING id, name, platform, start_date, end_date, budget, user_id
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(name)
        .bind(platform)
        .bind(start_date)
        .bind(end_date)
        .bind(budget)
        .fetch_optional(&self.pool)
        .await
    }

    /// Delete an owned campaign; dependent metrics and feedback cascade.
    pub async fn delete_owned(&self, id: i64, user_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM campaigns WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
