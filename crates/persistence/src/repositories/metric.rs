//! Metric repository for database operations.
//!
//! Owner-scoped operations join through the campaigns table so a metric can
//! only be touched by the owner of its campaign.

use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, Transaction};

use crate::entities::MetricEntity;

/// Raw counters for one metric row insert.
#[derive(Debug, Clone)]
pub struct MetricInput {
    pub campaign_id: i64,
    pub impressions: i64,
    pub clicks: i64,
    pub conversions: i64,
    pub total_spend: f64,
    pub record_date: NaiveDate,
}

/// Repository for metric-related database operations.
#[derive(Clone)]
pub struct MetricRepository {
    pool: PgPool,
}

impl MetricRepository {
    /// Creates a new MetricRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a metric row.
    pub async fn create(&self, input: &MetricInput) -> Result<MetricEntity, sqlx::Error> {
        sqlx::query_as::<_, MetricEntity>(INSERT_SQL)
            .bind(input.campaign_id)
            .bind(input.impressions)
            .bind(input.clicks)
            .bind(input.conversions)
            .bind(input.total_spend)
            .bind(input.record_date)
            .fetch_one(&self.pool)
            .await
    }

    /// Insert a metric row inside an open transaction (bulk import).
    pub async fn create_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        input: &MetricInput,
    ) -> Result<MetricEntity, sqlx::Error> {
        sqlx::query_as::<_, MetricEntity>(INSERT_SQL)
            .bind(input.campaign_id)
            .bind(input.impressions)
            .bind(input.clicks)
            .bind(input.conversions)
            .bind(input.total_spend)
            .bind(input.record_date)
            .fetch_one(&mut **tx)
            .await
    }

    /// List all metrics for one campaign, newest record date first.
    pub async fn list_by_campaign(&self, campaign_id: i64) -> Result<Vec<MetricEntity>, sqlx::Error> {
        sqlx::query_as::<_, MetricEntity>(
            r#"
            SELECT id, campaign_id, impressions, clicks, conversions, total_spend, record_date
            FROM metrics
            WHERE campaign_id = $1
            ORDER BY record_date DESC, id DESC
            "#,
        )
        .bind(campaign_id)
        .fetch_all(&self.pool)
        .await
    }

    /// List metrics across every campaign owned by a user.
    pub async fn list_for_owner(&self, user_id: i64) -> Result<Vec<MetricEntity>, sqlx::Error> {
        sqlx::query_as::<_, MetricEntity>(
            r#"
            SELECT m.id, m.campaign_id, m.impressions, m.clicks, m.conversions,
                   m.total_spend, m.record_date
            FROM metrics m
            JOIN campaigns c ON c.id = m.campaign_id
            WHERE c.user_id = $1
            ORDER BY m.record_date DESC, m.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Find a metric only if its campaign is owned by the given user.
    pub async fn find_owned(
        &self,
        id: i64,
        user_id: i64,
    ) -> Result<Option<MetricEntity>, sqlx::Error> {
        sqlx::query_as::<_, MetricEntity>(
            r#"
            SELECT m.id, m.campaign_id, m.impressions, m.clicks, m.conversions,
                   m.total_spend, m.record_date
            FROM metrics m
            JOIN campaigns c ON c.id = m.campaign_id
            WHERE m.id = $1 AND c.user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Find a metric only if it belongs to the stated campaign.
    pub async fn find_for_campaign(
        &self,
        id: i64,
        campaign_id: i64,
    ) -> Result<Option<MetricEntity>, sqlx::Error> {
        sqlx::query_as::<_, MetricEntity>(
            r#"
            SELECT id, campaign_id, impressions, clicks, conversions, total_spend, record_date
            FROM metrics
            WHERE id = $1 AND campaign_id = $2
            "#,
        )
        .bind(id)
        .bind(campaign_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// The campaign's most recently dated metric, if any.
    pub async fn latest_for_campaign(
        &self,
        campaign_id: i64,
    ) -> Result<Option<MetricEntity>, sqlx::Error> {
        sqlx::query_as::<_, MetricEntity>(
            r#"
            SELECT id, campaign_id, impressions, clicks, conversions, total_spend, record_date
            FROM metrics
            WHERE campaign_id = $1
            ORDER BY record_date DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(campaign_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Full-field update of an owner's metric.
    pub async fn update_owned(
        &self,
        id: i64,
        user_id: i64,
        input: &MetricInput,
    ) -> Result<Option<MetricEntity>, sqlx::Error> {
        sqlx::query_as::<_, MetricEntity>(
            r#"
            UPDATE metrics m
            SET campaign_id = $3, impressions = $4, clicks = $5, conversions = $6,
                total_spend = $7, record_date = $8
            FROM campaigns c
            WHERE m.id = $1 AND c.id = m.campaign_id AND c.user_id = $2
            RETURNING m.id, m.campaign_id, m.impressions, m.clicks, m.conversions,
                      m.total_spend, m.record_date
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(input.campaign_id)
        .bind(input.impressions)
        .bind(input.clicks)
        .bind(input.conversions)
        .bind(input.total_spend)
        .bind(input.record_date)
        .fetch_optional(&self.pool)
        .await
    }

    /// Delete an owner's metric; returns true when a row was removed.
    pub async fn delete_owned(&self, id: i64, user_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM metrics m
            USING campaigns c
            WHERE m.id = $1 AND c.id = m.campaign_id AND c.user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

const INSERT_SQL: &str = r#"
    INSERT INTO metrics (campaign_id, impressions, clicks, conversions, total_spend, record_date)
    VALUES ($1, $2, $3, $4, $5, $6)
    RETURNING id, campaign_id, impressions, clicks, conversions, total_spend, record_date
"#;
