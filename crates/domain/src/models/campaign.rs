//! Campaign domain model and payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Represents an advertising campaign owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: i64,
    pub name: String,
    pub platform: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<f64>,
    pub user_id: i64,
}

/// Request payload for creating or fully replacing a campaign.
///
/// Dates accept either ISO (`YYYY-MM-DD`) or `DD/MM/YYYY` text; the first
/// format that parses wins.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateCampaignRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 100, message = "Platform must be 1-100 characters"))]
    pub platform: String,

    #[serde(deserialize_with = "flexible_date::deserialize")]
    pub start_date: NaiveDate,

    #[serde(default, deserialize_with = "flexible_date::deserialize_opt")]
    pub end_date: Option<NaiveDate>,

    #[validate(range(min = 0.0, message = "Budget cannot be negative"))]
    pub budget: Option<f64>,
}

/// Response payload for campaign records.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CampaignResponse {
    pub id: i64,
    pub name: String,
    pub platform: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<f64>,
    pub user_id: i64,
}

impl From<Campaign> for CampaignResponse {
    fn from(campaign: Campaign) -> Self {
        Self {
            id: campaign.id,
            name: campaign.name,
            platform: campaign.platform,
            start_date: campaign.start_date,
            end_date: campaign.end_date,
            budget: campaign.budget,
            user_id: campaign.user_id,
        }
    }
}

/// Date deserialization accepting ISO or day/month/year text.
pub mod flexible_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer};

    /// Parses `YYYY-MM-DD` first, then `DD/MM/YYYY`.
    pub fn parse(value: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(value, "%d/%m/%Y"))
            .ok()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid date '{}', expected YYYY-MM-DD or DD/MM/YYYY",
                raw
            ))
        })
    }

    pub fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(value) => parse(&value).map(Some).ok_or_else(|| {
                serde::de::Error::custom(format!(
                    "invalid date '{}', expected YYYY-MM-DD or DD/MM/YYYY",
                    value
                ))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flexible_date_iso() {
        assert_eq!(
            flexible_date::parse("2024-03-01"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
    }

    #[test]
    fn test_flexible_date_day_month_year() {
        assert_eq!(
            flexible_date::parse("01/03/2024"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
    }

    #[test]
    fn test_flexible_date_iso_wins_first() {
        // An unambiguous ISO string must not be re-read as DD/MM.
        assert_eq!(
            flexible_date::parse("2024-12-05"),
            NaiveDate::from_ymd_opt(2024, 12, 5)
        );
    }

    #[test]
    fn test_flexible_date_rejects_garbage() {
        assert_eq!(flexible_date::parse("yesterday"), None);
        assert_eq!(flexible_date::parse("2024/03/01"), None);
        assert_eq!(flexible_date::parse("13/13/2024"), None);
    }

    #[test]
    fn test_create_request_deserializes_both_formats() {
        let request: CreateCampaignRequest = serde_json::from_str(
            r#"{"name":"Spring Sale","platform":"google_ads",
                "start_date":"2024-03-01","end_date":"30/04/2024","budget":1500.0}"#,
        )
        .unwrap();

        assert_eq!(request.start_date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(request.end_date, NaiveDate::from_ymd_opt(2024, 4, 30));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_request_end_date_optional() {
        let request: CreateCampaignRequest = serde_json::from_str(
            r#"{"name":"Spring Sale","platform":"google_ads","start_date":"2024-03-01"}"#,
        )
        .unwrap();
        assert_eq!(request.end_date, None);
        assert_eq!(request.budget, None);
    }

    #[test]
    fn test_create_request_bad_date_fails() {
        let result: Result<CreateCampaignRequest, _> = serde_json::from_str(
            r#"{"name":"Spring Sale","platform":"google_ads","start_date":"soon"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_budget_rejected() {
        let request: CreateCampaignRequest = serde_json::from_str(
            r#"{"name":"Spring Sale","platform":"google_ads",
                "start_date":"2024-03-01","budget":-5.0}"#,
        )
        .unwrap();
        assert!(request.validate().is_err());
    }
}
