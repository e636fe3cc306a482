//! Row types for the tabular metric import.
//!
//! The importer reads rows keyed by header name, so extra columns are ignored
//! and column order does not matter. Numeric conversion happens here so a bad
//! row yields one error string naming its campaign instead of aborting the
//! whole batch.

use serde::{Deserialize, Serialize};

/// Header columns the import file must provide.
pub const REQUIRED_IMPORT_COLUMNS: [&str; 5] = [
    "campaign_name",
    "impressions",
    "clicks",
    "conversions",
    "total_spend",
];

/// One raw row as read from the file, before numeric conversion.
#[derive(Debug, Clone, Deserialize)]
pub struct RawImportRow {
    pub campaign_name: String,
    pub impressions: String,
    pub clicks: String,
    pub conversions: String,
    pub total_spend: String,
}

/// One row with counters converted, ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricImportRow {
    pub campaign_name: String,
    pub impressions: i64,
    pub clicks: i64,
    pub conversions: i64,
    pub total_spend: f64,
}

impl RawImportRow {
    /// Converts the numeric fields, reporting which field failed.
    pub fn parse(&self) -> Result<MetricImportRow, String> {
        let campaign_name = self.campaign_name.trim().to_string();

        let impressions = parse_count(&self.impressions, "impressions", &campaign_name)?;
        let clicks = parse_count(&self.clicks, "clicks", &campaign_name)?;
        let conversions = parse_count(&self.conversions, "conversions", &campaign_name)?;

        let total_spend: f64 = self.total_spend.trim().parse().map_err(|_| {
            format!(
                "Row for campaign '{}': invalid total_spend '{}'",
                campaign_name,
                self.total_spend.trim()
            )
        })?;
        // f64::parse accepts "nan" and "inf"; neither may reach the store.
        if !total_spend.is_finite() {
            return Err(format!(
                "Row for campaign '{}': invalid total_spend '{}'",
                campaign_name,
                self.total_spend.trim()
            ));
        }
        if total_spend < 0.0 {
            return Err(format!(
                "Row for campaign '{}': total_spend cannot be negative",
                campaign_name
            ));
        }

        Ok(MetricImportRow {
            campaign_name,
            impressions,
            clicks,
            conversions,
            total_spend,
        })
    }
}

fn parse_count(raw: &str, field: &str, campaign: &str) -> Result<i64, String> {
    let value: i64 = raw.trim().parse().map_err(|_| {
        format!(
            "Row for campaign '{}': invalid {} '{}'",
            campaign,
            field,
            raw.trim()
        )
    })?;
    if value < 0 {
        return Err(format!(
            "Row for campaign '{}': {} cannot be negative",
            campaign, field
        ));
    }
    Ok(value)
}

/// Summary returned after a bulk import: inserted count plus one error string
/// per skipped row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ImportReport {
    pub message: String,
    pub inserted: usize,
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, i: &str, c: &str, v: &str, s: &str) -> RawImportRow {
        RawImportRow {
            campaign_name: name.into(),
            impressions: i.into(),
            clicks: c.into(),
            conversions: v.into(),
            total_spend: s.into(),
        }
    }

    #[test]
    fn test_valid_row_parses() {
        let row = raw("Spring Sale", "1000", "50", "5", "12.75").parse().unwrap();
        assert_eq!(
            row,
            MetricImportRow {
                campaign_name: "Spring Sale".into(),
                impressions: 1000,
                clicks: 50,
                conversions: 5,
                total_spend: 12.75,
            }
        );
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let row = raw("  Spring Sale ", " 1000 ", "50", "5", " 12.75").parse().unwrap();
        assert_eq!(row.campaign_name, "Spring Sale");
        assert_eq!(row.impressions, 1000);
    }

    #[test]
    fn test_bad_number_names_the_campaign_and_field() {
        let err = raw("Spring Sale", "1000", "lots", "5", "12.75")
            .parse()
            .unwrap_err();
        assert!(err.contains("Spring Sale"));
        assert!(err.contains("clicks"));
    }

    #[test]
    fn test_negative_counter_rejected() {
        let err = raw("Spring Sale", "-3", "0", "0", "0").parse().unwrap_err();
        assert!(err.contains("impressions"));
        assert!(err.contains("negative"));
    }

    #[test]
    fn test_negative_spend_rejected() {
        let err = raw("Spring Sale", "10", "1", "0", "-1.5").parse().unwrap_err();
        assert!(err.contains("total_spend"));
    }

    #[test]
    fn test_non_finite_spend_rejected() {
        for value in ["nan", "NaN", "inf", "-inf", "infinity"] {
            let err = raw("Spring Sale", "10", "1", "0", value).parse().unwrap_err();
            assert!(err.contains("total_spend"), "'{}' must be rejected", value);
        }
    }
}
