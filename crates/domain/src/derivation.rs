//! Derived performance ratios computed from raw metric counters.
//!
//! This is the only non-trivial arithmetic in the system. It must stay
//! deterministic and side-effect-free; every division is zero-guarded and the
//! results are rounded to two decimals before transmission.

use serde::Serialize;

/// Ratios derived from one metric row's raw counters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedMetrics {
    /// Click-through rate: clicks / impressions * 100
    pub ctr: f64,
    /// Conversion rate: conversions / clicks * 100
    pub conversion_rate: f64,
    /// Cost per click: spend / clicks
    pub cpc: f64,
    /// Cost per acquisition: spend / conversions
    pub cpa: f64,
}

impl DerivedMetrics {
    /// Computes all four ratios from raw counters.
    ///
    /// A zero denominator yields 0 for that ratio rather than an error.
    pub fn from_counters(impressions: i64, clicks: i64, conversions: i64, total_spend: f64) -> Self {
        let ctr = if impressions > 0 {
            clicks as f64 / impressions as f64 * 100.0
        } else {
            0.0
        };
        let conversion_rate = if clicks > 0 {
            conversions as f64 / clicks as f64 * 100.0
        } else {
            0.0
        };
        let cpc = if clicks > 0 {
            total_spend / clicks as f64
        } else {
            0.0
        };
        let cpa = if conversions > 0 {
            total_spend / conversions as f64
        } else {
            0.0
        };

        Self {
            ctr: round2(ctr),
            conversion_rate: round2(conversion_rate),
            cpc: round2(cpc),
            cpa: round2(cpa),
        }
    }
}

/// Rounds to 2 decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctr_matches_formula() {
        let d = DerivedMetrics::from_counters(10_000, 250, 0, 0.0);
        assert_eq!(d.ctr, 2.5);

        let d = DerivedMetrics::from_counters(3, 1, 0, 0.0);
        // 1/3 * 100 = 33.333... rounds to 33.33
        assert_eq!(d.ctr, 33.33);
    }

    #[test]
    fn test_zero_impressions_yields_zero_ctr() {
        let d = DerivedMetrics::from_counters(0, 0, 0, 99.0);
        assert_eq!(d.ctr, 0.0);
    }

    #[test]
    fn test_conversion_rate_matches_formula() {
        let d = DerivedMetrics::from_counters(1000, 80, 12, 0.0);
        assert_eq!(d.conversion_rate, 15.0);

        let d = DerivedMetrics::from_counters(1000, 7, 2, 0.0);
        // 2/7 * 100 = 28.571... rounds to 28.57
        assert_eq!(d.conversion_rate, 28.57);
    }

    #[test]
    fn test_zero_clicks_yields_zero_rate_and_cpc() {
        let d = DerivedMetrics::from_counters(500, 0, 0, 120.0);
        assert_eq!(d.conversion_rate, 0.0);
        assert_eq!(d.cpc, 0.0);
    }

    #[test]
    fn test_cpc_and_cpa() {
        let d = DerivedMetrics::from_counters(10_000, 200, 25, 150.0);
        assert_eq!(d.cpc, 0.75);
        assert_eq!(d.cpa, 6.0);
    }

    #[test]
    fn test_zero_clicks_with_conversions_still_computes_cpa() {
        // Degenerate counters, but CPA only depends on conversions.
        let d = DerivedMetrics::from_counters(500, 0, 4, 100.0);
        assert_eq!(d.cpc, 0.0);
        assert_eq!(d.cpa, 25.0);
    }

    #[test]
    fn test_zero_conversions_yields_zero_cpa() {
        let d = DerivedMetrics::from_counters(500, 10, 0, 100.0);
        assert_eq!(d.cpa, 0.0);
        assert_eq!(d.cpc, 10.0);
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        let d = DerivedMetrics::from_counters(10_000, 333, 7, 99.99);
        assert_eq!(d.ctr, 3.33);
        assert_eq!(d.conversion_rate, 2.1);
        assert_eq!(d.cpc, 0.3);
        assert_eq!(d.cpa, 14.28);
    }

    #[test]
    fn test_deterministic() {
        let a = DerivedMetrics::from_counters(1234, 56, 7, 89.1);
        let b = DerivedMetrics::from_counters(1234, 56, 7, 89.1);
        assert_eq!(a, b);
    }
}
