// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Dashboard aggregates computed by the backend.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    #[serde(default)]
    pub total_active_users: u64,
    #[serde(default)]
    pub total_reports: u64,
    #[serde(default)]
    pub reports_by_status: StatusCounts,
    pub resolution_rate_comparison: ResolutionComparison,
}

/// Report count per status. Statuses the backend omits count as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusCounts {
    pub pending: u64,
    pub in_progress: u64,
    pub resolved: u64,
    pub rejected: u64,
}

/// Resolution rate of one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSegment {
    /// Display label, e.g. "novembro de 2025"
    pub month: String,
    pub total: u64,
    pub resolved: u64,
    /// Percentage, 0-100
    pub rate: f64,
}

/// Current month against the previous one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionComparison {
    pub current_month: MonthSegment,
    pub last_month: MonthSegment,
    /// Difference in percentage points
    #[serde(default)]
    pub difference: f64,
    /// Relative change; null when last month had no resolutions to compare with
    #[serde(default)]
    pub percentage_change: Option<f64>,
}

/// Opened vs resolved counts for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub date: String,
    #[serde(default)]
    pub open: u64,
    #[serde(default)]
    pub resolved: u64,
}

/// Weighted location for the heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapPoint {
    pub lat: f64,
    pub lng: f64,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

/// Window offered by the opened/resolved chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DateRange {
    Last14Days,
    #[default]
    Last30Days,
    Last45Days,
    Last60Days,
}

impl DateRange {
    pub const ALL: [DateRange; 4] = [
        DateRange::Last14Days,
        DateRange::Last30Days,
        DateRange::Last45Days,
        DateRange::Last60Days,
    ];

    pub fn days(self) -> i64 {
        match self {
            DateRange::Last14Days => 14,
            DateRange::Last30Days => 30,
            DateRange::Last45Days => 45,
            DateRange::Last60Days => 60,
        }
    }

    pub fn from_days(days: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.days() == days)
    }

    /// `(start, end)` ending at `now`.
    pub fn bounds(self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        (now - Duration::days(self.days()), now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_tolerate_missing_counts_and_null_change() {
        let json = r#"{
            "totalActiveUsers": 4,
            "totalReports": 10,
            "reportsByStatus": {"pending": 3, "resolved": 5, "rejected": 2},
            "resolutionRateComparison": {
                "currentMonth": {"month": "novembro de 2025", "total": 4, "resolved": 2, "rate": 50.0},
                "lastMonth": {"month": "outubro de 2025", "total": 0, "resolved": 0, "rate": 0.0},
                "difference": 50.0,
                "percentageChange": null
            }
        }"#;
        let metrics: DashboardMetrics = serde_json::from_str(json).unwrap();
        assert_eq!(metrics.reports_by_status.in_progress, 0);
        assert_eq!(metrics.reports_by_status.resolved, 5);
        assert_eq!(metrics.resolution_rate_comparison.percentage_change, None);
    }

    #[test]
    fn test_date_range_bounds() {
        let now = DateTime::parse_from_rfc3339("2025-11-30T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let (start, end) = DateRange::Last14Days.bounds(now);
        assert_eq!(end, now);
        assert_eq!((end - start).num_days(), 14);
        assert_eq!(DateRange::from_days(45), Some(DateRange::Last45Days));
        assert_eq!(DateRange::from_days(7), None);
    }
}
