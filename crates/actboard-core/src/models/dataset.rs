//! Per-month dataset as supplied by a data provider

use super::agent::{AgentDailyRecord, AgentMonthlyRecord};
use crate::error::LoadReport;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Tolerance for comparing supplied vs. derived figures
const EPSILON: f64 = 1e-9;

/// Monthly summary plus the per-day breakdown for one month
///
/// `daily` is keyed by a lexicographically sortable day identifier
/// (ISO date in practice).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthDataset {
    #[serde(default)]
    pub monthly: Vec<AgentMonthlyRecord>,
    #[serde(default)]
    pub daily: BTreeMap<String, Vec<AgentDailyRecord>>,
}

impl MonthDataset {
    pub fn new(
        monthly: Vec<AgentMonthlyRecord>,
        daily: BTreeMap<String, Vec<AgentDailyRecord>>,
    ) -> Self {
        Self { monthly, daily }
    }

    /// Day identifiers in ascending order
    pub fn days(&self) -> Vec<String> {
        // BTreeMap iterates in key order
        self.daily.keys().cloned().collect()
    }

    /// Rows for `day`, empty when the day is unknown
    pub fn day_rows(&self, day: &str) -> &[AgentDailyRecord] {
        self.daily.get(day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.monthly.is_empty() && self.daily.is_empty()
    }

    /// Check the invariants the source is expected to uphold.
    ///
    /// - employee ids are unique within `monthly`
    /// - `remaining == target - achieved`
    /// - daily `total == silver + gold + platinum + standard`
    /// - day identifiers are non-empty
    pub fn validate(&self) -> LoadReport {
        let mut report = LoadReport::new();
        report.monthly_rows = self.monthly.len();
        report.days = self.daily.len();

        let mut seen = HashSet::new();
        for rec in &self.monthly {
            if !seen.insert(rec.employee_id.as_str()) {
                report.add_error(
                    "monthly",
                    format!("duplicate employee id {}", rec.employee_id),
                );
            }
            if (rec.remaining - rec.expected_remaining()).abs() > EPSILON {
                report.add_warning(
                    format!("monthly[{}]", rec.employee_id),
                    format!(
                        "remaining {} does not match target {} - achieved {}",
                        rec.remaining, rec.target, rec.achieved
                    ),
                );
            }
        }

        for (day, rows) in &self.daily {
            if day.is_empty() {
                report.add_warning("daily", "empty day identifier");
            }
            for rec in rows {
                if (rec.total - rec.tier_sum()).abs() > EPSILON {
                    report.add_warning(
                        format!("daily[{}][{}]", day, rec.employee_id),
                        format!(
                            "total {} does not match tier sum {}",
                            rec.total,
                            rec.tier_sum()
                        ),
                    );
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IssueSeverity;

    fn monthly(id: &str, target: f64, achieved: f64, remaining: f64) -> AgentMonthlyRecord {
        AgentMonthlyRecord {
            employee_id: id.to_string(),
            agent_name: format!("Agent {}", id),
            target,
            achieved,
            remaining,
            ..Default::default()
        }
    }

    #[test]
    fn test_days_sorted() {
        let mut daily = BTreeMap::new();
        daily.insert("2024-05-10".to_string(), vec![]);
        daily.insert("2024-05-02".to_string(), vec![]);
        daily.insert("2024-05-01".to_string(), vec![]);
        let ds = MonthDataset::new(vec![], daily);

        assert_eq!(ds.days(), vec!["2024-05-01", "2024-05-02", "2024-05-10"]);
    }

    #[test]
    fn test_unknown_day_is_empty() {
        let ds = MonthDataset::default();
        assert!(ds.day_rows("2024-05-02").is_empty());
    }

    #[test]
    fn test_validate_clean() {
        let ds = MonthDataset::new(vec![monthly("E1", 10.0, 6.0, 4.0)], BTreeMap::new());
        let report = ds.validate();
        assert!(report.is_clean());
        assert_eq!(report.monthly_rows, 1);
    }

    #[test]
    fn test_validate_reports_inconsistencies() {
        let mut daily = BTreeMap::new();
        daily.insert(
            "2024-05-01".to_string(),
            vec![AgentDailyRecord {
                employee_id: "E1".to_string(),
                silver: 1.0,
                gold: 2.0,
                total: 4.0,
                ..Default::default()
            }],
        );
        let ds = MonthDataset::new(
            vec![monthly("E1", 10.0, 6.0, 5.0), monthly("E1", 1.0, 1.0, 0.0)],
            daily,
        );

        let report = ds.validate();
        assert_eq!(report.issue_count(), (2, 1));
        assert!(report
            .issues
            .iter()
            .any(|i| i.severity == IssueSeverity::Error && i.message.contains("duplicate")));
        assert!(report.issues.iter().any(|i| i.source == "daily[2024-05-01][E1]"));
    }

    #[test]
    fn test_deserialize_dataset() {
        let json = r#"{
            "monthly": [
                {"empId": "E1", "agentName": "Alice", "silver": 2, "gold": 1,
                 "platinum": 0, "standard": 0, "target": 10, "achieved": 6, "remaining": 4}
            ],
            "daily": {
                "2024-05-01": [
                    {"empId": "E1", "agentName": "Alice", "silver": 1, "gold": 0,
                     "platinum": 0, "standard": 0, "total": 1}
                ]
            }
        }"#;
        let ds: MonthDataset = serde_json::from_str(json).unwrap();
        assert_eq!(ds.monthly.len(), 1);
        assert_eq!(ds.day_rows("2024-05-01").len(), 1);
        assert!(ds.validate().is_clean());
    }
}
