//! Aggregation over the currently visible rows
//!
//! Everything here is recomputed from the rows passed in. Callers pass the
//! filtered rows, so totals always track the active search.

use crate::models::AgentMonthlyRecord;
use crate::table::columns::{ColumnKey, TableRecord};
use serde::Serialize;

/// Total for one column of the projected table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum ColumnTotal {
    /// Identifier column, no meaningful total
    Blank,
    Sum(f64),
}

impl ColumnTotal {
    pub fn value(self) -> Option<f64> {
        match self {
            ColumnTotal::Blank => None,
            ColumnTotal::Sum(v) => Some(v),
        }
    }
}

/// Summary metrics shown above the monthly table
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricTotals {
    pub target: f64,
    pub achieved: f64,
    pub remaining: f64,
    pub count: usize,
}

/// Monthly records whose agent name contains `query`, case-insensitively.
///
/// An empty query keeps every record. Order is preserved.
pub fn filter_monthly(records: &[AgentMonthlyRecord], query: &str) -> Vec<AgentMonthlyRecord> {
    if query.is_empty() {
        return records.to_vec();
    }

    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|r| r.agent_name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Sum of `key` across `rows`.
///
/// Identifier keys give [`ColumnTotal::Blank`]. A key the record type has
/// no field for sums to zero, as do non-finite values.
pub fn column_total<R: TableRecord>(rows: &[R], key: ColumnKey) -> ColumnTotal {
    if key.is_identifier() {
        return ColumnTotal::Blank;
    }

    let sum = match R::accessor(key) {
        Some(acc) => rows.iter().map(|r| acc.number(r)).sum(),
        None => 0.0,
    };
    ColumnTotal::Sum(sum)
}

/// [`column_total`] for a key given by name; unknown names sum to zero
pub fn column_total_by_name<R: TableRecord>(rows: &[R], key: &str) -> ColumnTotal {
    match ColumnKey::parse(key) {
        Some(key) => column_total(rows, key),
        None => ColumnTotal::Sum(0.0),
    }
}

/// Target / achieved / remaining sums and the row count
pub fn metric_totals(rows: &[AgentMonthlyRecord]) -> MetricTotals {
    let sum = |key| column_total(rows, key).value().unwrap_or(0.0);
    MetricTotals {
        target: sum(ColumnKey::Target),
        achieved: sum(ColumnKey::Achieved),
        remaining: sum(ColumnKey::Remaining),
        count: rows.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AgentDailyRecord;

    fn agent(id: &str, name: &str, target: f64, achieved: f64) -> AgentMonthlyRecord {
        AgentMonthlyRecord {
            employee_id: id.to_string(),
            agent_name: name.to_string(),
            silver: 1.0,
            target,
            achieved,
            remaining: target - achieved,
            ..Default::default()
        }
    }

    fn roster() -> Vec<AgentMonthlyRecord> {
        vec![
            agent("E1", "Alice Moreau", 10.0, 6.0),
            agent("E2", "Bob Stone", 20.0, 25.0),
            agent("E3", "alicia Keys", 5.0, 1.0),
            agent("E4", "Carol", 8.0, 8.0),
        ]
    }

    #[test]
    fn test_scenario_single_record_empty_query() {
        let records = vec![AgentMonthlyRecord {
            employee_id: "E1".into(),
            agent_name: "Alice".into(),
            silver: 2.0,
            gold: 1.0,
            platinum: 0.0,
            standard: 0.0,
            target: 10.0,
            achieved: 6.0,
            remaining: 4.0,
        }];

        let filtered = filter_monthly(&records, "");
        assert_eq!(filtered, records);
        assert_eq!(
            metric_totals(&filtered),
            MetricTotals {
                target: 10.0,
                achieved: 6.0,
                remaining: 4.0,
                count: 1
            }
        );

        let filtered = filter_monthly(&records, "bob");
        assert!(filtered.is_empty());
        assert_eq!(metric_totals(&filtered), MetricTotals::default());
    }

    #[test]
    fn test_filter_case_insensitive_order_preserved() {
        let records = roster();
        let filtered = filter_monthly(&records, "ALI");
        let ids: Vec<_> = filtered.iter().map(|r| r.employee_id.as_str()).collect();
        assert_eq!(ids, vec!["E1", "E3"]);
    }

    #[test]
    fn test_filter_is_ordered_subsequence() {
        let records = roster();
        for query in ["", "a", "o", "zz", " ", "CAROL", "e"] {
            let filtered = filter_monthly(&records, query);
            let mut cursor = records.iter();
            for rec in &filtered {
                assert!(rec.agent_name.to_lowercase().contains(&query.to_lowercase()));
                assert!(cursor.any(|r| r == rec), "order broken for {:?}", query);
            }
        }
    }

    #[test]
    fn test_filter_table_driven() {
        let intl = vec![
            agent("E1", "Élodie Durand", 4.0, 1.0),
            agent("E2", "Jürgen Weiß", 6.0, 6.0),
            agent("E3", "ÖZLEM Kaya", 2.0, 0.0),
            agent("E4", "Marc", 3.0, 1.0),
        ];
        let cases: Vec<(&str, Vec<&str>)> = vec![
            ("é", vec!["E1"]),
            ("É", vec!["E1"]),
            ("ürg", vec!["E2"]),
            ("özlem", vec!["E3"]),
            ("Ö", vec!["E3"]),
            ("a", vec!["E1", "E3", "E4"]),
            ("a name longer than every agent name", vec![]),
            ("", vec!["E1", "E2", "E3", "E4"]),
        ];

        for (query, expected) in cases {
            let filtered = filter_monthly(&intl, query);
            let ids: Vec<_> = filtered.iter().map(|r| r.employee_id.as_str()).collect();
            assert_eq!(ids, expected, "query {:?}", query);

            let totals = metric_totals(&filtered);
            assert_eq!(totals.count, expected.len());
            let target: f64 = filtered.iter().map(|r| r.target).sum();
            assert_eq!(totals.target, target, "query {:?}", query);
        }

        let empty: Vec<AgentMonthlyRecord> = vec![];
        for query in ["", "x", "é"] {
            assert!(filter_monthly(&empty, query).is_empty());
            assert_eq!(metric_totals(&filter_monthly(&empty, query)), MetricTotals::default());
        }
    }

    #[test]
    fn test_query_not_trimmed() {
        let records = roster();
        // "Bob Stone" contains the space, "Carol" does not
        let filtered = filter_monthly(&records, "b ");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].employee_id, "E2");
    }

    #[test]
    fn test_column_total_identifiers_blank() {
        let records = roster();
        assert_eq!(column_total(&records, ColumnKey::EmpId), ColumnTotal::Blank);
        assert_eq!(column_total(&records, ColumnKey::AgentName), ColumnTotal::Blank);
        assert_eq!(column_total_by_name(&records, "empId"), ColumnTotal::Blank);
    }

    #[test]
    fn test_column_total_sums() {
        let records = roster();
        assert_eq!(column_total(&records, ColumnKey::Target), ColumnTotal::Sum(43.0));
        assert_eq!(column_total(&records, ColumnKey::Silver), ColumnTotal::Sum(4.0));
        assert_eq!(column_total(&records, ColumnKey::Gold), ColumnTotal::Sum(0.0));
        assert_eq!(
            column_total(&records, ColumnKey::Remaining),
            ColumnTotal::Sum(3.0)
        );
    }

    #[test]
    fn test_column_total_missing_and_malformed_as_zero() {
        let records = roster();
        // monthly records have no `total` field
        assert_eq!(column_total(&records, ColumnKey::Total), ColumnTotal::Sum(0.0));
        assert_eq!(column_total_by_name(&records, "bogus"), ColumnTotal::Sum(0.0));

        let daily = vec![
            AgentDailyRecord {
                silver: f64::NAN,
                total: 2.0,
                ..Default::default()
            },
            AgentDailyRecord {
                silver: 3.0,
                total: f64::INFINITY,
                ..Default::default()
            },
        ];
        assert_eq!(column_total(&daily, ColumnKey::Silver), ColumnTotal::Sum(3.0));
        assert_eq!(column_total(&daily, ColumnKey::Total), ColumnTotal::Sum(2.0));
    }

    #[test]
    fn test_column_total_empty_rows() {
        let rows: Vec<AgentDailyRecord> = vec![];
        assert_eq!(column_total(&rows, ColumnKey::Total), ColumnTotal::Sum(0.0));
        assert_eq!(column_total(&rows, ColumnKey::EmpId), ColumnTotal::Blank);
    }

    #[test]
    fn test_metrics_track_filter() {
        let records = roster();

        let all = metric_totals(&filter_monthly(&records, ""));
        assert_eq!(all.count, 4);
        assert_eq!(all.target, 43.0);

        let alis = metric_totals(&filter_monthly(&records, "ali"));
        assert_eq!(alis.count, 2);
        assert_eq!(alis.target, 15.0);
        assert_eq!(alis.achieved, 7.0);
        assert_eq!(alis.remaining, 8.0);

        // changing the filter back must not reuse the narrower sums
        let again = metric_totals(&filter_monthly(&records, ""));
        assert_eq!(again, all);
    }
}
