//! CLI output formatting
//!
//! Renders dashboard snapshots, day lists and month lists as comfy-table
//! text or JSON.

use actboard_core::format::format_number;
use actboard_core::table::{Cell as ProjectedCell, TableProjection};
use actboard_core::{DashboardConfig, DashboardSnapshot, MetricTotals, Month};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Row, Table};
use std::path::Path;

// ============================================================================
// Formatters
// ============================================================================

/// Format a snapshot as metrics + table (human) or JSON
pub fn format_snapshot(snapshot: &DashboardSnapshot, json: bool, no_color: bool) -> String {
    if json {
        return serde_json::to_string_pretty(snapshot).unwrap_or_else(|_| "{}".to_string());
    }

    let mut lines = vec![];
    lines.push(format!("Activation Dashboard - {}", snapshot.month));
    if let Some(metrics) = &snapshot.metrics {
        if !snapshot.query.is_empty() {
            lines.push(format!("Search:           {}", snapshot.query));
        }
        lines.push(format_metrics(metrics));
    }
    lines.push(String::new());
    lines.push(snapshot.table_title());
    lines.push(format_projection(&snapshot.table, no_color));

    if snapshot.table.rows.is_empty() {
        lines.push("No rows.".to_string());
    }

    lines.join("\n")
}

pub fn format_metrics(metrics: &MetricTotals) -> String {
    [
        format!("Total Target:     {}", format_number(metrics.target)),
        format!("Total Achieved:   {}", format_number(metrics.achieved)),
        format!("Total Remaining:  {}", format_number(metrics.remaining)),
        format!("Total Agents:     {}", metrics.count),
    ]
    .join("\n")
}

fn table_cell(cell: &ProjectedCell, no_color: bool) -> Cell {
    match cell {
        ProjectedCell::Number { display, .. } => {
            Cell::new(display).set_alignment(CellAlignment::Right)
        }
        ProjectedCell::Label { text } if no_color => Cell::new(text),
        ProjectedCell::Label { text } => Cell::new(text).add_attribute(Attribute::Bold),
        other => Cell::new(other.display()),
    }
}

/// Render a projection as a comfy-table, totals row last
pub fn format_projection(table: &TableProjection, no_color: bool) -> String {
    let mut out = Table::new();
    out.set_content_arrangement(ContentArrangement::Dynamic);

    // Apply colors only if enabled
    if no_color {
        out.set_header(table.header.iter().map(|h| Cell::new(&h.label)));
    } else {
        out.set_header(
            table
                .header
                .iter()
                .map(|h| Cell::new(&h.label).fg(Color::Cyan)),
        );
    }

    for row in &table.rows {
        out.add_row(Row::from(
            row.iter()
                .map(|c| table_cell(c, no_color))
                .collect::<Vec<_>>(),
        ));
    }

    let totals: Vec<Cell> = table
        .totals
        .iter()
        .map(|c| {
            let cell = table_cell(c, no_color);
            if no_color {
                cell
            } else {
                cell.fg(Color::Yellow)
            }
        })
        .collect();
    out.add_row(Row::from(totals));

    out.to_string()
}

/// Format available days (one per line) or JSON
pub fn format_days(month: Month, days: &[String], json: bool) -> String {
    if json {
        return serde_json::to_string_pretty(days).unwrap_or_else(|_| "[]".to_string());
    }
    if days.is_empty() {
        return format!("No days available for {}.", month);
    }
    days.join("\n")
}

/// All twelve months, marking those the provider has data for
pub fn format_months(available: &[Month], no_color: bool) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    if no_color {
        table.set_header(vec!["Month", "Data"]);
    } else {
        table.set_header(vec![
            Cell::new("Month").fg(Color::Cyan),
            Cell::new("Data").fg(Color::Cyan),
        ]);
    }

    for &month in Month::all() {
        let has_data = available.contains(&month);
        let marker = if has_data { "✓" } else { "-" };
        let marker_cell = if no_color {
            Cell::new(marker)
        } else if has_data {
            Cell::new(marker).fg(Color::Green)
        } else {
            Cell::new(marker).fg(Color::DarkGrey)
        };
        table.add_row(vec![Cell::new(month.name()), marker_cell]);
    }

    table.to_string()
}

/// Effective configuration as JSON, followed by where it lives
pub fn format_config(config: &DashboardConfig, dir: Option<&Path>, saved: bool) -> String {
    let json = serde_json::to_string_pretty(config).unwrap_or_else(|_| "{}".to_string());
    let location = match dir {
        Some(dir) if saved => format!("Saved to {}", dir.join("config.json").display()),
        Some(dir) => format!("Config file: {}", dir.join("config.json").display()),
        None => "No config directory on this platform".to_string(),
    };
    format!("{}\n{}", json, location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actboard_core::{compose, AgentMonthlyRecord, MonthDataset, ViewConfig, ViewState};
    use chrono::NaiveDate;

    fn snapshot(query: &str) -> DashboardSnapshot {
        let ds = MonthDataset::new(
            vec![
                AgentMonthlyRecord {
                    employee_id: "E1".into(),
                    agent_name: "Alice".into(),
                    target: 1200.0,
                    achieved: 200.0,
                    remaining: 1000.0,
                    ..Default::default()
                },
                AgentMonthlyRecord {
                    employee_id: "E2".into(),
                    agent_name: "Bob".into(),
                    target: 10.0,
                    achieved: 10.0,
                    remaining: 0.0,
                    ..Default::default()
                },
            ],
            Default::default(),
        );
        let today = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        let mut view = ViewState::new(ViewConfig::new(today));
        view.set_search_query(query);
        compose(&view, Some(&ds))
    }

    #[test]
    fn test_format_snapshot_text() {
        let out = format_snapshot(&snapshot(""), false, true);
        assert!(out.starts_with("Activation Dashboard - May"));
        assert!(out.contains("Total Target:     1,210"));
        assert!(out.contains("Total Agents:     2"));
        assert!(out.contains("Monthly Overview"));
        assert!(out.contains("Emp ID"));
        assert!(out.contains("Totals"));
        assert!(!out.contains("Search:"));
    }

    #[test]
    fn test_format_snapshot_filtered() {
        let out = format_snapshot(&snapshot("bo"), false, true);
        assert!(out.contains("Search:           bo"));
        assert!(out.contains("Total Agents:     1"));
        assert!(!out.contains("Alice"));
    }

    #[test]
    fn test_format_snapshot_json() {
        let out = format_snapshot(&snapshot(""), true, true);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["month"], "May");
        assert_eq!(value["metrics"]["count"], 2);
        assert_eq!(value["table"]["totals"][0]["text"], "Totals");
    }

    #[test]
    fn test_format_days() {
        let days = vec!["2024-05-01".to_string(), "2024-05-02".to_string()];
        assert_eq!(format_days(Month::May, &days, false), "2024-05-01\n2024-05-02");
        assert_eq!(format_days(Month::May, &[], false), "No days available for May.");
        assert_eq!(
            format_days(Month::May, &days, true),
            "[\n  \"2024-05-01\",\n  \"2024-05-02\"\n]"
        );
    }

    #[test]
    fn test_format_config() {
        let config = DashboardConfig {
            default_month: Some(Month::June),
            ..Default::default()
        };
        let dir = Path::new("/home/u/.config/actboard");

        let out = format_config(&config, Some(dir), false);
        assert!(out.contains("\"defaultMonth\": \"June\""));
        assert!(out.contains("\"fetchRetries\": 3"));
        assert!(out.ends_with("Config file: /home/u/.config/actboard/config.json"));

        let out = format_config(&config, Some(dir), true);
        assert!(out.ends_with("Saved to /home/u/.config/actboard/config.json"));
        assert!(format_config(&config, None, false).ends_with("No config directory on this platform"));
    }

    #[test]
    fn test_format_months_marks_available() {
        let out = format_months(&[Month::May], true);
        let may_line = out.lines().find(|l| l.contains("May")).unwrap();
        assert!(may_line.contains('✓'));
        let june_line = out.lines().find(|l| l.contains("June")).unwrap();
        assert!(!june_line.contains('✓'));
    }
}
