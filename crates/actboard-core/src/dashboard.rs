//! Snapshot of everything the presentation layer needs for one frame
//!
//! `compose` is the pure state machine: Monthly shows the filtered summary
//! with metrics, Daily shows the unfiltered rows of one day.

use crate::aggregate::{filter_monthly, metric_totals, MetricTotals};
use crate::models::{Month, MonthDataset};
use crate::table::{daily_columns, monthly_columns, project, TableProjection};
use crate::view::{ViewMode, ViewState};
use serde::Serialize;

/// Render-ready state for the current selection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub month: Month,
    pub mode: ViewMode,
    pub query: String,
    /// Present in monthly mode only
    pub metrics: Option<MetricTotals>,
    pub table: TableProjection,
    pub available_days: Vec<String>,
    pub loading: bool,
    /// Month the displayed data belongs to; differs from `month` while a
    /// fetch is in flight or after a failed one
    pub dataset_month: Option<Month>,
    pub last_error: Option<String>,
}

impl DashboardSnapshot {
    /// True when the table shows data from another month than the selected one
    pub fn is_stale(&self) -> bool {
        self.dataset_month.is_some_and(|m| m != self.month)
    }

    pub fn is_daily(&self) -> bool {
        matches!(self.mode, ViewMode::Daily(_))
    }

    /// Title for the table panel
    pub fn table_title(&self) -> String {
        match &self.mode {
            ViewMode::Monthly => "Monthly Overview".to_string(),
            ViewMode::Daily(day) => format!("Daily Data: {}", day),
        }
    }
}

/// Build the snapshot for `view` over `dataset`.
///
/// Without a dataset the table is empty and the totals row is all zero.
pub fn compose(view: &ViewState, dataset: Option<&MonthDataset>) -> DashboardSnapshot {
    let mode = view.mode();
    let available_days = view.available_days(dataset);

    let (metrics, table) = match &mode {
        ViewMode::Monthly => {
            let records = dataset.map(|d| d.monthly.as_slice()).unwrap_or(&[]);
            let filtered = filter_monthly(records, view.effective_query());
            let metrics = metric_totals(&filtered);
            (Some(metrics), project(&filtered, &monthly_columns()))
        }
        ViewMode::Daily(day) => {
            let rows = dataset.map(|d| d.day_rows(day)).unwrap_or(&[]);
            (None, project(rows, &daily_columns()))
        }
    };

    DashboardSnapshot {
        month: view.selected_month(),
        mode,
        query: view.search_query().to_string(),
        metrics,
        table,
        available_days,
        loading: false,
        dataset_month: None,
        last_error: None,
    }
}
