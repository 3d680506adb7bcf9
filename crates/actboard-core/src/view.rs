//! Selection state: month, optional day, agent search
//!
//! All operations are total. Month changes are the only ones that require
//! new data; the store turns them into a fetch.

use crate::models::{Month, MonthDataset};
use chrono::NaiveDate;
use serde::Serialize;

/// Inputs for the initial view, injected so the core never reads the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewConfig {
    pub today: NaiveDate,
    /// Overrides the month derived from `today`
    pub default_month: Option<Month>,
}

impl ViewConfig {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            default_month: None,
        }
    }

    pub fn with_default_month(mut self, month: Option<Month>) -> Self {
        self.default_month = month;
        self
    }

    pub fn initial_month(&self) -> Month {
        self.default_month
            .unwrap_or_else(|| Month::from_date(self.today))
    }
}

/// Which table the dashboard is showing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "day", rename_all = "camelCase")]
pub enum ViewMode {
    Monthly,
    Daily(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    selected_month: Month,
    selected_day: Option<String>,
    search_query: String,
}

impl ViewState {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            selected_month: config.initial_month(),
            selected_day: None,
            search_query: String::new(),
        }
    }

    pub fn selected_month(&self) -> Month {
        self.selected_month
    }

    pub fn selected_day(&self) -> Option<&str> {
        self.selected_day.as_deref()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Switch month. Always clears the day and always needs a reload;
    /// the search query is kept.
    pub fn select_month(&mut self, month: Month) -> bool {
        self.selected_month = month;
        self.selected_day = None;
        true
    }

    /// Select a day; an empty identifier returns to the monthly view
    pub fn select_day(&mut self, day: impl Into<String>) {
        let day = day.into();
        self.selected_day = if day.is_empty() { None } else { Some(day) };
    }

    pub fn back_to_monthly(&mut self) {
        self.selected_day = None;
    }

    /// Stored verbatim, no trimming
    pub fn set_search_query(&mut self, text: impl Into<String>) {
        self.search_query = text.into();
    }

    pub fn mode(&self) -> ViewMode {
        match &self.selected_day {
            Some(day) => ViewMode::Daily(day.clone()),
            None => ViewMode::Monthly,
        }
    }

    pub fn is_daily(&self) -> bool {
        self.selected_day.is_some()
    }

    /// The query that applies to the visible table; ignored in daily view
    pub fn effective_query(&self) -> &str {
        if self.is_daily() {
            ""
        } else {
            &self.search_query
        }
    }

    /// Days of the held dataset in ascending order
    pub fn available_days(&self, dataset: Option<&MonthDataset>) -> Vec<String> {
        dataset.map(MonthDataset::days).unwrap_or_default()
    }
}
