//! actboard-core - Core library for actboard
//!
//! Provides models, view state, aggregation, table projection, data
//! providers and the dashboard store for sales-activation data.

pub mod aggregate;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod event;
pub mod format;
pub mod models;
pub mod provider;
pub mod store;
pub mod table;
pub mod view;

pub use aggregate::{column_total, column_total_by_name, filter_monthly, metric_totals};
pub use aggregate::{ColumnTotal, MetricTotals};
pub use config::DashboardConfig;
pub use dashboard::{compose, DashboardSnapshot};
pub use error::{CoreError, IssueSeverity, LoadIssue, LoadReport};
pub use event::{DashboardEvent, EventBus};
pub use models::{AgentDailyRecord, AgentMonthlyRecord, Month, MonthDataset};
pub use provider::{DataProvider, InMemoryProvider, JsonDirProvider};
pub use store::{DashboardStore, LoadOutcome, LoadTicket};
pub use table::{project, Cell, TableProjection};
pub use view::{ViewConfig, ViewMode, ViewState};
