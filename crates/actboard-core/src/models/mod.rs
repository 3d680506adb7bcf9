//! Data models for actboard

pub mod agent;
pub mod dataset;
pub mod month;

pub use agent::{AgentDailyRecord, AgentMonthlyRecord};
pub use dataset::MonthDataset;
pub use month::Month;
