//! Column specifications and typed field accessors
//!
//! A column key names a record field. Each record type maps keys to an
//! accessor once, when the column list is built; rendering and totals then
//! go through the accessor instead of looking fields up by name.

use crate::models::{AgentDailyRecord, AgentMonthlyRecord};
use serde::Serialize;
use std::fmt;

/// Field names usable as table columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnKey {
    EmpId,
    AgentName,
    Silver,
    Gold,
    Platinum,
    Standard,
    Target,
    Achieved,
    Remaining,
    Total,
}

impl ColumnKey {
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnKey::EmpId => "empId",
            ColumnKey::AgentName => "agentName",
            ColumnKey::Silver => "silver",
            ColumnKey::Gold => "gold",
            ColumnKey::Platinum => "platinum",
            ColumnKey::Standard => "standard",
            ColumnKey::Target => "target",
            ColumnKey::Achieved => "achieved",
            ColumnKey::Remaining => "remaining",
            ColumnKey::Total => "total",
        }
    }

    /// Resolve a field name as it appears in the wire format
    pub fn parse(name: &str) -> Option<Self> {
        let key = match name {
            "empId" | "employeeId" => ColumnKey::EmpId,
            "agentName" => ColumnKey::AgentName,
            "silver" => ColumnKey::Silver,
            "gold" => ColumnKey::Gold,
            "platinum" => ColumnKey::Platinum,
            "standard" => ColumnKey::Standard,
            "target" => ColumnKey::Target,
            "achieved" => ColumnKey::Achieved,
            "remaining" => ColumnKey::Remaining,
            "total" => ColumnKey::Total,
            _ => return None,
        };
        Some(key)
    }

    /// Identifier columns never get a total
    pub fn is_identifier(self) -> bool {
        matches!(self, ColumnKey::EmpId | ColumnKey::AgentName)
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed read access to one field of `R`
pub enum Accessor<R> {
    Text(fn(&R) -> &str),
    Number(fn(&R) -> f64),
}

// fn pointers are Copy regardless of R, so derive's `R: Copy` bound is wrong here
impl<R> Clone for Accessor<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Accessor<R> {}

impl<R> fmt::Debug for Accessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Text(_) => f.write_str("Accessor::Text"),
            Accessor::Number(_) => f.write_str("Accessor::Number"),
        }
    }
}

impl<R> Accessor<R> {
    /// Numeric value of the field; text fields and non-finite numbers read as 0
    pub fn number(&self, record: &R) -> f64 {
        match self {
            Accessor::Number(get) => {
                let v = get(record);
                if v.is_finite() {
                    v
                } else {
                    0.0
                }
            }
            Accessor::Text(_) => 0.0,
        }
    }
}

/// A record type that can be shown in the projected table
pub trait TableRecord: Sized {
    /// Accessor for `key`, or `None` when this record has no such field
    fn accessor(key: ColumnKey) -> Option<Accessor<Self>>;
}

impl TableRecord for AgentMonthlyRecord {
    fn accessor(key: ColumnKey) -> Option<Accessor<Self>> {
        let acc: Accessor<Self> = match key {
            ColumnKey::EmpId => Accessor::Text(|r| r.employee_id.as_str()),
            ColumnKey::AgentName => Accessor::Text(|r| r.agent_name.as_str()),
            ColumnKey::Silver => Accessor::Number(|r| r.silver),
            ColumnKey::Gold => Accessor::Number(|r| r.gold),
            ColumnKey::Platinum => Accessor::Number(|r| r.platinum),
            ColumnKey::Standard => Accessor::Number(|r| r.standard),
            ColumnKey::Target => Accessor::Number(|r| r.target),
            ColumnKey::Achieved => Accessor::Number(|r| r.achieved),
            ColumnKey::Remaining => Accessor::Number(|r| r.remaining),
            ColumnKey::Total => return None,
        };
        Some(acc)
    }
}

impl TableRecord for AgentDailyRecord {
    fn accessor(key: ColumnKey) -> Option<Accessor<Self>> {
        let acc: Accessor<Self> = match key {
            ColumnKey::EmpId => Accessor::Text(|r| r.employee_id.as_str()),
            ColumnKey::AgentName => Accessor::Text(|r| r.agent_name.as_str()),
            ColumnKey::Silver => Accessor::Number(|r| r.silver),
            ColumnKey::Gold => Accessor::Number(|r| r.gold),
            ColumnKey::Platinum => Accessor::Number(|r| r.platinum),
            ColumnKey::Standard => Accessor::Number(|r| r.standard),
            ColumnKey::Total => Accessor::Number(|r| r.total),
            ColumnKey::Target | ColumnKey::Achieved | ColumnKey::Remaining => return None,
        };
        Some(acc)
    }
}

/// Monthly view columns, in display order
pub const MONTHLY_COLUMNS: [(ColumnKey, &str); 9] = [
    (ColumnKey::EmpId, "Emp ID"),
    (ColumnKey::AgentName, "Agent Name"),
    (ColumnKey::Silver, "Silver"),
    (ColumnKey::Gold, "Gold"),
    (ColumnKey::Platinum, "Platinum"),
    (ColumnKey::Standard, "Standard"),
    (ColumnKey::Target, "Target"),
    (ColumnKey::Achieved, "Achieved"),
    (ColumnKey::Remaining, "Remaining"),
];

/// Daily view columns, in display order
pub const DAILY_COLUMNS: [(ColumnKey, &str); 7] = [
    (ColumnKey::EmpId, "Emp ID"),
    (ColumnKey::AgentName, "Agent Name"),
    (ColumnKey::Silver, "Silver"),
    (ColumnKey::Gold, "Gold"),
    (ColumnKey::Platinum, "Platinum"),
    (ColumnKey::Standard, "Standard"),
    (ColumnKey::Total, "Total"),
];

/// One resolved column for record type `R`
#[derive(Debug, Clone)]
pub struct Column<R> {
    pub key: ColumnKey,
    pub label: &'static str,
    accessor: Option<Accessor<R>>,
}

impl<R: TableRecord> Column<R> {
    pub fn new(key: ColumnKey, label: &'static str) -> Self {
        Self {
            key,
            label,
            accessor: R::accessor(key),
        }
    }

    pub fn accessor(&self) -> Option<&Accessor<R>> {
        self.accessor.as_ref()
    }
}

/// Resolve a fixed column list against a record type
pub fn resolve_columns<R: TableRecord>(layout: &[(ColumnKey, &'static str)]) -> Vec<Column<R>> {
    layout
        .iter()
        .map(|&(key, label)| Column::new(key, label))
        .collect()
}

pub fn monthly_columns() -> Vec<Column<AgentMonthlyRecord>> {
    resolve_columns(&MONTHLY_COLUMNS)
}

pub fn daily_columns() -> Vec<Column<AgentDailyRecord>> {
    resolve_columns(&DAILY_COLUMNS)
}
