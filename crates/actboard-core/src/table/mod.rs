//! Render-ready table projection
//!
//! Turns a row set and a column list into header, body and a single
//! trailing totals row. Presentation layers only lay these cells out.

pub mod columns;

pub use columns::{
    daily_columns, monthly_columns, Accessor, Column, ColumnKey, TableRecord, DAILY_COLUMNS,
    MONTHLY_COLUMNS,
};

use crate::aggregate::{column_total, ColumnTotal};
use crate::format::format_number;
use serde::Serialize;

/// Label placed in the first cell of the totals row
pub const TOTALS_LABEL: &str = "Totals";

/// One table cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Cell {
    Text { text: String },
    Number { value: f64, display: String },
    /// Row label (the totals row marker)
    Label { text: String },
    Blank,
}

impl Cell {
    pub fn number(value: f64) -> Self {
        Cell::Number {
            value,
            display: format_number(value),
        }
    }

    /// Text as it should appear on screen
    pub fn display(&self) -> &str {
        match self {
            Cell::Text { text } | Cell::Label { text } => text,
            Cell::Number { display, .. } => display,
            Cell::Blank => "",
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Cell::Number { value, .. } => Some(*value),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Cell::Number { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderCell {
    pub key: ColumnKey,
    pub label: String,
}

/// Header, body rows and totals row for one view
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableProjection {
    pub header: Vec<HeaderCell>,
    pub rows: Vec<Vec<Cell>>,
    pub totals: Vec<Cell>,
}

impl TableProjection {
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, key: ColumnKey) -> Option<usize> {
        self.header.iter().position(|h| h.key == key)
    }

    /// Totals cell for `key`, if the column is present
    pub fn total_for(&self, key: ColumnKey) -> Option<&Cell> {
        self.column_index(key).and_then(|i| self.totals.get(i))
    }
}

/// Project `rows` through `columns`.
///
/// A column whose accessor did not resolve renders blank body cells and
/// totals to zero.
pub fn project<R: TableRecord>(rows: &[R], columns: &[Column<R>]) -> TableProjection {
    let header = columns
        .iter()
        .map(|c| HeaderCell {
            key: c.key,
            label: c.label.to_string(),
        })
        .collect();

    let body = rows
        .iter()
        .map(|row| columns.iter().map(|c| body_cell(row, c)).collect())
        .collect();

    let totals = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            if i == 0 {
                return Cell::Label {
                    text: TOTALS_LABEL.to_string(),
                };
            }
            match column_total(rows, c.key) {
                ColumnTotal::Blank => Cell::Blank,
                ColumnTotal::Sum(v) => Cell::number(v),
            }
        })
        .collect();

    TableProjection {
        header,
        rows: body,
        totals,
    }
}

fn body_cell<R: TableRecord>(row: &R, column: &Column<R>) -> Cell {
    let Some(acc) = column.accessor() else {
        return Cell::Blank;
    };
    match acc {
        Accessor::Text(get) => Cell::Text {
            text: get(row).to_string(),
        },
        Accessor::Number(_) => Cell::number(acc.number(row)),
    }
}
