//! Sample data models.
//!
//! Preview rows of a virtual base view, keyed by column name.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder shown for NULL cells.
pub const NULL_CELL: &str = "NULL";

/// First rows of a virtual base view.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct SampleData {
    /// Column names, in display order.
    #[serde(default)]
    pub columns: Vec<String>,
    /// Rows as column-name → value maps.
    #[serde(default)]
    pub rows: Vec<Map<String, Value>>,
}

impl SampleData {
    /// True when the server returned no columns at all.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Cell text for one row and column.
    pub fn cell(row: &Map<String, Value>, column: &str) -> String {
        match row.get(column) {
            None | Some(Value::Null) => NULL_CELL.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Every row rendered as cell text in column order.
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| self.columns.iter().map(|c| Self::cell(row, c)).collect())
            .collect()
    }
}
