//! Schema record models.
//!
//! One `SchemaColumn` describes one column of an introspected table. The
//! client groups them by table for display and selection.

use serde::{Deserialize, Serialize};

use super::nullable;

/// Placeholder shown for missing names and types.
pub const NOT_AVAILABLE: &str = "N/A";

/// Metadata for a single column.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct SchemaColumn {
    /// Schema record id (absent before the data source is saved).
    #[serde(default)]
    pub id: Option<String>,
    /// Owning data source.
    #[serde(default)]
    pub data_source_id: Option<String>,
    /// Database schema name.
    #[serde(default, deserialize_with = "nullable::text")]
    pub schema_name: Option<String>,
    /// Table the column belongs to.
    #[serde(default)]
    pub table_name: String,
    /// Column name.
    #[serde(default)]
    pub column_name: String,
    /// Column type as reported by the database.
    #[serde(default)]
    pub column_type: String,
    /// Whether the column is part of the primary key.
    #[serde(default, alias = "primary_key", deserialize_with = "nullable::flag")]
    pub is_primary_key: bool,
    /// Whether the column accepts NULL.
    #[serde(
        default,
        alias = "nullable",
        alias = "allow_null",
        deserialize_with = "nullable::flag"
    )]
    pub is_nullable: bool,
}

impl SchemaColumn {
    /// Column name for display.
    pub fn display_name(&self) -> &str {
        non_empty_or_na(&self.column_name)
    }

    /// Column type for display.
    pub fn display_type(&self) -> &str {
        non_empty_or_na(&self.column_type)
    }
}

fn non_empty_or_na(s: &str) -> &str {
    if s.is_empty() {
        NOT_AVAILABLE
    } else {
        s
    }
}

/// The columns of one table, in the order the server listed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    /// Table name.
    pub name: String,
    /// Columns of the table.
    pub columns: Vec<SchemaColumn>,
}

impl TableSchema {
    /// Names of all columns, in order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.column_name.clone()).collect()
    }

    /// Looks up a column by name.
    pub fn find_column(&self, name: &str) -> Option<&SchemaColumn> {
        self.columns.iter().find(|c| c.column_name == name)
    }
}

/// Groups columns by table name.
///
/// Tables are returned in order of first appearance; within a table the
/// input order of columns is kept.
pub fn group_by_table(columns: &[SchemaColumn]) -> Vec<TableSchema> {
    let mut tables: Vec<TableSchema> = Vec::new();
    for column in columns {
        match tables.iter_mut().find(|t| t.name == column.table_name) {
            Some(table) => table.columns.push(column.clone()),
            None => tables.push(TableSchema {
                name: column.table_name.clone(),
                columns: vec![column.clone()],
            }),
        }
    }
    tables
}

/// Looks up a table in grouped schema.
pub fn find_table<'a>(tables: &'a [TableSchema], name: &str) -> Option<&'a TableSchema> {
    tables.iter().find(|t| t.name == name)
}
