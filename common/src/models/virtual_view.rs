//! Virtual view models.
//!
//! A virtual base view is a named projection over exactly one table of one
//! data source. The older virtual view references schema records by id.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A saved virtual base view.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VirtualBaseView {
    /// Unique view identifier.
    pub id: String,
    /// Owner account.
    #[serde(default)]
    pub user_id: Option<String>,
    /// View name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Source data source.
    #[serde(default)]
    pub data_source_id: Option<String>,
    /// Source table.
    #[serde(default)]
    pub table_name: String,
    /// Selected column names, stored by the server as `{"column_names": [...]}` text.
    #[serde(default, deserialize_with = "selected_columns")]
    pub selected_columns: Vec<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl VirtualBaseView {
    /// Description for display.
    pub fn display_description(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or("No description")
    }
}

/// Stored definition of a virtual base view (`{"column_names": [...]}`).
#[derive(Debug, Deserialize)]
struct Definition {
    #[serde(default)]
    column_names: Vec<String>,
}

/// Accepts the column list as the server's JSON-encoded definition string,
/// the same definition as an object, or a bare array (plain or encoded).
/// Anything undecodable yields an empty list.
fn selected_columns<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(encoded)) => serde_json::from_str(&encoded).unwrap_or(Value::Null),
        Some(value) => value,
        None => Value::Null,
    };
    Ok(match value {
        object @ Value::Object(_) => serde_json::from_value::<Definition>(object)
            .map(|d| d.column_names)
            .unwrap_or_default(),
        array @ Value::Array(_) => serde_json::from_value(array).unwrap_or_default(),
        _ => Vec::new(),
    })
}

/// Request body for `POST /api/virtual-base-views`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateVirtualBaseViewRequest {
    /// View name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Source data source.
    pub data_source_id: String,
    /// Source table.
    pub table_name: String,
    /// Selected column names.
    pub selected_columns: Vec<String>,
}

/// A saved legacy virtual view.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VirtualView {
    /// Unique view identifier.
    pub id: String,
    /// View name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// JSON definition listing the referenced schema records.
    #[serde(default)]
    pub definition: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
}

impl VirtualView {
    /// Number of schema records the definition references.
    pub fn column_count(&self) -> usize {
        self.definition
            .as_deref()
            .and_then(|d| serde_json::from_str::<Value>(d).ok())
            .and_then(|v| v.get("selected_columns").and_then(Value::as_array).map(Vec::len))
            .unwrap_or(0)
    }
}

/// Request body for `POST /api/virtual-views`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateVirtualViewRequest {
    /// View name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Ids of the selected schema records.
    pub selected_schema_ids: Vec<String>,
}
