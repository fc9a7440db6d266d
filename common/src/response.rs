//! API response envelopes.
//!
//! The server wraps each payload in a small JSON object next to `success`
//! and `message` fields. These types unwrap them. Missing list keys decode
//! as empty lists.

use serde::Deserialize;
use serde_json::Value;

use crate::models::{DataSource, SampleData, SchemaColumn, VirtualBaseView, VirtualView};

/// Envelope carrying a schema array (`{"schema": [...]}`).
///
/// The schema is kept as raw JSON so it can be echoed back verbatim when a
/// tested connection is saved.
#[derive(Debug, Deserialize, Default)]
pub struct SchemaEnvelope {
    /// Whether the request was successful.
    #[serde(default)]
    pub success: Option<bool>,
    /// Human-readable status.
    #[serde(default)]
    pub message: Option<String>,
    /// Schema records exactly as sent.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub schema: Vec<Value>,
}

impl SchemaEnvelope {
    /// Decodes the raw records into typed columns.
    pub fn columns(&self) -> Result<Vec<SchemaColumn>, serde_json::Error> {
        self.schema
            .iter()
            .cloned()
            .map(serde_json::from_value)
            .collect()
    }
}

/// `GET /api/datasources` response.
#[derive(Debug, Deserialize, Default)]
pub struct DataSourceList {
    /// Saved data sources.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub datasources: Vec<DataSource>,
}

/// `POST /api/db/save-datasource` response.
#[derive(Debug, Deserialize, Default)]
pub struct SaveDataSourceResponse {
    /// Human-readable status.
    #[serde(default)]
    pub message: Option<String>,
    /// The stored data source, when the server echoes it.
    #[serde(default)]
    pub datasource: Option<Value>,
}

/// `GET /api/virtual-base-views` response.
#[derive(Debug, Deserialize, Default)]
pub struct VirtualBaseViewList {
    /// Saved virtual base views.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub virtual_base_views: Vec<VirtualBaseView>,
}

/// `POST /api/virtual-base-views` response.
#[derive(Debug, Deserialize)]
pub struct CreatedVirtualBaseView {
    /// Human-readable status.
    #[serde(default)]
    pub message: Option<String>,
    /// The created view.
    pub virtual_base_view: VirtualBaseView,
}

/// `GET /api/virtual-views` response.
#[derive(Debug, Deserialize, Default)]
pub struct VirtualViewList {
    /// Saved legacy virtual views.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub virtualviews: Vec<VirtualView>,
}

/// Sample data, either wrapped as `{"data": {...}}` or sent flat.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SampleDataEnvelope {
    /// `{"success": true, "data": {"columns": [...], "rows": [...]}}`
    Wrapped { data: SampleData },
    /// `{"columns": [...], "rows": [...]}`
    Flat(SampleData),
}

impl SampleDataEnvelope {
    /// Unwraps the sample data.
    pub fn into_inner(self) -> SampleData {
        match self {
            SampleDataEnvelope::Wrapped { data } => data,
            SampleDataEnvelope::Flat(data) => data,
        }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Extracts a human-readable message from a failure body.
///
/// Accepts `{"message": ..}`, `{"error": {"message": ..}}`, `{"error": ".."}`
/// or plain text. Falls back to `fallback` (usually the status reason).
pub fn error_message(body: &str, fallback: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return fallback.to_string();
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        let from_json = value
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| {
                value.get("error").and_then(|e| {
                    e.as_str()
                        .or_else(|| e.get("message").and_then(Value::as_str))
                })
            })
            .filter(|m| !m.trim().is_empty());

        return match from_json {
            Some(message) => message.trim().to_string(),
            None => fallback.to_string(),
        };
    }

    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_message_from_json_and_text() {
        assert_eq!(
            error_message(r#"{"success":false,"message":"Table name is required"}"#, "Bad Request"),
            "Table name is required"
        );
        assert_eq!(
            error_message(r#"{"error":{"code":"NOT_FOUND","message":"missing"}}"#, "Not Found"),
            "missing"
        );
        assert_eq!(
            error_message("Invalid username or password\n", "Unauthorized"),
            "Invalid username or password"
        );
        assert_eq!(error_message("", "Internal Server Error"), "Internal Server Error");
        assert_eq!(error_message("{}", "Conflict"), "Conflict");
    }

    #[test]
    fn test_sample_data_wrapped_and_flat() {
        let wrapped: SampleDataEnvelope = serde_json::from_value(json!({
            "success": true,
            "data": {"columns": ["id"], "rows": [{"id": 1}]}
        }))
        .unwrap();
        assert_eq!(wrapped.into_inner().columns, vec!["id"]);

        let flat: SampleDataEnvelope =
            serde_json::from_value(json!({"columns": ["a", "b"], "rows": []})).unwrap();
        let data = flat.into_inner();
        assert_eq!(data.columns, vec!["a", "b"]);
        assert!(data.rows.is_empty());
    }

    #[test]
    fn test_null_lists_decode_empty() {
        let list: VirtualBaseViewList =
            serde_json::from_value(json!({"success": true, "virtual_base_views": null})).unwrap();
        assert!(list.virtual_base_views.is_empty());

        let schema: SchemaEnvelope = serde_json::from_value(json!({"success": true})).unwrap();
        assert!(schema.schema.is_empty());
    }
}
