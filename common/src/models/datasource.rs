//! Data source models.
//!
//! Contains the connection parameters the user submits and the saved data
//! source records the server hands back.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::nullable;

/// Database type enumeration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DbType {
    /// MySQL database.
    #[serde(rename = "mysql")]
    MySQL,
    /// PostgreSQL database.
    #[serde(rename = "postgresql")]
    PostgreSQL,
}

impl DbType {
    /// Returns the default port for this database type.
    pub fn default_port(&self) -> u16 {
        match self {
            DbType::MySQL => 3306,
            DbType::PostgreSQL => 5432,
        }
    }
}

impl std::fmt::Display for DbType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DbType::MySQL => write!(f, "mysql"),
            DbType::PostgreSQL => write!(f, "postgresql"),
        }
    }
}

impl std::str::FromStr for DbType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mysql" => Ok(DbType::MySQL),
            "postgresql" | "postgres" | "pg" => Ok(DbType::PostgreSQL),
            other => Err(format!("unsupported database type: {}", other)),
        }
    }
}

/// Connection parameters submitted to test or save a data source.
///
/// Field names on the wire follow the server's form keys.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConnectionParams {
    /// Display name of the data source.
    #[serde(rename = "sourceName")]
    #[validate(custom(function = "not_blank", message = "Source name is required"))]
    pub source_name: String,
    /// Database type.
    #[serde(rename = "dbType")]
    pub db_type: DbType,
    /// Database host.
    #[serde(rename = "dbHost")]
    #[validate(custom(function = "not_blank", message = "Host is required"))]
    pub host: String,
    /// Database port.
    #[serde(rename = "dbPort")]
    #[validate(range(min = 1, message = "Port must be between 1 and 65535"))]
    pub port: u16,
    /// Database username.
    #[serde(rename = "dbUser")]
    #[validate(custom(function = "not_blank", message = "Database user is required"))]
    pub user: String,
    /// Database password.
    #[serde(rename = "dbPassword")]
    pub password: String,
    /// Database name.
    #[serde(rename = "dbName")]
    #[validate(custom(function = "not_blank", message = "Database name is required"))]
    pub db_name: String,
}

impl ConnectionParams {
    /// Builds parameters, falling back to the db type's default port.
    pub fn new(
        source_name: impl Into<String>,
        db_type: DbType,
        host: impl Into<String>,
        port: Option<u16>,
        user: impl Into<String>,
        password: impl Into<String>,
        db_name: impl Into<String>,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            db_type,
            host: host.into(),
            port: port.unwrap_or_else(|| db_type.default_port()),
            user: user.into(),
            password: password.into(),
            db_name: db_name.into(),
        }
    }
}

/// Rejects empty and whitespace-only text.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// A saved data source as listed by `GET /api/datasources`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataSource {
    /// Unique data source identifier.
    pub id: String,
    /// Owner account.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Display name.
    pub source_name: String,
    /// Database type as stored by the server.
    pub db_type: String,
    /// Database host.
    #[serde(default, deserialize_with = "nullable::text")]
    pub host: Option<String>,
    /// Database port.
    #[serde(default, deserialize_with = "nullable::int")]
    pub port: Option<i64>,
    /// Database name.
    #[serde(default, deserialize_with = "nullable::text")]
    pub database_name: Option<String>,
    /// Database username.
    #[serde(default, deserialize_with = "nullable::text")]
    pub db_username: Option<String>,
    /// Free-form description.
    #[serde(default, deserialize_with = "nullable::text")]
    pub description: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Result of the last connection attempt.
    #[serde(default, deserialize_with = "nullable::text")]
    pub last_connection_status: Option<String>,
}

/// Request body for `POST /api/db/save-datasource`.
///
/// `schema` is echoed back exactly as the server returned it from the
/// connection test.
#[derive(Debug, Clone, Serialize)]
pub struct SaveDataSourceRequest {
    /// Parameters of the tested connection.
    pub connection: ConnectionParams,
    /// Schema records as received.
    pub schema: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_connection_params_wire_keys() {
        let params = ConnectionParams::new(
            "orders",
            DbType::PostgreSQL,
            "db.internal",
            None,
            "reader",
            "pw",
            "shop",
        );
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(
            value,
            json!({
                "sourceName": "orders",
                "dbType": "postgresql",
                "dbHost": "db.internal",
                "dbPort": 5432,
                "dbUser": "reader",
                "dbPassword": "pw",
                "dbName": "shop"
            })
        );
    }

    #[test]
    fn test_connection_params_presence_checks() {
        let mut params =
            ConnectionParams::new("orders", DbType::MySQL, "", Some(3307), "root", "", "shop");
        assert!(params.validate().is_err());
        params.host = "localhost".into();
        assert!(params.validate().is_ok());
        params.port = 0;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_whitespace_only_fields_are_missing() {
        let params =
            ConnectionParams::new("orders", DbType::MySQL, "   ", None, "root", "", "shop");
        let errors = params.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields["host"][0].message.as_deref(), Some("Host is required"));

        let params =
            ConnectionParams::new("orders", DbType::MySQL, "localhost", None, "\t", "", " ");
        let errors = params.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("user"));
        assert!(fields.contains_key("db_name"));
        assert!(!fields.contains_key("host"));
    }

    #[test]
    fn test_data_source_with_wrapped_fields() {
        let ds: DataSource = serde_json::from_value(json!({
            "id": "ds-1",
            "user_id": "u-1",
            "source_name": "orders",
            "db_type": "mysql",
            "host": {"String": "localhost", "Valid": true},
            "port": {"Int64": 3306, "Valid": true},
            "database_name": {"String": "", "Valid": false},
            "created_at": "2024-05-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(ds.host.as_deref(), Some("localhost"));
        assert_eq!(ds.port, Some(3306));
        assert_eq!(ds.database_name, None);
    }

    #[test]
    fn test_db_type_parsing() {
        assert_eq!("Postgres".parse::<DbType>().unwrap(), DbType::PostgreSQL);
        assert_eq!("mysql".parse::<DbType>().unwrap(), DbType::MySQL);
        assert!("oracle".parse::<DbType>().is_err());
    }
}
