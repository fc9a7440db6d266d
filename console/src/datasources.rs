//! 数据源管理
//!
//! 测试连接、保存数据源、浏览已保存的数据源及其结构。

use serde_json::Value;
use validator::Validate;

use common::errors::{AppError, AppResult};
use common::models::{group_by_table, ConnectionParams, DataSource, SaveDataSourceRequest, TableSchema};
use common::response::SchemaEnvelope;

use crate::message::Message;
use crate::session::Session;

/// A connection that passed a test, with the schema it returned.
#[derive(Debug, Clone)]
pub struct TestedConnection {
    pub connection: ConnectionParams,
    /// Schema records exactly as the server sent them.
    pub raw_schema: Vec<Value>,
    pub tables: Vec<TableSchema>,
}

/// 数据源管理器
pub struct DataSourceManager {
    session: Session,
    current: Option<TestedConnection>,
}

impl DataSourceManager {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            current: None,
        }
    }

    /// The last successfully tested connection.
    pub fn current(&self) -> Option<&TestedConnection> {
        self.current.as_ref()
    }

    /// 测试连接并获取表结构；失败时清除之前的结果
    pub async fn test_connection(&mut self, params: ConnectionParams) -> AppResult<&[TableSchema]> {
        self.current = None;

        let token = self.session.token()?;
        params.validate()?;

        let envelope = self.session.api().test_connection(&token, &params).await?;
        let tables = tables_of(&envelope)?;
        tracing::info!(source = %params.source_name, tables = tables.len(), "连接测试成功");

        let tested = self.current.insert(TestedConnection {
            connection: params,
            raw_schema: envelope.schema,
            tables,
        });
        Ok(&tested.tables)
    }

    /// 一步完成连接、获取结构并保存
    pub async fn connect_and_save(&self, params: &ConnectionParams) -> AppResult<Vec<TableSchema>> {
        let token = self.session.token()?;
        params.validate()?;

        let envelope = self
            .session
            .api()
            .connect_and_fetch_schema(&token, params)
            .await?;
        let tables = tables_of(&envelope)?;
        tracing::info!(source = %params.source_name, tables = tables.len(), "数据源已连接并保存");
        Ok(tables)
    }

    /// 保存最近一次测试成功的连接
    pub async fn save_current(&self) -> AppResult<Message> {
        let tested = self.current.as_ref().ok_or_else(|| {
            AppError::validation("No connection data or schema available to save.")
        })?;
        let token = self.session.token()?;

        let req = SaveDataSourceRequest {
            connection: tested.connection.clone(),
            schema: tested.raw_schema.clone(),
        };
        self.session.api().save_data_source(&token, &req).await?;
        tracing::info!(source = %tested.connection.source_name, "数据源已保存");

        Ok(Message::success("Data source saved successfully!"))
    }

    pub async fn list(&self) -> AppResult<Vec<DataSource>> {
        let token = self.session.token()?;
        self.session.api().list_data_sources(&token).await
    }

    /// 获取已保存数据源的结构，按表分组
    pub async fn schema(&self, datasource_id: &str) -> AppResult<Vec<TableSchema>> {
        let token = self.session.token()?;
        if datasource_id.trim().is_empty() {
            return Err(AppError::validation("Data source ID is required."));
        }
        let columns = self
            .session
            .api()
            .data_source_schema(&token, datasource_id)
            .await?;
        Ok(group_by_table(&columns))
    }
}

fn tables_of(envelope: &SchemaEnvelope) -> AppResult<Vec<TableSchema>> {
    let columns = envelope
        .columns()
        .map_err(|e| AppError::InvalidResponse(e.to_string()))?;
    Ok(group_by_table(&columns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use api_client::MemoryTokenStore;
    use common::models::DbType;

    use crate::testkit::{schema_rows, FakeApi};

    fn params() -> ConnectionParams {
        ConnectionParams::new("shop", DbType::PostgreSQL, "db.internal", None, "reader", "pw", "shop")
    }

    fn manager(api: Arc<FakeApi>, token: Option<&str>) -> DataSourceManager {
        let tokens = match token {
            Some(t) => MemoryTokenStore::with_token(t),
            None => MemoryTokenStore::new(),
        };
        DataSourceManager::new(Session::new(api, Arc::new(tokens)))
    }

    #[tokio::test]
    async fn test_connection_groups_schema_by_table() {
        let api = Arc::new(FakeApi::new());
        let mut mgr = manager(api.clone(), Some("tok-1"));

        let tables = mgr.test_connection(params()).await.unwrap();
        let names: Vec<_> = tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["orders", "customers"]);
        assert_eq!(tables[0].column_names(), vec!["id", "total", "status"]);

        let calls = api.calls();
        assert_eq!(calls[0].token.as_deref(), Some("tok-1"));
        assert_eq!(calls[0].body["dbPort"], 5432);
        assert!(mgr.current().is_some());
    }

    #[tokio::test]
    async fn test_protected_actions_without_token_send_nothing() {
        let api = Arc::new(FakeApi::new());
        let mut mgr = manager(api.clone(), None);

        let err = mgr.test_connection(params()).await.unwrap_err();
        assert!(matches!(err, AppError::NotAuthenticated));
        assert!(matches!(mgr.connect_and_save(&params()).await, Err(AppError::NotAuthenticated)));
        assert!(matches!(mgr.list().await, Err(AppError::NotAuthenticated)));
        assert!(matches!(mgr.schema("ds-1").await, Err(AppError::NotAuthenticated)));
        assert!(api.ops().is_empty());
    }

    #[tokio::test]
    async fn test_save_requires_prior_test() {
        let api = Arc::new(FakeApi::new());
        let mgr = manager(api.clone(), Some("tok-1"));

        let err = mgr.save_current().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "No connection data or schema available to save."
        );
        assert!(api.ops().is_empty());
    }

    #[tokio::test]
    async fn test_save_echoes_raw_schema() {
        let api = Arc::new(FakeApi::new());
        let mut mgr = manager(api.clone(), Some("tok-1"));

        mgr.test_connection(params()).await.unwrap();
        let msg = mgr.save_current().await.unwrap();
        assert_eq!(msg.text, "Data source saved successfully!");

        let calls = api.calls();
        assert_eq!(api.ops(), vec!["test_connection", "save_data_source"]);
        assert_eq!(calls[1].body["connection"]["sourceName"], "shop");
        assert_eq!(calls[1].body["schema"], serde_json::json!(schema_rows()));
    }

    #[tokio::test]
    async fn test_failed_test_clears_previous_result() {
        let api = Arc::new(FakeApi::new());
        let mut mgr = manager(api.clone(), Some("tok-1"));

        mgr.test_connection(params()).await.unwrap();
        api.fail(500, "Failed to connect to database");
        let err = mgr.test_connection(params()).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(mgr.current().is_none());
        assert!(mgr.save_current().await.is_err());
    }

    #[tokio::test]
    async fn test_missing_fields_rejected_locally() {
        let api = Arc::new(FakeApi::new());
        let mut mgr = manager(api.clone(), Some("tok-1"));

        let mut incomplete = params();
        incomplete.host.clear();
        let err = mgr.test_connection(incomplete).await.unwrap_err();
        assert_eq!(err.to_string(), "Host is required");

        let mut blank = params();
        blank.db_name = "  ".into();
        let err = mgr.test_connection(blank).await.unwrap_err();
        assert_eq!(err.to_string(), "Database name is required");
        assert!(api.ops().is_empty());
    }

    #[tokio::test]
    async fn test_saved_schema_lookup() {
        let api = Arc::new(FakeApi::new());
        let mgr = manager(api.clone(), Some("tok-1"));

        let tables = mgr.schema("ds-1").await.unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(api.calls()[0].body, "ds-1");

        assert!(mgr.schema("  ").await.is_err());
        assert_eq!(api.ops().len(), 1);
    }
}
