//! Recording fake of the remote API for manager tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::{json, Value};

use api_client::{Api, AuthToken};
use common::errors::{AppError, AppResult};
use common::models::{
    ConnectionParams, CreateVirtualBaseViewRequest, CreateVirtualViewRequest, DataSource,
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, SampleData,
    SaveDataSourceRequest, SchemaColumn, VirtualBaseView, VirtualView,
};
use common::response::{SaveDataSourceResponse, SchemaEnvelope};

/// One call seen by the fake.
#[derive(Debug, Clone)]
pub struct Call {
    pub op: &'static str,
    pub token: Option<String>,
    pub body: Value,
}

/// Canned responses plus a log of every call.
#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<Call>>,
    failure: Mutex<Option<(u16, String)>>,
    pub login_token: Mutex<Option<String>>,
    pub schema: Mutex<Vec<Value>>,
    pub data_sources: Mutex<Vec<DataSource>>,
    pub sample: Mutex<SampleData>,
}

impl FakeApi {
    pub fn new() -> Self {
        let fake = Self::default();
        *fake.login_token.lock() = Some("tok-1".to_string());
        *fake.schema.lock() = schema_rows();
        fake
    }

    /// Makes every later call fail with the given status.
    pub fn fail(&self, status: u16, message: &str) {
        *self.failure.lock() = Some((status, message.to_string()));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn ops(&self) -> Vec<&'static str> {
        self.calls.lock().iter().map(|c| c.op).collect()
    }

    fn record(
        &self,
        op: &'static str,
        token: Option<&AuthToken>,
        body: impl Serialize,
    ) -> AppResult<()> {
        self.calls.lock().push(Call {
            op,
            token: token.map(|t| t.as_str().to_string()),
            body: serde_json::to_value(body).unwrap_or(Value::Null),
        });
        match self.failure.lock().clone() {
            Some((status, message)) => Err(AppError::Api { status, message }),
            None => Ok(()),
        }
    }

    fn envelope(&self) -> SchemaEnvelope {
        SchemaEnvelope {
            success: Some(true),
            message: None,
            schema: self.schema.lock().clone(),
        }
    }

    fn columns(&self) -> Vec<SchemaColumn> {
        self.envelope().columns().unwrap_or_default()
    }
}

/// Schema records for two tables, interleaved.
pub fn schema_rows() -> Vec<Value> {
    vec![
        json!({"id": "s-1", "table_name": "orders", "column_name": "id", "column_type": "integer",
               "is_primary_key": {"Bool": true, "Valid": true}, "is_nullable": {"Bool": false, "Valid": true}}),
        json!({"id": "s-2", "table_name": "customers", "column_name": "id", "column_type": "integer",
               "is_primary_key": {"Bool": true, "Valid": true}, "is_nullable": {"Bool": false, "Valid": true}}),
        json!({"id": "s-3", "table_name": "orders", "column_name": "total", "column_type": "numeric",
               "is_primary_key": {"Bool": false, "Valid": true}, "is_nullable": {"Bool": true, "Valid": true}}),
        json!({"id": "s-4", "table_name": "customers", "column_name": "name", "column_type": "text",
               "is_primary_key": {"Bool": false, "Valid": true}, "is_nullable": {"Bool": true, "Valid": true}}),
        json!({"id": "s-5", "table_name": "orders", "column_name": "status", "column_type": "varchar",
               "is_primary_key": {"Bool": false, "Valid": true}, "is_nullable": {"Bool": false, "Valid": false}}),
    ]
}

#[async_trait]
impl Api for FakeApi {
    async fn register(&self, req: &RegisterRequest) -> AppResult<RegisterResponse> {
        self.record("register", None, req)?;
        Ok(RegisterResponse {
            message: Some("User registered successfully".into()),
            user_id: Some("u-1".into()),
        })
    }

    async fn login(&self, req: &LoginRequest) -> AppResult<LoginResponse> {
        self.record("login", None, req)?;
        Ok(LoginResponse {
            token: self.login_token.lock().clone(),
            message: Some("Login successful".into()),
            user_id: Some("u-1".into()),
        })
    }

    async fn test_connection(
        &self,
        token: &AuthToken,
        params: &ConnectionParams,
    ) -> AppResult<SchemaEnvelope> {
        self.record("test_connection", Some(token), params)?;
        Ok(self.envelope())
    }

    async fn connect_and_fetch_schema(
        &self,
        token: &AuthToken,
        params: &ConnectionParams,
    ) -> AppResult<SchemaEnvelope> {
        self.record("connect_and_fetch_schema", Some(token), params)?;
        Ok(self.envelope())
    }

    async fn save_data_source(
        &self,
        token: &AuthToken,
        req: &SaveDataSourceRequest,
    ) -> AppResult<SaveDataSourceResponse> {
        self.record("save_data_source", Some(token), req)?;
        Ok(SaveDataSourceResponse {
            message: Some("Data source saved successfully".into()),
            datasource: None,
        })
    }

    async fn list_data_sources(&self, token: &AuthToken) -> AppResult<Vec<DataSource>> {
        self.record("list_data_sources", Some(token), ())?;
        Ok(self.data_sources.lock().clone())
    }

    async fn data_source_schema(
        &self,
        token: &AuthToken,
        datasource_id: &str,
    ) -> AppResult<Vec<SchemaColumn>> {
        self.record("data_source_schema", Some(token), datasource_id)?;
        Ok(self.columns())
    }

    async fn create_virtual_base_view(
        &self,
        token: &AuthToken,
        req: &CreateVirtualBaseViewRequest,
    ) -> AppResult<VirtualBaseView> {
        self.record("create_virtual_base_view", Some(token), req)?;
        Ok(VirtualBaseView {
            id: "vbv-1".into(),
            user_id: Some("u-1".into()),
            name: req.name.clone(),
            description: req.description.clone(),
            data_source_id: Some(req.data_source_id.clone()),
            table_name: req.table_name.clone(),
            selected_columns: req.selected_columns.clone(),
            created_at: None,
            updated_at: None,
        })
    }

    async fn list_virtual_base_views(&self, token: &AuthToken) -> AppResult<Vec<VirtualBaseView>> {
        self.record("list_virtual_base_views", Some(token), ())?;
        Ok(Vec::new())
    }

    async fn virtual_base_view_schema(
        &self,
        token: &AuthToken,
        view_id: &str,
    ) -> AppResult<Vec<SchemaColumn>> {
        self.record("virtual_base_view_schema", Some(token), view_id)?;
        Ok(self.columns())
    }

    async fn virtual_base_view_sample(
        &self,
        token: &AuthToken,
        view_id: &str,
    ) -> AppResult<SampleData> {
        self.record("virtual_base_view_sample", Some(token), view_id)?;
        Ok(self.sample.lock().clone())
    }

    async fn create_virtual_view(
        &self,
        token: &AuthToken,
        req: &CreateVirtualViewRequest,
    ) -> AppResult<VirtualView> {
        self.record("create_virtual_view", Some(token), req)?;
        Ok(VirtualView {
            id: "vv-1".into(),
            name: req.name.clone(),
            description: req.description.clone(),
            definition: None,
            created_at: None,
        })
    }

    async fn list_virtual_views(&self, token: &AuthToken) -> AppResult<Vec<VirtualView>> {
        self.record("list_virtual_views", Some(token), ())?;
        Ok(Vec::new())
    }
}
