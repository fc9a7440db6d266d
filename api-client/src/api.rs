//! Remote API contract.
//!
//! Every protected operation takes the session token by reference, so a
//! caller without a token has no way to issue the request.

use async_trait::async_trait;

use common::errors::AppResult;
use common::models::{
    ConnectionParams, CreateVirtualBaseViewRequest, CreateVirtualViewRequest, DataSource,
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, SampleData,
    SaveDataSourceRequest, SchemaColumn, VirtualBaseView, VirtualView,
};
use common::response::{SaveDataSourceResponse, SchemaEnvelope};

use crate::token::AuthToken;

/// Endpoint paths of the remote API.
pub mod routes {
    pub const REGISTER: &str = "/api/register";
    pub const LOGIN: &str = "/api/login";
    pub const TEST_CONNECTION: &str = "/api/db/test-connection";
    pub const CONNECT_AND_FETCH_SCHEMA: &str = "/api/db/connect-and-fetch-schema";
    pub const SAVE_DATASOURCE: &str = "/api/db/save-datasource";
    pub const DATASOURCES: &str = "/api/datasources";
    pub const DATASOURCE_SCHEMA: &str = "/api/datasources/schema";
    pub const VIRTUAL_BASE_VIEWS: &str = "/api/virtual-base-views";
    pub const VIRTUAL_BASE_VIEW_SCHEMA: &str = "/api/virtual-base-views/schema";
    pub const VIRTUAL_BASE_VIEW_SAMPLE: &str = "/api/virtual-base-views/sample-data";
    pub const VIRTUAL_VIEWS: &str = "/api/virtual-views";
}

/// Client side of the data virtualisation API.
#[async_trait]
pub trait Api: Send + Sync {
    /// Creates an account.
    async fn register(&self, req: &RegisterRequest) -> AppResult<RegisterResponse>;

    /// Exchanges credentials for a token.
    async fn login(&self, req: &LoginRequest) -> AppResult<LoginResponse>;

    /// Tests a connection and returns its schema without saving anything.
    async fn test_connection(
        &self,
        token: &AuthToken,
        params: &ConnectionParams,
    ) -> AppResult<SchemaEnvelope>;

    /// Connects, introspects and saves the data source in one step.
    async fn connect_and_fetch_schema(
        &self,
        token: &AuthToken,
        params: &ConnectionParams,
    ) -> AppResult<SchemaEnvelope>;

    /// Saves a tested connection together with its schema.
    async fn save_data_source(
        &self,
        token: &AuthToken,
        req: &SaveDataSourceRequest,
    ) -> AppResult<SaveDataSourceResponse>;

    /// Lists the user's saved data sources.
    async fn list_data_sources(&self, token: &AuthToken) -> AppResult<Vec<DataSource>>;

    /// Fetches the stored schema of a data source.
    async fn data_source_schema(
        &self,
        token: &AuthToken,
        datasource_id: &str,
    ) -> AppResult<Vec<SchemaColumn>>;

    /// Creates a virtual base view.
    async fn create_virtual_base_view(
        &self,
        token: &AuthToken,
        req: &CreateVirtualBaseViewRequest,
    ) -> AppResult<VirtualBaseView>;

    /// Lists the user's virtual base views.
    async fn list_virtual_base_views(&self, token: &AuthToken) -> AppResult<Vec<VirtualBaseView>>;

    /// Fetches the schema of the columns a virtual base view selects.
    async fn virtual_base_view_schema(
        &self,
        token: &AuthToken,
        view_id: &str,
    ) -> AppResult<Vec<SchemaColumn>>;

    /// Fetches the first rows of a virtual base view.
    async fn virtual_base_view_sample(
        &self,
        token: &AuthToken,
        view_id: &str,
    ) -> AppResult<SampleData>;

    /// Creates a legacy virtual view from schema record ids.
    async fn create_virtual_view(
        &self,
        token: &AuthToken,
        req: &CreateVirtualViewRequest,
    ) -> AppResult<VirtualView>;

    /// Lists the user's legacy virtual views.
    async fn list_virtual_views(&self, token: &AuthToken) -> AppResult<Vec<VirtualView>>;
}
