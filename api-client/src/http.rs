//! reqwest implementation of the API contract.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use common::config::AppConfig;
use common::errors::{AppError, AppResult};
use common::models::{
    ConnectionParams, CreateVirtualBaseViewRequest, CreateVirtualViewRequest, DataSource,
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, SampleData,
    SaveDataSourceRequest, SchemaColumn, VirtualBaseView, VirtualView,
};
use common::response::{
    error_message, CreatedVirtualBaseView, DataSourceList, SampleDataEnvelope,
    SaveDataSourceResponse, SchemaEnvelope, VirtualBaseViewList, VirtualViewList,
};
use common::utils::{bearer_value, IdGenerator, REQUEST_ID_HEADER};

use crate::api::{routes, Api};
use crate::token::AuthToken;

/// HTTP client for the remote API.
#[derive(Clone)]
pub struct HttpApi {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpApi {
    /// Creates a client from configuration.
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::Config {
                field: "http_client",
                reason: e.to_string(),
            })?;
        Ok(Self::with_client(&config.base_url, http_client))
    }

    /// Creates a client around an existing reqwest client.
    pub fn with_client(base_url: &str, http_client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        }
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, token: Option<&AuthToken>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.http_client.request(method, url);
        match token {
            Some(token) => builder.header(AUTHORIZATION, bearer_value(token.as_str())),
            None => builder,
        }
    }

    async fn post<B, T>(&self, path: &str, token: Option<&AuthToken>, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path, token).json(body);
        self.send(Method::POST, path, builder).await
    }

    async fn get<T>(&self, path: &str, token: &AuthToken, query: &[(&str, &str)]) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let mut builder = self.request(Method::GET, path, Some(token));
        if !query.is_empty() {
            builder = builder.query(query);
        }
        self.send(Method::GET, path, builder).await
    }

    /// Sends one request and decodes the body.
    ///
    /// Non-success statuses become `AppError::Api` carrying the server's
    /// message. No retries.
    async fn send<T>(&self, method: Method, path: &str, builder: RequestBuilder) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let request_id = IdGenerator::request_id();
        tracing::debug!(request_id = %request_id, method = %method, path, "sending request");

        let response = builder
            .header(REQUEST_ID_HEADER, &request_id)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(request_id = %request_id, path, error = %e, "request failed");
                AppError::Network(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::warn!(request_id = %request_id, path, error = %e, "reading body failed");
            AppError::Network(e.to_string())
        })?;

        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("request failed");
            let message = error_message(&body, reason);
            tracing::warn!(
                request_id = %request_id,
                path,
                status = status.as_u16(),
                message = %message,
                "server rejected request"
            );
            return Err(AppError::Api {
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!(request_id = %request_id, path, status = status.as_u16(), "response received");
        serde_json::from_str(&body).map_err(|e| AppError::InvalidResponse(e.to_string()))
    }
}

fn decode_columns(envelope: SchemaEnvelope) -> AppResult<Vec<SchemaColumn>> {
    envelope
        .columns()
        .map_err(|e| AppError::InvalidResponse(e.to_string()))
}

#[async_trait]
impl Api for HttpApi {
    async fn register(&self, req: &RegisterRequest) -> AppResult<RegisterResponse> {
        self.post(routes::REGISTER, None, req).await
    }

    async fn login(&self, req: &LoginRequest) -> AppResult<LoginResponse> {
        self.post(routes::LOGIN, None, req).await
    }

    async fn test_connection(
        &self,
        token: &AuthToken,
        params: &ConnectionParams,
    ) -> AppResult<SchemaEnvelope> {
        self.post(routes::TEST_CONNECTION, Some(token), params).await
    }

    async fn connect_and_fetch_schema(
        &self,
        token: &AuthToken,
        params: &ConnectionParams,
    ) -> AppResult<SchemaEnvelope> {
        self.post(routes::CONNECT_AND_FETCH_SCHEMA, Some(token), params)
            .await
    }

    async fn save_data_source(
        &self,
        token: &AuthToken,
        req: &SaveDataSourceRequest,
    ) -> AppResult<SaveDataSourceResponse> {
        self.post(routes::SAVE_DATASOURCE, Some(token), req).await
    }

    async fn list_data_sources(&self, token: &AuthToken) -> AppResult<Vec<DataSource>> {
        let list: DataSourceList = self.get(routes::DATASOURCES, token, &[]).await?;
        Ok(list.datasources)
    }

    async fn data_source_schema(
        &self,
        token: &AuthToken,
        datasource_id: &str,
    ) -> AppResult<Vec<SchemaColumn>> {
        let envelope: SchemaEnvelope = self
            .get(
                routes::DATASOURCE_SCHEMA,
                token,
                &[("datasource_id", datasource_id)],
            )
            .await?;
        decode_columns(envelope)
    }

    async fn create_virtual_base_view(
        &self,
        token: &AuthToken,
        req: &CreateVirtualBaseViewRequest,
    ) -> AppResult<VirtualBaseView> {
        let created: CreatedVirtualBaseView = self
            .post(routes::VIRTUAL_BASE_VIEWS, Some(token), req)
            .await?;
        Ok(created.virtual_base_view)
    }

    async fn list_virtual_base_views(&self, token: &AuthToken) -> AppResult<Vec<VirtualBaseView>> {
        let list: VirtualBaseViewList = self.get(routes::VIRTUAL_BASE_VIEWS, token, &[]).await?;
        Ok(list.virtual_base_views)
    }

    async fn virtual_base_view_schema(
        &self,
        token: &AuthToken,
        view_id: &str,
    ) -> AppResult<Vec<SchemaColumn>> {
        let envelope: SchemaEnvelope = self
            .get(
                routes::VIRTUAL_BASE_VIEW_SCHEMA,
                token,
                &[("virtual_base_view_id", view_id)],
            )
            .await?;
        decode_columns(envelope)
    }

    async fn virtual_base_view_sample(
        &self,
        token: &AuthToken,
        view_id: &str,
    ) -> AppResult<SampleData> {
        let envelope: SampleDataEnvelope = self
            .get(
                routes::VIRTUAL_BASE_VIEW_SAMPLE,
                token,
                &[("virtual_base_view_id", view_id)],
            )
            .await?;
        Ok(envelope.into_inner())
    }

    async fn create_virtual_view(
        &self,
        token: &AuthToken,
        req: &CreateVirtualViewRequest,
    ) -> AppResult<VirtualView> {
        self.post(routes::VIRTUAL_VIEWS, Some(token), req).await
    }

    async fn list_virtual_views(&self, token: &AuthToken) -> AppResult<Vec<VirtualView>> {
        let list: VirtualViewList = self.get(routes::VIRTUAL_VIEWS, token, &[]).await?;
        Ok(list.virtualviews)
    }
}
