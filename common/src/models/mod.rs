//! Wire models shared by the API client and the console.

pub mod auth;
pub mod datasource;
pub mod nullable;
pub mod sample;
pub mod schema;
pub mod virtual_view;

// Re-export commonly used types
pub use auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
pub use datasource::{ConnectionParams, DataSource, DbType, SaveDataSourceRequest};
pub use sample::SampleData;
pub use schema::{group_by_table, SchemaColumn, TableSchema};
pub use virtual_view::{
    CreateVirtualBaseViewRequest, CreateVirtualViewRequest, VirtualBaseView, VirtualView,
};
