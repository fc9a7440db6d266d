//! 虚拟视图管理
//!
//! 选择数据源、表和列，创建虚拟基础视图，并查看视图结构与样本数据。

use common::errors::{AppError, AppResult};
use common::models::schema::find_table;
use common::models::{
    group_by_table, CreateVirtualBaseViewRequest, CreateVirtualViewRequest, DataSource,
    SampleData, SchemaColumn, TableSchema, VirtualBaseView, VirtualView,
};

use crate::session::Session;

/// Selection built up while authoring a virtual base view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub data_source: Option<String>,
    pub table: Option<String>,
    /// Ordered, without duplicates.
    pub columns: Vec<String>,
    /// Grouped schema of the selected data source.
    pub tables: Vec<TableSchema>,
}

/// 虚拟视图管理器
pub struct VirtualViewManager {
    session: Session,
    selection: Selection,
}

impl VirtualViewManager {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            selection: Selection::default(),
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub async fn load_data_sources(&self) -> AppResult<Vec<DataSource>> {
        let token = self.session.token()?;
        self.session.api().list_data_sources(&token).await
    }

    pub async fn load_virtual_base_views(&self) -> AppResult<Vec<VirtualBaseView>> {
        let token = self.session.token()?;
        self.session.api().list_virtual_base_views(&token).await
    }

    /// 选择数据源并加载其结构；之前选择的表和列会被清空
    pub async fn select_data_source(&mut self, datasource_id: &str) -> AppResult<&[TableSchema]> {
        let token = self.session.token()?;
        if datasource_id.trim().is_empty() {
            return Err(AppError::validation("Please select a data source."));
        }

        self.selection = Selection {
            data_source: Some(datasource_id.to_string()),
            ..Selection::default()
        };

        let columns = self
            .session
            .api()
            .data_source_schema(&token, datasource_id)
            .await?;
        self.selection.tables = group_by_table(&columns);
        tracing::debug!(datasource_id, tables = self.selection.tables.len(), "数据源结构已加载");
        Ok(&self.selection.tables)
    }

    /// 选择一张表，清空已选列
    pub fn select_table(&mut self, name: &str) -> AppResult<&TableSchema> {
        if self.selection.data_source.is_none() {
            return Err(AppError::validation("Please select a data source."));
        }
        let table = find_table(&self.selection.tables, name)
            .ok_or_else(|| AppError::validation(format!("Table '{}' not found in schema.", name)))?;

        self.selection.table = Some(table.name.clone());
        self.selection.columns.clear();
        Ok(table)
    }

    fn current_table(&self) -> AppResult<&TableSchema> {
        self.selection
            .table
            .as_deref()
            .and_then(|name| find_table(&self.selection.tables, name))
            .ok_or_else(|| AppError::validation("Please select a table."))
    }

    fn check_column(&self, name: &str) -> AppResult<()> {
        let table = self.current_table()?;
        match table.find_column(name) {
            Some(_) => Ok(()),
            None => Err(AppError::validation(format!(
                "Column '{}' does not belong to table '{}'.",
                name, table.name
            ))),
        }
    }

    /// Adds the column if absent, removes it otherwise. Returns whether it is now selected.
    pub fn toggle_column(&mut self, name: &str) -> AppResult<bool> {
        self.check_column(name)?;
        let columns = &mut self.selection.columns;
        match columns.iter().position(|c| c == name) {
            Some(idx) => {
                columns.remove(idx);
                Ok(false)
            }
            None => {
                columns.push(name.to_string());
                Ok(true)
            }
        }
    }

    /// Replaces the selection with `names`, in the given order.
    pub fn select_columns<S: AsRef<str>>(&mut self, names: &[S]) -> AppResult<()> {
        let mut picked: Vec<String> = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            self.check_column(name)?;
            if !picked.iter().any(|c| c == name) {
                picked.push(name.to_string());
            }
        }
        self.selection.columns = picked;
        Ok(())
    }

    pub fn select_all_columns(&mut self) -> AppResult<()> {
        let names = self.current_table()?.column_names();
        self.selection.columns = names;
        Ok(())
    }

    pub fn clear_columns(&mut self) {
        self.selection.columns.clear();
    }

    /// 创建虚拟基础视图
    ///
    /// 依次检查名称、数据源、表、列和登录状态，任一失败都不会发出请求。
    /// 成功后重置全部选择状态。
    pub async fn create_virtual_base_view(
        &mut self,
        name: &str,
        description: &str,
    ) -> AppResult<VirtualBaseView> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Please enter a view name."));
        }
        let data_source_id = self
            .selection
            .data_source
            .clone()
            .ok_or_else(|| AppError::validation("Please select a data source."))?;
        let table_name = self
            .selection
            .table
            .clone()
            .ok_or_else(|| AppError::validation("Please select a table."))?;
        if self.selection.columns.is_empty() {
            return Err(AppError::validation("Please select at least one column."));
        }
        let token = self.session.token()?;

        let req = CreateVirtualBaseViewRequest {
            name: name.to_string(),
            description: Some(description.to_string()).filter(|d| !d.is_empty()),
            data_source_id,
            table_name,
            selected_columns: self.selection.columns.clone(),
        };
        let view = self
            .session
            .api()
            .create_virtual_base_view(&token, &req)
            .await?;
        tracing::info!(id = %view.id, name = %view.name, "虚拟基础视图已创建");

        self.selection = Selection::default();
        Ok(view)
    }

    /// 查看已保存视图的列结构
    pub async fn view_details(&self, view_id: &str) -> AppResult<Vec<SchemaColumn>> {
        let token = self.session.token()?;
        require_id(view_id)?;
        self.session
            .api()
            .virtual_base_view_schema(&token, view_id)
            .await
    }

    /// 获取视图的样本数据（前 5 行）
    pub async fn sample_data(&self, view_id: &str) -> AppResult<SampleData> {
        let token = self.session.token()?;
        require_id(view_id)?;
        self.session
            .api()
            .virtual_base_view_sample(&token, view_id)
            .await
    }

    /// 创建旧版虚拟视图
    pub async fn create_virtual_view(
        &self,
        name: &str,
        description: &str,
        schema_ids: &[String],
    ) -> AppResult<VirtualView> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Please enter a view name."));
        }
        let selected_schema_ids: Vec<String> = schema_ids
            .iter()
            .filter(|id| !id.trim().is_empty())
            .cloned()
            .collect();
        if selected_schema_ids.is_empty() {
            return Err(AppError::validation("Please select at least one column."));
        }
        let token = self.session.token()?;

        let req = CreateVirtualViewRequest {
            name: name.to_string(),
            description: Some(description.to_string()).filter(|d| !d.is_empty()),
            selected_schema_ids,
        };
        let view = self.session.api().create_virtual_view(&token, &req).await?;
        tracing::info!(id = %view.id, "虚拟视图已创建");
        Ok(view)
    }

    pub async fn list_virtual_views(&self) -> AppResult<Vec<VirtualView>> {
        let token = self.session.token()?;
        self.session.api().list_virtual_views(&token).await
    }
}

fn require_id(view_id: &str) -> AppResult<()> {
    if view_id.trim().is_empty() {
        Err(AppError::validation("Virtual base view ID is required."))
    } else {
        Ok(())
    }
}
