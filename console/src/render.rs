//! Text rendering of schemas, data sources, views and sample data.

use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use common::models::{DataSource, SampleData, SchemaColumn, TableSchema, VirtualBaseView, VirtualView};
use common::utils::local_timestamp;

const NOT_AVAILABLE: &str = "N/A";
const SAMPLE_ROWS: usize = 5;

fn mark(flag: bool) -> &'static str {
    if flag {
        "✓"
    } else {
        "✗"
    }
}

fn or_na(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_string()
}

fn created(value: Option<&str>) -> String {
    value.map(local_timestamp).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

#[derive(Tabled)]
struct ColumnRow {
    #[tabled(rename = "Schema Name")]
    name: String,
    #[tabled(rename = "Schema Type")]
    column_type: String,
    #[tabled(rename = "PK")]
    primary_key: &'static str,
    #[tabled(rename = "Allow Null")]
    nullable: &'static str,
}

impl From<&SchemaColumn> for ColumnRow {
    fn from(col: &SchemaColumn) -> Self {
        Self {
            name: col.display_name().to_string(),
            column_type: col.display_type().to_string(),
            primary_key: mark(col.is_primary_key),
            nullable: mark(col.is_nullable),
        }
    }
}

/// One table per schema table, headed `Table: <name>`.
pub fn schema(tables: &[TableSchema]) -> String {
    if tables.is_empty() {
        return "No schema information available.".to_string();
    }
    tables
        .iter()
        .map(|table| {
            let rows: Vec<ColumnRow> = table.columns.iter().map(ColumnRow::from).collect();
            format!(
                "Table: {}\n{}",
                table.name,
                Table::new(rows).with(Style::rounded())
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Flat column list of a saved view.
pub fn columns(columns: &[SchemaColumn]) -> String {
    if columns.is_empty() {
        return "No schema information available.".to_string();
    }
    let rows: Vec<ColumnRow> = columns.iter().map(ColumnRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct TableCard {
    #[tabled(rename = "Table")]
    name: String,
    #[tabled(rename = "Columns")]
    columns: String,
}

/// Tables available for a new virtual base view.
pub fn table_cards(tables: &[TableSchema]) -> String {
    let cards: Vec<TableCard> = tables
        .iter()
        .map(|t| TableCard {
            name: t.name.clone(),
            columns: format!("{} columns available", t.columns.len()),
        })
        .collect();
    Table::new(cards).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct DataSourceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    db_type: String,
    #[tabled(rename = "Host")]
    host: String,
    #[tabled(rename = "Database")]
    database: String,
    #[tabled(rename = "Created")]
    created: String,
}

pub fn data_sources(sources: &[DataSource]) -> String {
    if sources.is_empty() {
        return "No data sources available.".to_string();
    }
    let rows: Vec<DataSourceRow> = sources
        .iter()
        .map(|ds| DataSourceRow {
            id: ds.id.clone(),
            name: ds.source_name.clone(),
            db_type: ds.db_type.clone(),
            host: or_na(ds.host.as_deref()),
            database: or_na(ds.database_name.as_deref()),
            created: created(ds.created_at.as_deref()),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct BaseViewRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Table")]
    table: String,
    #[tabled(rename = "Columns")]
    columns: String,
    #[tabled(rename = "Created")]
    created: String,
}

pub fn virtual_base_views(views: &[VirtualBaseView]) -> String {
    if views.is_empty() {
        return "No Virtual BaseViews available.".to_string();
    }
    let rows: Vec<BaseViewRow> = views
        .iter()
        .map(|v| BaseViewRow {
            id: v.id.clone(),
            name: v.name.clone(),
            description: v.display_description().to_string(),
            table: v.table_name.clone(),
            columns: format!("{} columns selected", v.selected_columns.len()),
            created: created(v.created_at.as_deref()),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct LegacyViewRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Columns")]
    columns: usize,
    #[tabled(rename = "Created")]
    created: String,
}

pub fn virtual_views(views: &[VirtualView]) -> String {
    if views.is_empty() {
        return "No virtual views available.".to_string();
    }
    let rows: Vec<LegacyViewRow> = views
        .iter()
        .map(|v| LegacyViewRow {
            id: v.id.clone(),
            name: v.name.clone(),
            description: v
                .description
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| "No description".to_string()),
            columns: v.column_count(),
            created: created(v.created_at.as_deref()),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Header plus up to five rows; missing values show as `NULL`.
pub fn sample_data(data: &SampleData) -> String {
    if data.is_empty() {
        return "No sample data available.".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(data.columns.iter().cloned());
    for row in data.display_rows().into_iter().take(SAMPLE_ROWS) {
        builder.push_record(row);
    }
    let table = builder.build().with(Style::rounded()).to_string();

    let mut out = format!("Sample Data (First {} rows)\n{}", SAMPLE_ROWS, table);
    if data.rows.is_empty() {
        out.push_str("\nNo data available");
    }
    out
}
