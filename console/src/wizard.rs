//! Interactive virtual base view builder.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, MultiSelect, Select};

use common::errors::{AppError, AppResult};
use common::models::{SchemaColumn, VirtualBaseView};

use crate::message::Message;
use crate::render;
use crate::views::VirtualViewManager;

fn prompt_error(err: dialoguer::Error) -> AppError {
    AppError::Prompt(err.to_string())
}

/// Checkbox label for a column, e.g. `id  integer  [PK] [NOT NULL]`.
pub fn column_label(column: &SchemaColumn) -> String {
    let mut label = format!("{}  {}", column.display_name(), column.display_type());
    if column.is_primary_key {
        label.push_str("  [PK]");
    }
    if !column.is_nullable {
        label.push_str("  [NOT NULL]");
    }
    label
}

/// Walks data source, table, columns and name, then creates the view.
///
/// Returns `None` when there is nothing to build from.
pub async fn run(views: &mut VirtualViewManager) -> AppResult<Option<VirtualBaseView>> {
    let theme = ColorfulTheme::default();

    let sources = views.load_data_sources().await?;
    if sources.is_empty() {
        Message::info("No saved data sources found. Please add some data sources first.").print();
        return Ok(None);
    }

    let labels: Vec<String> = sources
        .iter()
        .map(|ds| format!("{} ({})", ds.source_name, ds.db_type))
        .collect();
    let picked = Select::with_theme(&theme)
        .with_prompt("Select a data source")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(prompt_error)?;

    let tables = views.select_data_source(&sources[picked].id).await?;
    if tables.is_empty() {
        Message::warning("No schema information available.").print();
        return Ok(None);
    }
    println!("{}", render::table_cards(tables));

    let table_names: Vec<String> = tables.iter().map(|t| t.name.clone()).collect();
    let picked = Select::with_theme(&theme)
        .with_prompt("Select a table")
        .items(&table_names)
        .default(0)
        .interact()
        .map_err(prompt_error)?;

    let table = views.select_table(&table_names[picked])?;
    let column_labels: Vec<String> = table.columns.iter().map(column_label).collect();
    let column_names = table.column_names();

    let chosen = MultiSelect::with_theme(&theme)
        .with_prompt(format!(
            "Select columns for \"{}\" (space to toggle, enter to confirm)",
            table_names[picked]
        ))
        .items(&column_labels)
        .interact()
        .map_err(prompt_error)?;
    let chosen: Vec<&str> = chosen.into_iter().map(|i| column_names[i].as_str()).collect();
    views.select_columns(chosen.as_slice())?;

    let name: String = Input::with_theme(&theme)
        .with_prompt("View name")
        .interact_text()
        .map_err(prompt_error)?;
    let description: String = Input::with_theme(&theme)
        .with_prompt("Description")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)?;

    views
        .create_virtual_base_view(&name, &description)
        .await
        .map(Some)
}
