//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use common::models::{ConnectionParams, DbType};

/// dataview - client for the data virtualisation service.
#[derive(Parser, Debug)]
#[command(name = "dataview")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the API (overrides DATAVIEW_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Token file (overrides DATAVIEW_TOKEN_FILE)
    #[arg(long, global = true)]
    pub token_file: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account
    Register(RegisterArgs),

    /// Log in and store the session token
    Login(LoginArgs),

    /// Forget the stored session token
    Logout,

    /// Show whether a session token is stored
    Status,

    /// Manage data sources
    #[command(subcommand)]
    Datasource(DataSourceCommand),

    /// Manage virtual base views
    #[command(subcommand)]
    View(ViewCommand),

    /// Manage legacy virtual views
    #[command(subcommand)]
    LegacyView(LegacyViewCommand),
}

/// Subcommands for `dataview datasource`
#[derive(Subcommand, Debug)]
pub enum DataSourceCommand {
    /// Test a connection and show its schema
    Test {
        #[command(flatten)]
        connection: ConnectionArgs,
        /// Save the data source when the test succeeds
        #[arg(long)]
        save: bool,
    },
    /// Connect, fetch the schema and save in one step
    Connect(ConnectionArgs),
    /// List saved data sources
    List,
    /// Show the stored schema of a data source
    Schema {
        /// Data source ID
        id: String,
    },
}

/// Subcommands for `dataview view`
#[derive(Subcommand, Debug)]
pub enum ViewCommand {
    /// Create a virtual base view
    Create(CreateViewArgs),
    /// List virtual base views
    List,
    /// Show the columns of a virtual base view
    Schema {
        /// Virtual base view ID
        id: String,
    },
    /// Show the first rows of a virtual base view
    Sample {
        /// Virtual base view ID
        id: String,
    },
    /// Build a virtual base view interactively
    Wizard,
}

/// Subcommands for `dataview legacy-view`
#[derive(Subcommand, Debug)]
pub enum LegacyViewCommand {
    /// Create a virtual view from schema record IDs
    Create {
        /// View name
        #[arg(long)]
        name: String,
        /// Optional description
        #[arg(long, default_value = "")]
        description: String,
        /// Comma-separated schema record IDs
        #[arg(long, value_delimiter = ',', required = true)]
        schema_ids: Vec<String>,
    },
    /// List legacy virtual views
    List,
}

/// Arguments for `dataview register`.
#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long, default_value = "")]
    pub email: String,
    /// Prompted for when omitted
    #[arg(long)]
    pub password: Option<String>,
}

/// Arguments for `dataview login`.
#[derive(Args, Debug)]
pub struct LoginArgs {
    #[arg(long)]
    pub username: String,
    /// Prompted for when omitted
    #[arg(long)]
    pub password: Option<String>,
}

/// Database connection fields.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Name to save the data source under
    #[arg(long = "name")]
    pub source_name: String,

    /// mysql or postgresql
    #[arg(long)]
    pub db_type: DbType,

    #[arg(long, default_value = "localhost")]
    pub host: String,

    /// Defaults to 3306 for mysql and 5432 for postgresql
    #[arg(long)]
    pub port: Option<u16>,

    #[arg(long)]
    pub user: String,

    /// Database password
    #[arg(long, env = "DATAVIEW_DB_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// Database name
    #[arg(long)]
    pub database: String,
}

impl From<ConnectionArgs> for ConnectionParams {
    fn from(args: ConnectionArgs) -> Self {
        ConnectionParams::new(
            args.source_name,
            args.db_type,
            args.host,
            args.port,
            args.user,
            args.password,
            args.database,
        )
    }
}

/// Arguments for `dataview view create`.
#[derive(Args, Debug)]
pub struct CreateViewArgs {
    /// View name
    #[arg(long)]
    pub name: String,
    /// Optional description
    #[arg(long, default_value = "")]
    pub description: String,
    /// Data source ID
    #[arg(long)]
    pub datasource: String,
    /// Table the view selects from
    #[arg(long)]
    pub table: String,
    /// Comma-separated column names; omit to select every column
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_connection_args_default_port() {
        let cli = Cli::try_parse_from([
            "dataview", "datasource", "test", "--name", "shop", "--db-type", "postgres",
            "--user", "reader", "--database", "shop", "--save",
        ])
        .unwrap();
        let Commands::Datasource(DataSourceCommand::Test { connection, save }) = cli.command else {
            panic!("unexpected command");
        };
        assert!(save);
        let params = ConnectionParams::from(connection);
        assert_eq!(params.port, 5432);
        assert_eq!(params.host, "localhost");
    }

    #[test]
    fn test_view_create_splits_columns() {
        let cli = Cli::try_parse_from([
            "dataview", "--base-url", "http://api:9000", "view", "create", "--name", "totals",
            "--datasource", "ds-1", "--table", "orders", "--columns", "id,total",
        ])
        .unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("http://api:9000"));
        let Commands::View(ViewCommand::Create(args)) = cli.command else {
            panic!("unexpected command");
        };
        assert_eq!(args.columns, vec!["id", "total"]);
    }
}
