//! 命令分发
//!
//! 把解析后的命令交给对应的管理器，并把结果渲染到终端。

use dialoguer::Password;

use common::errors::{AppError, AppResult};
use common::models::{ConnectionParams, VirtualBaseView};

use crate::auth::{AuthManager, Outcome, Surface};
use crate::cli::{Commands, CreateViewArgs, DataSourceCommand, LegacyViewCommand, ViewCommand};
use crate::datasources::DataSourceManager;
use crate::message::Message;
use crate::render;
use crate::session::Session;
use crate::views::VirtualViewManager;
use crate::wizard;

/// Managers for one invocation of the binary.
pub struct App {
    auth: AuthManager,
    sources: DataSourceManager,
    views: VirtualViewManager,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self {
            auth: AuthManager::new(session.clone()),
            sources: DataSourceManager::new(session.clone()),
            views: VirtualViewManager::new(session),
        }
    }

    pub async fn run(&mut self, command: Commands) -> AppResult<()> {
        match command {
            Commands::Register(args) => {
                let password = password_or_prompt(args.password)?;
                let outcome = self
                    .auth
                    .register(&args.username, &args.email, &password)
                    .await?;
                show(&outcome);
            }
            Commands::Login(args) => {
                let password = password_or_prompt(args.password)?;
                let outcome = self.auth.login(&args.username, &password).await?;
                show(&outcome);
            }
            Commands::Logout => show(&self.auth.logout()),
            Commands::Status => match self.auth.require_auth() {
                Surface::Dashboard => Message::success("Logged in.").print(),
                surface => {
                    Message::info("Not logged in.").print();
                    show_surface(&surface);
                }
            },
            Commands::Datasource(cmd) => self.data_source(cmd).await?,
            Commands::View(cmd) => self.view(cmd).await?,
            Commands::LegacyView(cmd) => self.legacy_view(cmd).await?,
        }
        Ok(())
    }

    async fn data_source(&mut self, cmd: DataSourceCommand) -> AppResult<()> {
        match cmd {
            DataSourceCommand::Test { connection, save } => {
                Message::info("Testing connection and fetching schema...").print();
                let tables = self
                    .sources
                    .test_connection(ConnectionParams::from(connection))
                    .await?;
                Message::success("Connection successful!").print();
                println!("{}", render::schema(tables));

                if save {
                    Message::info("Saving data source...").print();
                    self.sources.save_current().await?.print();
                }
            }
            DataSourceCommand::Connect(connection) => {
                Message::info("Connecting and fetching schema...").print();
                let params = ConnectionParams::from(connection);
                let tables = self.sources.connect_and_save(&params).await?;
                Message::success("Data source connected and saved successfully!").print();
                println!("{}", render::schema(&tables));
            }
            DataSourceCommand::List => {
                let sources = self.sources.list().await?;
                if sources.is_empty() {
                    Message::info("No saved data sources found. Please add some data sources first.")
                        .print();
                } else {
                    println!("{}", render::data_sources(&sources));
                }
            }
            DataSourceCommand::Schema { id } => {
                let tables = self.sources.schema(&id).await?;
                println!("{}", render::schema(&tables));
            }
        }
        Ok(())
    }

    async fn view(&mut self, cmd: ViewCommand) -> AppResult<()> {
        match cmd {
            ViewCommand::Create(args) => {
                let view = self.create_view(args).await?;
                Message::success("Virtual BaseView created successfully!").print();
                println!("{}", render::virtual_base_views(&[view]));
            }
            ViewCommand::List => {
                let views = self.views.load_virtual_base_views().await?;
                if views.is_empty() {
                    Message::info("No Virtual BaseViews found.").print();
                } else {
                    Message::info("Your Virtual BaseViews:").print();
                    println!("{}", render::virtual_base_views(&views));
                }
            }
            ViewCommand::Schema { id } => {
                let columns = self.views.view_details(&id).await?;
                println!("{}", render::columns(&columns));
            }
            ViewCommand::Sample { id } => {
                let data = self.views.sample_data(&id).await?;
                println!("{}", render::sample_data(&data));
            }
            ViewCommand::Wizard => {
                if let Some(view) = wizard::run(&mut self.views).await? {
                    Message::success("Virtual BaseView created successfully!").print();
                    println!("{}", render::virtual_base_views(&[view]));
                }
            }
        }
        Ok(())
    }

    async fn create_view(&mut self, args: CreateViewArgs) -> AppResult<VirtualBaseView> {
        self.views.select_data_source(&args.datasource).await?;
        self.views.select_table(&args.table)?;
        if args.columns.is_empty() {
            self.views.select_all_columns()?;
        } else {
            self.views.select_columns(args.columns.as_slice())?;
        }
        self.views
            .create_virtual_base_view(&args.name, &args.description)
            .await
    }

    async fn legacy_view(&mut self, cmd: LegacyViewCommand) -> AppResult<()> {
        match cmd {
            LegacyViewCommand::Create {
                name,
                description,
                schema_ids,
            } => {
                let view = self
                    .views
                    .create_virtual_view(&name, &description, &schema_ids)
                    .await?;
                Message::success(format!("Virtual view '{}' created successfully!", view.name)).print();
            }
            LegacyViewCommand::List => {
                let views = self.views.list_virtual_views().await?;
                println!("{}", render::virtual_views(&views));
            }
        }
        Ok(())
    }
}

fn password_or_prompt(password: Option<String>) -> AppResult<String> {
    match password {
        Some(password) => Ok(password),
        None => Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| AppError::Prompt(e.to_string())),
    }
}

fn show(outcome: &Outcome) {
    outcome.message.print();
    show_surface(&outcome.surface);
}

/// Tells the user where to go next.
pub fn show_surface(surface: &Surface) {
    match surface {
        Surface::Login { username: Some(name) } => {
            Message::info(format!("Continue with `dataview login --username {}`.", name)).print()
        }
        Surface::Login { username: None } => {
            Message::info("Continue with `dataview login`.").print()
        }
        Surface::Dashboard => {}
    }
}
