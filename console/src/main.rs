//! 数据虚拟化命令行客户端
//!
//! 提供以下功能：
//! - 账户注册、登录与登出
//! - 测试并保存数据库连接，浏览数据源结构
//! - 创建虚拟基础视图并查看结构与样本数据

mod auth;
mod cli;
mod commands;
mod datasources;
mod message;
mod render;
mod session;
#[cfg(test)]
mod testkit;
mod views;
mod wizard;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use api_client::{FileTokenStore, HttpApi};
use common::config::AppConfig;
use common::errors::AppError;
use common::logging;

use crate::auth::Surface;
use crate::cli::Cli;
use crate::commands::App;
use crate::message::Message;
use crate::session::Session;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<AppError>() {
                Some(app_err) => {
                    Message::from_error(app_err).print();
                    if matches!(app_err, AppError::NotAuthenticated) {
                        commands::show_surface(&Surface::login());
                    }
                }
                None => Message::error(format!("Error: {:#}", err)).print(),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::load()?;
    if let Some(url) = cli.base_url.as_deref() {
        config.set_base_url(url)?;
    }
    if let Some(path) = cli.token_file {
        config.token_path = path;
    }

    let directive = if cli.verbose { "debug" } else { "warn" };
    logging::init(config.log_format, directive);
    tracing::debug!(base_url = %config.base_url, token_path = %config.token_path.display(), "配置已加载");

    let api = HttpApi::new(&config)?;
    let tokens = FileTokenStore::new(config.token_path.clone());
    let mut app = App::new(Session::new(Arc::new(api), Arc::new(tokens)));

    app.run(cli.command).await?;
    Ok(())
}
