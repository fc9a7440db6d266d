//! Client configuration.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file in the working directory. Command-line flags override them.

use std::path::PathBuf;
use std::time::Duration;

use crate::errors::{AppError, AppResult};

/// Environment variable holding the API base URL.
pub const BASE_URL_ENV: &str = "DATAVIEW_BASE_URL";
/// Environment variable holding the token file path.
pub const TOKEN_FILE_ENV: &str = "DATAVIEW_TOKEN_FILE";
/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "DATAVIEW_TIMEOUT_SECS";
/// Environment variable selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "DATAVIEW_LOG_FORMAT";

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const APP_DIR: &str = "dataview";
const TOKEN_FILE_NAME: &str = "token.json";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Config {
                field: LOG_FORMAT_ENV,
                reason: format!("expected `text` or `json`, got `{}`", other),
            }),
        }
    }
}

/// Resolved client configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the remote API, without trailing slash.
    pub base_url: String,
    /// File the bearer token is persisted in.
    pub token_path: PathBuf,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Log output format.
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Loads `.env` (if present) and then reads configuration from the environment.
    pub fn load() -> AppResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let token_path = match lookup(TOKEN_FILE_ENV).filter(|v| !v.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_token_path()?,
        };

        let timeout_secs = match lookup(TIMEOUT_ENV) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| AppError::Config {
                field: TIMEOUT_ENV,
                reason: e.to_string(),
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let log_format = match lookup(LOG_FORMAT_ENV) {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };

        let mut config = Self {
            base_url: String::new(),
            token_path,
            timeout_secs,
            log_format,
        };
        config.set_base_url(&base_url)?;
        Ok(config)
    }

    /// Replaces the base URL after checking its scheme.
    pub fn set_base_url(&mut self, url: &str) -> AppResult<()> {
        let url = url.trim().trim_end_matches('/');
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AppError::Config {
                field: BASE_URL_ENV,
                reason: format!("`{}` must start with http:// or https://", url),
            });
        }
        self.base_url = url.to_string();
        Ok(())
    }

    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Default token location under the user's configuration directory.
pub fn default_token_path() -> AppResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(TOKEN_FILE_NAME))
        .ok_or(AppError::Config {
            field: TOKEN_FILE_ENV,
            reason: "no configuration directory found; set the variable explicitly".to_string(),
        })
}
