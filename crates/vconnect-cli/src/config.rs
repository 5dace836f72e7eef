//! Configuration file handling for vconnect
//!
//! The file carries the CLI defaults next to the account settings read by
//! [`ConnectConfig`]:
//!
//! ```toml
//! server = "https://connect.example.com"
//! output = "json"
//! username = "driver@example.com"
//! password = "secret"
//! country = "DE"
//! spin = "1234"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;
use vconnect_session::ConnectConfig;

use crate::output::OutputFormat;

const DEFAULT_SERVER: &str = "http://localhost:9080";

/// Configuration for the CLI tool
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Default service URL
    pub server: Option<String>,
    /// Default output format
    pub output: Option<String>,
    /// Disable colored output
    pub no_color: Option<bool>,
    /// Remaining keys, deserialized into a [`ConnectConfig`] after merging
    #[serde(flatten)]
    pub account: toml::Table,
}

/// Account values given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct AccountOverrides {
    pub username: Option<String>,
    pub password: Option<String>,
    pub country: Option<String>,
}

impl Config {
    /// Load configuration from the default config file, if present
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("vconnect");

        Ok(config_dir.join("config.toml"))
    }

    /// Merge CLI arguments over config file values
    pub fn merge_with_args(
        &self,
        server: Option<&str>,
        output: Option<OutputFormat>,
        no_color: bool,
        overrides: AccountOverrides,
    ) -> Result<MergedConfig> {
        let output = match (output, &self.output) {
            (Some(format), _) => format,
            (None, Some(name)) => OutputFormat::from_str(name, true)
                .map_err(|e| anyhow::anyhow!("Invalid output format in config: {}", e))?,
            (None, None) => OutputFormat::default(),
        };

        let mut account = self.account.clone();
        for (key, value) in [
            ("username", overrides.username),
            ("password", overrides.password),
            ("country", overrides.country),
        ] {
            if let Some(value) = value {
                account.insert(key.to_string(), toml::Value::String(value));
            }
        }

        let account: ConnectConfig = toml::Value::Table(account)
            .try_into()
            .context("Incomplete account configuration (username and country are required)")?;
        account.validate()?;

        Ok(MergedConfig {
            server: server
                .map(String::from)
                .or_else(|| self.server.clone())
                .unwrap_or_else(|| DEFAULT_SERVER.to_string()),
            output,
            no_color: no_color || self.no_color.unwrap_or(false),
            account,
        })
    }
}

/// Fully resolved configuration after merging CLI args
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub server: String,
    pub output: OutputFormat,
    pub no_color: bool,
    pub account: ConnectConfig,
}
