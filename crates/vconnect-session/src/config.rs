//! Session configuration
//!
//! Loaded from TOML. Only the account fields are required; everything else
//! falls back to the defaults below.
//!
//! ```toml
//! username = "driver@example.com"
//! password = "secret"
//! country = "DE"
//! spin = "1234"
//! unit_system = "imperial"
//! retry_budget = 3
//! heater_source = "electric"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vconnect_core::{HeaterSource, UnitSystem};

use crate::session::Credentials;
use crate::vehicle::FetchPolicy;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Account and policy configuration for a [`ConnectSession`](crate::ConnectSession)
#[derive(Clone, Serialize, Deserialize)]
pub struct ConnectConfig {
    /// Account user name
    pub username: String,
    /// Account password
    #[serde(default)]
    pub password: String,
    /// Account country/market code (e.g., "DE")
    pub country: String,
    /// Security PIN required by some remote commands
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spin: Option<String>,
    /// Unit system used when presenting vehicle data
    #[serde(default)]
    pub unit_system: UnitSystem,
    /// Attempts per vehicle data fetch
    #[serde(default = "default_retry_budget")]
    pub retry_budget: u32,
    /// Delay between fetch attempts in seconds
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
    /// Register a newly discovered vehicle even if its first fetch errored
    #[serde(default = "default_register_on_fetch_error")]
    pub register_on_fetch_error: bool,
    /// Initial heater source for climatisation
    #[serde(default)]
    pub heater_source: HeaterSource,
    /// Initial run time for ventilation / pre-heater commands
    #[serde(default = "default_control_duration")]
    pub control_duration_minutes: u32,
}

fn default_retry_budget() -> u32 {
    3
}

fn default_retry_delay_secs() -> u64 {
    10
}

fn default_register_on_fetch_error() -> bool {
    true
}

fn default_control_duration() -> u32 {
    30
}

impl std::fmt::Debug for ConnectConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("country", &self.country)
            .field("spin", &self.spin.as_ref().map(|_| "<redacted>"))
            .field("unit_system", &self.unit_system)
            .field("retry_budget", &self.retry_budget)
            .field("retry_delay_secs", &self.retry_delay_secs)
            .field("register_on_fetch_error", &self.register_on_fetch_error)
            .field("heater_source", &self.heater_source)
            .field("control_duration_minutes", &self.control_duration_minutes)
            .finish()
    }
}

impl ConnectConfig {
    /// Create a configuration with default policy values
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            country: country.into(),
            spin: None,
            unit_system: UnitSystem::default(),
            retry_budget: default_retry_budget(),
            retry_delay_secs: default_retry_delay_secs(),
            register_on_fetch_error: default_register_on_fetch_error(),
            heater_source: HeaterSource::default(),
            control_duration_minutes: default_control_duration(),
        }
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Check that the account fields are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.username.trim().is_empty() {
            return Err(ConfigError::Invalid("username must not be empty".into()));
        }
        if self.country.trim().is_empty() {
            return Err(ConfigError::Invalid("country must not be empty".into()));
        }
        Ok(())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.username, &self.password, &self.country)
    }

    /// Retry policy for vehicle data fetches. A zero budget still makes one attempt.
    pub fn fetch_policy(&self) -> FetchPolicy {
        FetchPolicy {
            retry_budget: self.retry_budget.max(1),
            retry_delay: Duration::from_secs(self.retry_delay_secs),
        }
    }

    pub fn control_settings(&self) -> ControlSettings {
        ControlSettings {
            heater_source: self.heater_source,
            control_duration_minutes: self.control_duration_minutes,
        }
    }
}

/// Settings applied to subsequent actuation commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlSettings {
    /// Heater source used when starting climatisation
    pub heater_source: HeaterSource,
    /// Run time for ventilation and pre-heater
    pub control_duration_minutes: u32,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            heater_source: HeaterSource::default(),
            control_duration_minutes: default_control_duration(),
        }
    }
}
