//! vconnect - Command-line tool for connected-vehicle services
//!
//! Logs in to the account, syncs its vehicles and sends remote commands.

mod commands;
mod config;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vconnect_client::ConnectClient;
use vconnect_core::HeaterSource;
use vconnect_session::{ConnectConfig, ConnectSession};

use crate::config::{AccountOverrides, Config};
use crate::output::{OutputContext, OutputFormat};

#[derive(Parser)]
#[command(name = "vconnect")]
#[command(author, version, about = "Connected-vehicle remote control CLI")]
#[command(propagate_version = true)]
struct Cli {
    /// Service URL
    #[arg(short, long, env = "VCONNECT_SERVER")]
    server: Option<String>,

    /// Configuration file path
    #[arg(short, long, env = "VCONNECT_CONFIG")]
    config: Option<PathBuf>,

    /// Account user name
    #[arg(long, env = "VCONNECT_USERNAME")]
    username: Option<String>,

    /// Account password
    #[arg(long, env = "VCONNECT_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Account country code
    #[arg(long, env = "VCONNECT_COUNTRY")]
    country: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Minimal output (for scripting)
    #[arg(short, long)]
    quiet: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// On/off argument of the switch commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn is_on(self) -> bool {
        self == Switch::On
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Sync vehicles and show their status
    Status {
        /// Only update these vehicles
        vins: Vec<String>,
    },

    /// Ask the service to pull fresh data from the vehicle(s)
    Refresh {
        /// Vehicle to refresh (all vehicles if omitted)
        vin: Option<String>,
    },

    /// Lock the vehicle
    Lock {
        vin: String,
    },

    /// Unlock the vehicle
    Unlock {
        vin: String,
    },

    /// Start or stop climatisation
    Climate {
        vin: String,

        state: Switch,

        /// Target temperature in degrees Celsius
        #[arg(long)]
        temperature: Option<f64>,

        /// Heater source: electric, auxiliary, automatic
        #[arg(long)]
        source: Option<HeaterSource>,
    },

    /// Start or stop charging
    Charger {
        vin: String,

        state: Switch,

        /// Maximum charge current in amperes
        #[arg(long)]
        max_current: Option<u8>,
    },

    /// Switch window heating
    WindowHeating {
        vin: String,

        state: Switch,
    },

    /// Switch the auxiliary pre-heater
    PreHeater {
        vin: String,

        state: Switch,

        /// Run time in minutes
        #[arg(long)]
        duration: Option<u32>,
    },

    /// Switch ventilation
    Ventilation {
        vin: String,

        state: Switch,

        /// Run time in minutes
        #[arg(long)]
        duration: Option<u32>,
    },

    /// Sound the horn
    Honk {
        vin: String,

        /// Duration in seconds
        #[arg(long, default_value = "5")]
        duration: u32,
    },

    /// Flash the lights
    Flash {
        vin: String,

        /// Duration in seconds
        #[arg(long, default_value = "5")]
        duration: u32,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    // Load config file
    let config = if let Some(config_path) = &cli.config {
        Config::load_from(config_path)?
    } else {
        Config::load()?
    };

    let overrides = AccountOverrides {
        username: cli.username.clone(),
        password: cli.password.clone(),
        country: cli.country.clone(),
    };
    let merged = config.merge_with_args(cli.server.as_deref(), cli.output, cli.no_color, overrides)?;

    tracing::debug!(server = %merged.server, username = %merged.account.username, "Resolved configuration");

    let ctx = OutputContext::new(merged.output, merged.no_color, cli.quiet);
    let session = create_session(&merged.server, &merged.account)?;

    let ok = match &cli.command {
        Commands::Status { vins } => commands::status(&session, vins, &ctx).await?,

        Commands::Refresh { vin } => commands::refresh(&session, vin.as_deref(), &ctx).await,

        Commands::Lock { vin } => commands::lock(&session, vin, true, &ctx).await,

        Commands::Unlock { vin } => commands::lock(&session, vin, false, &ctx).await,

        Commands::Climate {
            vin,
            state,
            temperature,
            source,
        } => commands::climate(&session, vin, *state, *temperature, *source, &ctx).await,

        Commands::Charger {
            vin,
            state,
            max_current,
        } => commands::charger(&session, vin, *state, *max_current, &ctx).await,

        Commands::WindowHeating { vin, state } => {
            commands::window_heating(&session, vin, *state, &ctx).await
        }

        Commands::PreHeater {
            vin,
            state,
            duration,
        } => commands::pre_heater(&session, vin, *state, *duration, &ctx).await,

        Commands::Ventilation {
            vin,
            state,
            duration,
        } => commands::ventilation(&session, vin, *state, *duration, &ctx).await,

        Commands::Honk { vin, duration } => commands::honk(&session, vin, *duration, &ctx).await,

        Commands::Flash { vin, duration } => commands::flash(&session, vin, *duration, &ctx).await,
    };

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Create a session bound to a REST client for the given service URL
fn create_session(server: &str, account: &ConnectConfig) -> Result<ConnectSession> {
    let mut client = ConnectClient::new(server).context("Failed to create vconnect client")?;
    if let Some(spin) = &account.spin {
        client = client.with_spin(spin.clone());
    }
    let client = Arc::new(client);
    Ok(ConnectSession::new(account, client.clone(), client))
}
