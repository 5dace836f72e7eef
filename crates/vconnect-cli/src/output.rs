//! Output formatting for vconnect (table, json)

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use tabled::{Table, Tabled};
use vconnect_session::Vehicle;

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Context for output rendering
pub struct OutputContext {
    pub format: OutputFormat,
    pub quiet: bool,
}

impl OutputContext {
    pub fn new(format: OutputFormat, no_color: bool, quiet: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { format, quiet }
    }

    /// Print a success message (unless in quiet mode)
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg.green());
        }
    }

    /// Print an info message (unless in quiet mode)
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg);
        }
    }

    /// Print an error message
    pub fn error(&self, msg: &str) {
        eprintln!("{}", msg.red());
    }

    /// Report the outcome of an orchestrator call and pass it through
    pub fn outcome(&self, ok: bool, success: &str, failure: &str) -> bool {
        if ok {
            self.success(success);
        } else {
            self.error(failure);
        }
        ok
    }

    /// Print data in the configured format
    pub fn print<T: Tabled + Serialize>(&self, data: &[T]) {
        match self.format {
            OutputFormat::Table => {
                if data.is_empty() {
                    if !self.quiet {
                        println!("No vehicles");
                    }
                } else {
                    let table = Table::new(data).to_string();
                    println!("{}", table);
                }
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(data).unwrap_or_else(|_| "[]".to_string())
                );
            }
        }
    }
}

// =============================================================================
// Display types
// =============================================================================

/// Vehicle display for the status command
#[derive(Debug, Tabled, Serialize)]
pub struct VehicleRow {
    #[tabled(rename = "VIN")]
    pub vin: String,
    #[tabled(rename = "Name")]
    pub nickname: String,
    #[tabled(rename = "Model")]
    pub model: String,
    #[tabled(rename = "Mileage")]
    pub mileage: String,
    #[tabled(rename = "Range")]
    pub range: String,
    #[tabled(rename = "Outside")]
    pub outside_temperature: String,
    #[tabled(rename = "Updated")]
    pub last_updated: String,
}

impl From<&Vehicle> for VehicleRow {
    fn from(vehicle: &Vehicle) -> Self {
        let units = vehicle.unit_system();
        let distance =
            |value: Option<f64>| format_value(value, 0, units.distance_unit());

        Self {
            vin: vehicle.vin().to_string(),
            nickname: vehicle.nickname().unwrap_or("-").to_string(),
            model: vehicle.model().unwrap_or("-").to_string(),
            mileage: distance(vehicle.mileage()),
            range: distance(vehicle.range()),
            outside_temperature: format_value(
                vehicle.outside_temperature(),
                1,
                units.temperature_unit(),
            ),
            last_updated: vehicle
                .last_updated()
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "never".to_string()),
        }
    }
}

fn format_value(value: Option<f64>, precision: usize, unit: &str) -> String {
    match value {
        Some(v) => format!("{:.*} {}", precision, v, unit),
        None => "-".to_string(),
    }
}
