//! Vehicle commands and their dispatch

use tracing::{debug, error, info};
use vconnect_core::{
    HeaterSource, HonkFlashMode, ServiceResult, VehicleService, DEFAULT_MAX_CHARGE_CURRENT,
};

use crate::config::ControlSettings;
use crate::connect::ConnectSession;

/// An actuation request for one vehicle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VehicleCommand {
    Lock(bool),
    Climatisation {
        activate: bool,
        heater_source: HeaterSource,
    },
    Charger(bool),
    WindowHeating(bool),
    PreHeater {
        activate: bool,
        duration_minutes: u32,
    },
    Ventilation {
        activate: bool,
        duration_minutes: u32,
    },
    HonkFlash {
        mode: HonkFlashMode,
        duration_secs: u32,
    },
    MaxChargeCurrent(u8),
    ClimatisationTemperature {
        celsius: f64,
        source: HeaterSource,
    },
}

fn start_stop(activate: bool) -> &'static str {
    if activate {
        "start"
    } else {
        "stop"
    }
}

fn started_stopped(activate: bool) -> &'static str {
    if activate {
        "started"
    } else {
        "stopped"
    }
}

impl VehicleCommand {
    /// What is being attempted, e.g. "start climatisation"
    pub fn action(&self) -> String {
        match self {
            VehicleCommand::Lock(true) => "lock".into(),
            VehicleCommand::Lock(false) => "unlock".into(),
            VehicleCommand::Climatisation {
                activate,
                heater_source,
            } => format!(
                "{} climatisation ({})",
                start_stop(*activate),
                heater_source
            ),
            VehicleCommand::Charger(activate) => format!("{} charger", start_stop(*activate)),
            VehicleCommand::WindowHeating(activate) => {
                format!("{} window heating", start_stop(*activate))
            }
            VehicleCommand::PreHeater { activate, .. } => {
                format!("{} pre-heater", start_stop(*activate))
            }
            VehicleCommand::Ventilation { activate, .. } => {
                format!("{} ventilation", start_stop(*activate))
            }
            VehicleCommand::HonkFlash {
                mode,
                duration_secs,
            } => format!("{} for {}s", mode, duration_secs),
            VehicleCommand::MaxChargeCurrent(amps) => {
                format!("set max charge current to {} A", amps)
            }
            VehicleCommand::ClimatisationTemperature { celsius, source } => {
                format!("set climatisation to {:.1} °C ({})", celsius, source)
            }
        }
    }

    /// Past-tense description used once the command succeeded
    pub fn outcome(&self) -> String {
        match self {
            VehicleCommand::Lock(true) => "locked".into(),
            VehicleCommand::Lock(false) => "unlocked".into(),
            VehicleCommand::Climatisation { activate, .. } => {
                format!("{} climatisation", started_stopped(*activate))
            }
            VehicleCommand::Charger(activate) => {
                format!("{} charger", started_stopped(*activate))
            }
            VehicleCommand::WindowHeating(activate) => {
                format!("{} window heating", started_stopped(*activate))
            }
            VehicleCommand::PreHeater { activate, .. } => {
                format!("{} pre-heater", started_stopped(*activate))
            }
            VehicleCommand::Ventilation { activate, .. } => {
                format!("{} ventilation", started_stopped(*activate))
            }
            VehicleCommand::HonkFlash { mode, .. } => match mode {
                HonkFlashMode::Honk => "honked".into(),
                HonkFlashMode::Flash => "flashed".into(),
            },
            VehicleCommand::MaxChargeCurrent(amps) => {
                format!("set max charge current to {} A", amps)
            }
            VehicleCommand::ClimatisationTemperature { celsius, .. } => {
                format!("set climatisation to {:.1} °C", celsius)
            }
        }
    }

    /// Send this command to the matching service operation
    pub async fn send(&self, service: &dyn VehicleService, vin: &str) -> ServiceResult<()> {
        match *self {
            VehicleCommand::Lock(lock) => service.set_lock(vin, lock).await,
            VehicleCommand::Climatisation {
                activate,
                heater_source,
            } => {
                service
                    .set_climatisation(vin, activate, heater_source)
                    .await
            }
            VehicleCommand::Charger(activate) => service.set_charger(vin, activate).await,
            VehicleCommand::WindowHeating(activate) => {
                service.set_window_heating(vin, activate).await
            }
            VehicleCommand::PreHeater {
                activate,
                duration_minutes,
            } => {
                service
                    .set_pre_heater(vin, activate, duration_minutes)
                    .await
            }
            VehicleCommand::Ventilation {
                activate,
                duration_minutes,
            } => {
                service
                    .set_ventilation(vin, activate, duration_minutes)
                    .await
            }
            VehicleCommand::HonkFlash {
                mode,
                duration_secs,
            } => service.set_honk_flash(vin, mode, duration_secs).await,
            VehicleCommand::MaxChargeCurrent(amps) => {
                service.set_charger_max_current(vin, amps).await
            }
            VehicleCommand::ClimatisationTemperature { celsius, source } => {
                service
                    .set_climatisation_temperature(vin, celsius, source)
                    .await
            }
        }
    }
}

impl ConnectSession {
    /// Log in if needed, send `command` and report whether it was accepted.
    ///
    /// Failures are logged and not retried.
    pub async fn run_command(&self, vin: &str, command: VehicleCommand) -> bool {
        if !self.login().await {
            return false;
        }

        let action = command.action();
        debug!(vin = %vin, "Sending command to {} to vehicle", action);

        match command.send(self.service.as_ref(), vin).await {
            Ok(()) => {
                info!(vin = %vin, "Successfully {} vehicle", command.outcome());
                true
            }
            Err(e) => {
                error!(vin = %vin, error = %e, "Unable to {}", action);
                false
            }
        }
    }

    pub async fn switch_lock(&self, vin: &str, lock: bool) -> bool {
        self.run_command(vin, VehicleCommand::Lock(lock)).await
    }

    /// Start or stop climatisation using the current heater source
    pub async fn switch_climatisation(&self, vin: &str, activate: bool) -> bool {
        let heater_source = self.control_settings().heater_source;
        self.run_command(
            vin,
            VehicleCommand::Climatisation {
                activate,
                heater_source,
            },
        )
        .await
    }

    pub async fn switch_charger(&self, vin: &str, activate: bool) -> bool {
        self.run_command(vin, VehicleCommand::Charger(activate))
            .await
    }

    pub async fn switch_window_heating(&self, vin: &str, activate: bool) -> bool {
        self.run_command(vin, VehicleCommand::WindowHeating(activate))
            .await
    }

    /// Start or stop the pre-heater for the current control duration
    pub async fn switch_pre_heater(&self, vin: &str, activate: bool) -> bool {
        let duration_minutes = self.control_settings().control_duration_minutes;
        self.run_command(
            vin,
            VehicleCommand::PreHeater {
                activate,
                duration_minutes,
            },
        )
        .await
    }

    /// Start or stop ventilation for the current control duration
    pub async fn switch_ventilation(&self, vin: &str, activate: bool) -> bool {
        let duration_minutes = self.control_settings().control_duration_minutes;
        self.run_command(
            vin,
            VehicleCommand::Ventilation {
                activate,
                duration_minutes,
            },
        )
        .await
    }

    pub async fn set_honk_flash(&self, vin: &str, mode: HonkFlashMode, duration_secs: u32) -> bool {
        self.run_command(
            vin,
            VehicleCommand::HonkFlash {
                mode,
                duration_secs,
            },
        )
        .await
    }

    /// Set the charger current limit; `None` applies [`DEFAULT_MAX_CHARGE_CURRENT`]
    pub async fn set_charger_max_current(&self, vin: &str, amps: Option<u8>) -> bool {
        let amps = amps.unwrap_or(DEFAULT_MAX_CHARGE_CURRENT);
        self.run_command(vin, VehicleCommand::MaxChargeCurrent(amps))
            .await
    }

    pub async fn set_climatisation_temperature(
        &self,
        vin: &str,
        celsius: f64,
        source: HeaterSource,
    ) -> bool {
        self.run_command(
            vin,
            VehicleCommand::ClimatisationTemperature { celsius, source },
        )
        .await
    }

    /// Heater source for later climatisation commands. No remote call.
    pub fn set_heater_source(&self, source: HeaterSource) {
        self.settings.write().heater_source = source;
    }

    /// Run time for later ventilation / pre-heater commands. No remote call.
    pub fn set_control_duration(&self, minutes: u32) {
        self.settings.write().control_duration_minutes = minutes;
    }

    pub fn control_settings(&self) -> ControlSettings {
        *self.settings.read()
    }
}
