//! Climatisation command

use vconnect_core::HeaterSource;
use vconnect_session::ConnectSession;

use crate::output::OutputContext;
use crate::Switch;

/// Start or stop climatisation, optionally setting the target temperature first
pub async fn climate(
    session: &ConnectSession,
    vin: &str,
    state: Switch,
    temperature: Option<f64>,
    source: Option<HeaterSource>,
    ctx: &OutputContext,
) -> bool {
    if let Some(source) = source {
        session.set_heater_source(source);
    }

    if let Some(celsius) = temperature {
        let source = session.control_settings().heater_source;
        if !session.set_climatisation_temperature(vin, celsius, source).await {
            ctx.error(&format!("Setting target temperature {} °C failed", celsius));
            return false;
        }
        ctx.info(&format!("Target temperature set to {} °C", celsius));
    }

    ctx.outcome(
        session.switch_climatisation(vin, state.is_on()).await,
        &format!("Climatisation switched {:?}", state).to_lowercase(),
        "Climatisation request failed",
    )
}
