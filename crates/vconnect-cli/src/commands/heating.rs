//! Window heating, pre-heater and ventilation commands

use vconnect_session::ConnectSession;

use crate::output::OutputContext;
use crate::Switch;

pub async fn window_heating(
    session: &ConnectSession,
    vin: &str,
    state: Switch,
    ctx: &OutputContext,
) -> bool {
    ctx.outcome(
        session.switch_window_heating(vin, state.is_on()).await,
        &format!("Window heating switched {:?}", state).to_lowercase(),
        "Window heating request failed",
    )
}

/// Switch the pre-heater; `duration` replaces the session's run time
pub async fn pre_heater(
    session: &ConnectSession,
    vin: &str,
    state: Switch,
    duration: Option<u32>,
    ctx: &OutputContext,
) -> bool {
    if let Some(minutes) = duration {
        session.set_control_duration(minutes);
    }
    ctx.outcome(
        session.switch_pre_heater(vin, state.is_on()).await,
        &format!("Pre-heater switched {:?}", state).to_lowercase(),
        "Pre-heater request failed",
    )
}

/// Switch ventilation; `duration` replaces the session's run time
pub async fn ventilation(
    session: &ConnectSession,
    vin: &str,
    state: Switch,
    duration: Option<u32>,
    ctx: &OutputContext,
) -> bool {
    if let Some(minutes) = duration {
        session.set_control_duration(minutes);
    }
    ctx.outcome(
        session.switch_ventilation(vin, state.is_on()).await,
        &format!("Ventilation switched {:?}", state).to_lowercase(),
        "Ventilation request failed",
    )
}
