//! Charger command

use vconnect_session::ConnectSession;

use crate::output::OutputContext;
use crate::Switch;

/// Start or stop charging, optionally adjusting the maximum current first
pub async fn charger(
    session: &ConnectSession,
    vin: &str,
    state: Switch,
    max_current: Option<u8>,
    ctx: &OutputContext,
) -> bool {
    if max_current.is_some() {
        if !session.set_charger_max_current(vin, max_current).await {
            ctx.error("Setting maximum charge current failed");
            return false;
        }
        ctx.info("Maximum charge current updated");
    }

    ctx.outcome(
        session.switch_charger(vin, state.is_on()).await,
        &format!("Charger switched {:?}", state).to_lowercase(),
        "Charger request failed",
    )
}
