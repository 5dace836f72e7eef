//! Lock command

use vconnect_session::ConnectSession;

use crate::output::OutputContext;

/// Lock or unlock the vehicle
pub async fn lock(session: &ConnectSession, vin: &str, lock: bool, ctx: &OutputContext) -> bool {
    let action = if lock { "Lock" } else { "Unlock" };
    ctx.outcome(
        session.switch_lock(vin, lock).await,
        &format!("{} request sent to {}", action, vin),
        &format!("{} request for {} failed", action, vin),
    )
}
