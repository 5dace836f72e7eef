//! Honk and flash commands

use vconnect_core::HonkFlashMode;
use vconnect_session::ConnectSession;

use crate::output::OutputContext;

pub async fn honk(session: &ConnectSession, vin: &str, duration: u32, ctx: &OutputContext) -> bool {
    signal(session, vin, HonkFlashMode::Honk, duration, ctx).await
}

pub async fn flash(session: &ConnectSession, vin: &str, duration: u32, ctx: &OutputContext) -> bool {
    signal(session, vin, HonkFlashMode::Flash, duration, ctx).await
}

async fn signal(
    session: &ConnectSession,
    vin: &str,
    mode: HonkFlashMode,
    duration: u32,
    ctx: &OutputContext,
) -> bool {
    ctx.outcome(
        session.set_honk_flash(vin, mode, duration).await,
        &format!("{} for {}s requested", mode, duration),
        &format!("{} request failed", mode),
    )
}
