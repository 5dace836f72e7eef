//! Status and refresh commands

use anyhow::Result;
use vconnect_session::ConnectSession;

use crate::output::{OutputContext, VehicleRow};

/// Sync the account's vehicles and print them
pub async fn status(session: &ConnectSession, vins: &[String], ctx: &OutputContext) -> Result<bool> {
    let filter = (!vins.is_empty()).then_some(vins);
    if !session.update(filter).await {
        ctx.error("Vehicle update failed");
        return Ok(false);
    }

    let rows: Vec<VehicleRow> = session
        .vehicles()
        .await
        .iter()
        .map(VehicleRow::from)
        .collect();

    ctx.print(&rows);
    Ok(true)
}

/// Ask the service to pull fresh data from one vehicle, or all of them
pub async fn refresh(session: &ConnectSession, vin: Option<&str>, ctx: &OutputContext) -> bool {
    match vin {
        Some(vin) => {
            ctx.info(&format!("Requesting data refresh for {}...", vin));
            ctx.outcome(
                session.refresh_vehicle_data(vin).await,
                "Refresh requested",
                "Refresh failed",
            )
        }
        None => {
            if !session.update(None).await {
                ctx.error("Vehicle update failed");
                return false;
            }
            ctx.outcome(
                session.refresh_vehicles().await,
                "Refresh requested for all vehicles",
                "Refresh failed, login rejected",
            )
        }
    }
}
