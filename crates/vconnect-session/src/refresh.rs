//! On-demand vehicle refresh with exclusion and re-login policy

use std::collections::HashSet;

use parking_lot::RwLock;
use tracing::{debug, error};
use vconnect_core::{canonical_vin, FailureKind};

use crate::connect::ConnectSession;

/// VINs whose remote refresh is known to be unsupported.
///
/// Entries are never removed for the lifetime of the set.
#[derive(Debug, Default)]
pub struct ExclusionSet {
    vins: RwLock<HashSet<String>>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, vin: &str) -> bool {
        self.vins.read().contains(&canonical_vin(vin))
    }

    /// Returns `true` if the VIN was not excluded before
    pub fn insert(&self, vin: &str) -> bool {
        self.vins.write().insert(canonical_vin(vin))
    }

    pub fn len(&self) -> usize {
        self.vins.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.vins.read().is_empty()
    }
}

impl ConnectSession {
    /// Ask the service to pull fresh data from one vehicle.
    ///
    /// Vehicles answering 403/502 are excluded from further refreshes. A 401
    /// triggers one re-login and exactly one retry.
    pub async fn refresh_vehicle_data(&self, vin: &str) -> bool {
        if !self.login().await {
            return false;
        }

        if self.excluded_refresh.contains(vin) {
            debug!(vin = %vin, "Refresh not supported by vehicle, skipping");
            return false;
        }

        debug!(vin = %vin, "Sending command to refresh data to vehicle");
        let error = match self.service.refresh_vehicle_data(vin).await {
            Ok(()) => {
                debug!(vin = %vin, "Successfully refreshed data of vehicle");
                return true;
            }
            Err(e) => e,
        };

        match error.kind() {
            FailureKind::Unsupported => {
                debug!(vin = %vin, status = ?error.status_code(), "Refresh vehicle not supported");
                self.excluded_refresh.insert(vin);
                false
            }
            FailureKind::Unauthorized => self.refresh_after_login(vin).await,
            FailureKind::Transport | FailureKind::Other => {
                error!(vin = %vin, error = %error, "Unable to refresh vehicle data");
                false
            }
        }
    }

    async fn refresh_after_login(&self, vin: &str) -> bool {
        debug!(vin = %vin, "Request unauthorized, logging in again and retrying refresh");
        self.session.invalidate();

        if !self.login().await {
            error!(vin = %vin, "Unable to refresh vehicle data, login failed");
            return false;
        }

        match self.service.refresh_vehicle_data(vin).await {
            Ok(()) => {
                debug!(vin = %vin, "Successfully refreshed data of vehicle after login");
                true
            }
            Err(e) => {
                error!(
                    vin = %vin,
                    error = %e,
                    "Unable to refresh vehicle data, despite trying again"
                );
                false
            }
        }
    }

    /// Refresh every registered vehicle; individual failures are ignored
    pub async fn refresh_vehicles(&self) -> bool {
        if !self.login().await {
            return false;
        }

        for vin in self.vins().await {
            self.refresh_vehicle_data(&vin).await;
        }

        true
    }

    /// Whether refresh has been disabled for this VIN
    pub fn is_refresh_excluded(&self, vin: &str) -> bool {
        self.excluded_refresh.contains(vin)
    }
}
