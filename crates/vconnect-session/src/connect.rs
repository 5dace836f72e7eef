//! Session orchestrator: login, vehicle discovery and bulk update

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use vconnect_core::{canonical_vin, Authenticator, ServiceResult, UnitSystem, VehicleService};

use crate::config::{ConnectConfig, ControlSettings};
use crate::refresh::ExclusionSet;
use crate::registry::VehicleRegistry;
use crate::session::{SessionManager, SessionState};
use crate::vehicle::{FetchPolicy, Vehicle};

/// Connected-vehicle session for one account.
///
/// All public operations take `&self` and report success as `bool`.
/// Concurrent updates run one after another. Each vehicle is fetched on a
/// copy and written back afterwards, so readers of the registry never wait
/// on a fetch or its retry delays.
pub struct ConnectSession {
    pub(crate) service: Arc<dyn VehicleService>,
    pub(crate) session: SessionManager,
    registry: RwLock<VehicleRegistry>,
    update_lock: Mutex<()>,
    pub(crate) excluded_refresh: ExclusionSet,
    pub(crate) settings: RwLock<ControlSettings>,
    fetch_policy: FetchPolicy,
    unit_system: UnitSystem,
    register_on_fetch_error: bool,
}

impl ConnectSession {
    pub fn new(
        config: &ConnectConfig,
        authenticator: Arc<dyn Authenticator>,
        service: Arc<dyn VehicleService>,
    ) -> Self {
        Self {
            service,
            session: SessionManager::new(authenticator, config.credentials()),
            registry: RwLock::new(VehicleRegistry::new()),
            update_lock: Mutex::new(()),
            excluded_refresh: ExclusionSet::new(),
            settings: RwLock::new(config.control_settings()),
            fetch_policy: config.fetch_policy(),
            unit_system: config.unit_system,
            register_on_fetch_error: config.register_on_fetch_error,
        }
    }

    /// Log in unless already authenticated
    pub async fn login(&self) -> bool {
        self.session.ensure_logged_in().await
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    /// Registered vehicles in discovery order
    pub async fn vehicles(&self) -> Vec<Vehicle> {
        self.registry.read().vehicles().cloned().collect()
    }

    /// Look up a registered vehicle (case-insensitive)
    pub async fn vehicle(&self, vin: &str) -> Option<Vehicle> {
        self.registry.read().get(vin).cloned()
    }

    /// VINs of registered vehicles
    pub async fn vins(&self) -> Vec<String> {
        self.registry.read().registered_vins()
    }

    /// Update all vehicles, or only those in `vin_filter` (case-insensitive).
    ///
    /// The first successful call discovers the account's vehicles; later
    /// calls refresh the known ones in discovery order. Any failure that
    /// escapes the per-vehicle policy forces a new login on the next call.
    pub async fn update(&self, vin_filter: Option<&[String]>) -> bool {
        if !self.login().await {
            return false;
        }

        let filter: Option<HashSet<String>> =
            vin_filter.map(|vins| vins.iter().map(|vin| canonical_vin(vin)).collect());

        let _updating = self.update_lock.lock().await;
        match self.update_vehicles(filter.as_ref()).await {
            Ok(updated) => updated,
            Err(e) => {
                self.session.invalidate();
                error!(error = %e, "Vehicle update failed, forcing re-login");
                false
            }
        }
    }

    async fn update_vehicles(&self, filter: Option<&HashSet<String>>) -> ServiceResult<bool> {
        if !self.registry.read().is_discovered() {
            let listing = self.service.list_vehicles().await?;
            let Some(descriptors) = listing.user_vehicles else {
                warn!("Vehicle listing has no userVehicles collection");
                return Ok(false);
            };

            let vehicles: Vec<Vehicle> = descriptors
                .into_iter()
                .filter_map(|d| Vehicle::new(d, self.unit_system))
                .collect();
            let mut registry = self.registry.write();
            registry.replace_discovered(vehicles);
            info!(count = registry.discovered_len(), "Discovered vehicles");
        }

        let count = self.registry.read().discovered_len();
        for index in 0..count {
            self.add_or_update_vehicle(index, filter).await?;
        }

        Ok(true)
    }

    /// Fetch one discovered vehicle. Only `update` rewrites the discovered
    /// list, and it holds the update lock, so `index` stays valid.
    async fn add_or_update_vehicle(
        &self,
        index: usize,
        filter: Option<&HashSet<String>>,
    ) -> ServiceResult<()> {
        let (mut vehicle, known) = {
            let registry = self.registry.read();
            let vehicle = registry.discovered_at(index).clone();
            let known = registry.is_registered(&vehicle.key());
            (vehicle, known)
        };

        if let Some(filter) = filter {
            if !filter.contains(&vehicle.key()) {
                debug!(vin = %vehicle.vin(), "Vehicle not in filter, skipping");
                return Ok(());
            }
        }

        let fetched = vehicle
            .fetch_data(self.service.as_ref(), self.fetch_policy)
            .await;

        let register = if known {
            if let Ok(false) = fetched {
                warn!(vin = %vehicle.vin(), "Vehicle data unavailable, forcing re-login");
                self.session.invalidate();
            }
            false
        } else {
            match &fetched {
                Ok(true) => true,
                Ok(false) => {
                    warn!(vin = %vehicle.vin(), "Vehicle data unavailable, forcing re-login");
                    self.session.invalidate();
                    true
                }
                Err(e) => {
                    debug!(vin = %vehicle.vin(), error = %e, "First fetch of new vehicle failed");
                    self.register_on_fetch_error
                }
            }
        };

        let mut registry = self.registry.write();
        *registry.discovered_at_mut(index) = vehicle;
        if register {
            info!(vin = %registry.discovered_at(index).vin(), "Registered vehicle");
            registry.register(index);
        }
        drop(registry);

        if known {
            fetched?;
        }
        Ok(())
    }
}
