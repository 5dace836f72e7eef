//! Collaborator traits consumed by the session orchestrator

use async_trait::async_trait;

use crate::error::ServiceResult;
use crate::models::{HeaterSource, HonkFlashMode, VehicleList};

/// Account authentication.
///
/// Must be safe to call while already authenticated. `Ok(false)` means the
/// credentials were rejected; `Err` means the service could not be reached.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
        country: &str,
    ) -> ServiceResult<bool>;
}

/// Remote vehicle service surface
///
/// Every call is made on behalf of the currently authenticated account. A
/// `ServiceError::Status` with status 401 signals expired authorization.
#[async_trait]
pub trait VehicleService: Send + Sync {
    // =========================================================================
    // Data
    // =========================================================================

    /// List the vehicles registered to the account
    async fn list_vehicles(&self) -> ServiceResult<VehicleList>;

    /// Read the last known data of a vehicle as held by the service
    async fn vehicle_data(&self, vin: &str) -> ServiceResult<serde_json::Value>;

    /// Ask the service to pull fresh data from the vehicle itself
    async fn refresh_vehicle_data(&self, vin: &str) -> ServiceResult<()>;

    // =========================================================================
    // Commands
    // =========================================================================

    async fn set_lock(&self, vin: &str, lock: bool) -> ServiceResult<()>;

    async fn set_climatisation(
        &self,
        vin: &str,
        activate: bool,
        heater_source: HeaterSource,
    ) -> ServiceResult<()>;

    async fn set_charger(&self, vin: &str, activate: bool) -> ServiceResult<()>;

    async fn set_window_heating(&self, vin: &str, activate: bool) -> ServiceResult<()>;

    async fn set_pre_heater(
        &self,
        vin: &str,
        activate: bool,
        duration_minutes: u32,
    ) -> ServiceResult<()>;

    async fn set_ventilation(
        &self,
        vin: &str,
        activate: bool,
        duration_minutes: u32,
    ) -> ServiceResult<()>;

    async fn set_honk_flash(
        &self,
        vin: &str,
        mode: HonkFlashMode,
        duration_secs: u32,
    ) -> ServiceResult<()>;

    async fn set_charger_max_current(&self, vin: &str, amps: u8) -> ServiceResult<()>;

    async fn set_climatisation_temperature(
        &self,
        vin: &str,
        celsius: f64,
        source: HeaterSource,
    ) -> ServiceResult<()>;
}
