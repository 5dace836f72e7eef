//! `Authenticator` and `VehicleService` over the REST client

use async_trait::async_trait;
use vconnect_core::{
    Authenticator, HeaterSource, HonkFlashMode, ServiceResult, VehicleList, VehicleService,
};

use crate::client::ConnectClient;

#[async_trait]
impl Authenticator for ConnectClient {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
        country: &str,
    ) -> ServiceResult<bool> {
        Ok(self.login(username, password, country).await?)
    }
}

#[async_trait]
impl VehicleService for ConnectClient {
    async fn list_vehicles(&self) -> ServiceResult<VehicleList> {
        Ok(ConnectClient::list_vehicles(self).await?)
    }

    async fn vehicle_data(&self, vin: &str) -> ServiceResult<serde_json::Value> {
        Ok(self.vehicle_status(vin).await?)
    }

    async fn refresh_vehicle_data(&self, vin: &str) -> ServiceResult<()> {
        Ok(self.refresh(vin).await?)
    }

    async fn set_lock(&self, vin: &str, lock: bool) -> ServiceResult<()> {
        Ok(self.lock(vin, lock).await?)
    }

    async fn set_climatisation(
        &self,
        vin: &str,
        activate: bool,
        heater_source: HeaterSource,
    ) -> ServiceResult<()> {
        Ok(self.climatisation(vin, activate, heater_source).await?)
    }

    async fn set_charger(&self, vin: &str, activate: bool) -> ServiceResult<()> {
        Ok(self.charger(vin, activate).await?)
    }

    async fn set_window_heating(&self, vin: &str, activate: bool) -> ServiceResult<()> {
        Ok(self.window_heating(vin, activate).await?)
    }

    async fn set_pre_heater(
        &self,
        vin: &str,
        activate: bool,
        duration_minutes: u32,
    ) -> ServiceResult<()> {
        Ok(self.pre_heater(vin, activate, duration_minutes).await?)
    }

    async fn set_ventilation(
        &self,
        vin: &str,
        activate: bool,
        duration_minutes: u32,
    ) -> ServiceResult<()> {
        Ok(self.ventilation(vin, activate, duration_minutes).await?)
    }

    async fn set_honk_flash(
        &self,
        vin: &str,
        mode: HonkFlashMode,
        duration_secs: u32,
    ) -> ServiceResult<()> {
        Ok(self.honk_flash(vin, mode, duration_secs).await?)
    }

    async fn set_charger_max_current(&self, vin: &str, amps: u8) -> ServiceResult<()> {
        Ok(self.charger_max_current(vin, amps).await?)
    }

    async fn set_climatisation_temperature(
        &self,
        vin: &str,
        celsius: f64,
        source: HeaterSource,
    ) -> ServiceResult<()> {
        Ok(self.climatisation_temperature(vin, celsius, source).await?)
    }
}
