//! Scriptable collaborators for unit tests

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use vconnect_core::{
    canonical_vin, Authenticator, HeaterSource, HonkFlashMode, ServiceError, ServiceResult,
    VehicleDescriptor, VehicleList, VehicleService,
};

/// Authenticator that succeeds unless a scripted result says otherwise
#[derive(Default)]
pub struct MockAuthenticator {
    calls: AtomicUsize,
    results: Mutex<VecDeque<ServiceResult<bool>>>,
    last_credentials: Mutex<Option<(String, String, String)>>,
}

impl MockAuthenticator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result of the next authenticate call
    pub fn push_result(&self, result: ServiceResult<bool>) {
        self.results.lock().push_back(result);
    }

    /// Reject every login until results are queued again
    pub fn reject_all(&self) {
        let mut results = self.results.lock();
        results.clear();
        results.extend((0..64).map(|_| Ok(false)));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_credentials(&self) -> Option<(String, String, String)> {
        self.last_credentials.lock().clone()
    }
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
        country: &str,
    ) -> ServiceResult<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_credentials.lock() =
            Some((username.into(), password.into(), country.into()));
        self.results.lock().pop_front().unwrap_or(Ok(true))
    }
}

/// Vehicle service with per-VIN scripted responses and a call log.
///
/// Unscripted calls succeed; data fetches return a small default payload.
pub struct MockService {
    listing: Mutex<ServiceResult<VehicleList>>,
    data: Mutex<HashMap<String, VecDeque<ServiceResult<serde_json::Value>>>>,
    refresh: Mutex<HashMap<String, VecDeque<ServiceResult<()>>>>,
    command_error: Mutex<Option<ServiceError>>,
    calls: Mutex<Vec<String>>,
}

impl MockService {
    pub fn new(vins: &[&str]) -> Self {
        let vehicles = vins.iter().map(|vin| VehicleDescriptor::new(*vin)).collect();
        Self::with_listing(Ok(VehicleList::new(vehicles)))
    }

    pub fn with_listing(listing: ServiceResult<VehicleList>) -> Self {
        Self {
            listing: Mutex::new(listing),
            data: Mutex::new(HashMap::new()),
            refresh: Mutex::new(HashMap::new()),
            command_error: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn push_data(&self, vin: &str, result: ServiceResult<serde_json::Value>) {
        self.data
            .lock()
            .entry(canonical_vin(vin))
            .or_default()
            .push_back(result);
    }

    pub fn push_refresh(&self, vin: &str, result: ServiceResult<()>) {
        self.refresh
            .lock()
            .entry(canonical_vin(vin))
            .or_default()
            .push_back(result);
    }

    pub fn fail_commands(&self, error: ServiceError) {
        *self.command_error.lock() = Some(error);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    fn record(&self, call: String) {
        self.calls.lock().push(call);
    }

    fn command(&self, call: String) -> ServiceResult<()> {
        self.record(call);
        match self.command_error.lock().clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl VehicleService for MockService {
    async fn list_vehicles(&self) -> ServiceResult<VehicleList> {
        self.record("list_vehicles".into());
        self.listing.lock().clone()
    }

    async fn vehicle_data(&self, vin: &str) -> ServiceResult<serde_json::Value> {
        self.record(format!("data:{}", vin));
        self.data
            .lock()
            .get_mut(&canonical_vin(vin))
            .and_then(|queue| queue.pop_front())
            .unwrap_or_else(|| Ok(json!({ "mileage": 1000.0 })))
    }

    async fn refresh_vehicle_data(&self, vin: &str) -> ServiceResult<()> {
        self.record(format!("refresh:{}", vin));
        self.refresh
            .lock()
            .get_mut(&canonical_vin(vin))
            .and_then(|queue| queue.pop_front())
            .unwrap_or(Ok(()))
    }

    async fn set_lock(&self, vin: &str, lock: bool) -> ServiceResult<()> {
        self.command(format!("lock:{}:{}", vin, lock))
    }

    async fn set_climatisation(
        &self,
        vin: &str,
        activate: bool,
        heater_source: HeaterSource,
    ) -> ServiceResult<()> {
        self.command(format!("climatisation:{}:{}:{}", vin, activate, heater_source))
    }

    async fn set_charger(&self, vin: &str, activate: bool) -> ServiceResult<()> {
        self.command(format!("charger:{}:{}", vin, activate))
    }

    async fn set_window_heating(&self, vin: &str, activate: bool) -> ServiceResult<()> {
        self.command(format!("window_heating:{}:{}", vin, activate))
    }

    async fn set_pre_heater(
        &self,
        vin: &str,
        activate: bool,
        duration_minutes: u32,
    ) -> ServiceResult<()> {
        self.command(format!(
            "pre_heater:{}:{}:{}",
            vin, activate, duration_minutes
        ))
    }

    async fn set_ventilation(
        &self,
        vin: &str,
        activate: bool,
        duration_minutes: u32,
    ) -> ServiceResult<()> {
        self.command(format!(
            "ventilation:{}:{}:{}",
            vin, activate, duration_minutes
        ))
    }

    async fn set_honk_flash(
        &self,
        vin: &str,
        mode: HonkFlashMode,
        duration_secs: u32,
    ) -> ServiceResult<()> {
        self.command(format!("honk_flash:{}:{}:{}", vin, mode, duration_secs))
    }

    async fn set_charger_max_current(&self, vin: &str, amps: u8) -> ServiceResult<()> {
        self.command(format!("max_current:{}:{}", vin, amps))
    }

    async fn set_climatisation_temperature(
        &self,
        vin: &str,
        celsius: f64,
        source: HeaterSource,
    ) -> ServiceResult<()> {
        self.command(format!("climate_temp:{}:{}:{}", vin, celsius, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_authenticator_accepts() {
        let auth = MockAuthenticator::default();

        assert!(auth.authenticate("u", "p", "DE").await.unwrap());
        assert_eq!(auth.calls(), 1);
        assert_eq!(
            auth.last_credentials(),
            Some(("u".to_string(), "p".to_string(), "DE".to_string()))
        );
    }
}
