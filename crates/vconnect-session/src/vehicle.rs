//! Per-vehicle state and data fetch

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use vconnect_core::{canonical_vin, ServiceResult, UnitSystem, VehicleDescriptor, VehicleService};

/// Retry policy for [`Vehicle::fetch_data`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Maximum number of attempts per fetch (at least one is always made)
    pub retry_budget: u32,
    /// Pause between attempts
    pub retry_delay: Duration,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            retry_budget: 3,
            retry_delay: Duration::from_secs(10),
        }
    }
}

/// A vehicle known to the session, with its last fetched data
#[derive(Debug, Clone)]
pub struct Vehicle {
    vin: String,
    descriptor: VehicleDescriptor,
    unit_system: UnitSystem,
    data: Option<serde_json::Value>,
    last_updated: Option<DateTime<Utc>>,
}

impl Vehicle {
    /// Build a vehicle from a listing entry. Entries without a VIN yield `None`.
    pub fn new(descriptor: VehicleDescriptor, unit_system: UnitSystem) -> Option<Self> {
        let vin = descriptor.vin.as_deref()?.trim();
        if vin.is_empty() {
            return None;
        }
        Some(Self {
            vin: vin.to_string(),
            descriptor,
            unit_system,
            data: None,
            last_updated: None,
        })
    }

    /// VIN as reported by the service
    pub fn vin(&self) -> &str {
        &self.vin
    }

    /// Registry key (lowercase VIN)
    pub fn key(&self) -> String {
        canonical_vin(&self.vin)
    }

    pub fn nickname(&self) -> Option<&str> {
        self.descriptor.nickname.as_deref()
    }

    pub fn model(&self) -> Option<&str> {
        self.descriptor.model.as_deref()
    }

    pub fn unit_system(&self) -> UnitSystem {
        self.unit_system
    }

    /// Raw data from the last successful fetch
    pub fn data(&self) -> Option<&serde_json::Value> {
        self.data.as_ref()
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Odometer in the configured unit system
    pub fn mileage(&self) -> Option<f64> {
        self.metric_field("mileage").map(|km| self.unit_system.distance(km))
    }

    /// Remaining range in the configured unit system
    pub fn range(&self) -> Option<f64> {
        self.metric_field("range").map(|km| self.unit_system.distance(km))
    }

    /// Outside temperature in the configured unit system
    pub fn outside_temperature(&self) -> Option<f64> {
        self.metric_field("outside_temperature")
            .map(|c| self.unit_system.temperature(c))
    }

    fn metric_field(&self, name: &str) -> Option<f64> {
        self.data.as_ref()?.get(name)?.as_f64()
    }

    /// Fetch the latest data held by the service for this vehicle.
    ///
    /// Makes up to `policy.retry_budget` attempts. Returns `Ok(true)` on the
    /// first success and `Ok(false)` once the budget is spent on error
    /// responses. Transport errors are returned immediately. Stored data is
    /// only replaced on success.
    pub async fn fetch_data(
        &mut self,
        service: &dyn VehicleService,
        policy: FetchPolicy,
    ) -> ServiceResult<bool> {
        let attempts = policy.retry_budget.max(1);

        for attempt in 1..=attempts {
            match service.vehicle_data(&self.vin).await {
                Ok(data) => {
                    self.data = Some(data);
                    self.last_updated = Some(Utc::now());
                    debug!(vin = %self.vin, attempt, "Fetched vehicle data");
                    return Ok(true);
                }
                Err(e) if e.is_transport() => return Err(e),
                Err(e) => {
                    warn!(
                        vin = %self.vin,
                        attempt,
                        attempts,
                        error = %e,
                        "Vehicle data fetch failed"
                    );
                    if attempt < attempts && !policy.retry_delay.is_zero() {
                        tokio::time::sleep(policy.retry_delay).await;
                    }
                }
            }
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockService;
    use serde_json::json;
    use vconnect_core::ServiceError;

    fn policy(retry_budget: u32) -> FetchPolicy {
        FetchPolicy {
            retry_budget,
            retry_delay: Duration::ZERO,
        }
    }

    fn vehicle(vin: &str) -> Vehicle {
        Vehicle::new(VehicleDescriptor::new(vin), UnitSystem::Metric).unwrap()
    }

    #[test]
    fn test_vehicle_without_vin_is_skipped() {
        let descriptor = VehicleDescriptor {
            vin: None,
            nickname: Some("Ghost".into()),
            model: None,
        };
        assert!(Vehicle::new(descriptor, UnitSystem::Metric).is_none());
        assert!(Vehicle::new(VehicleDescriptor::new("  "), UnitSystem::Metric).is_none());
    }

    #[test]
    fn test_key_is_lowercase() {
        let v = vehicle("WAUZZZ8V5KA123456");
        assert_eq!(v.vin(), "WAUZZZ8V5KA123456");
        assert_eq!(v.key(), "wauzzz8v5ka123456");
    }

    #[tokio::test]
    async fn test_fetch_success_stores_data() {
        let service = MockService::new(&[]);
        service.push_data("VIN1", Ok(json!({ "mileage": 12345.0, "range": 300.0 })));
        let mut v = vehicle("VIN1");

        assert!(v.fetch_data(&service, policy(3)).await.unwrap());
        assert_eq!(v.mileage(), Some(12345.0));
        assert_eq!(v.range(), Some(300.0));
        assert!(v.last_updated().is_some());
        assert_eq!(service.count("data:"), 1);
    }

    #[tokio::test]
    async fn test_fetch_retries_until_success() {
        let service = MockService::new(&[]);
        service.push_data("VIN1", Err(ServiceError::status(500, "busy")));
        service.push_data("VIN1", Err(ServiceError::status(401, "expired")));
        service.push_data("VIN1", Ok(json!({})));
        let mut v = vehicle("VIN1");

        assert!(v.fetch_data(&service, policy(3)).await.unwrap());
        assert_eq!(service.count("data:"), 3);
    }

    #[tokio::test]
    async fn test_fetch_budget_bounds_attempts() {
        let service = MockService::new(&[]);
        for _ in 0..5 {
            service.push_data("VIN1", Err(ServiceError::status(500, "busy")));
        }
        let mut v = vehicle("VIN1");

        assert!(!v.fetch_data(&service, policy(3)).await.unwrap());
        assert_eq!(service.count("data:"), 3);
        assert!(v.data().is_none());
    }

    #[tokio::test]
    async fn test_fetch_zero_budget_still_tries_once() {
        let service = MockService::new(&[]);
        let mut v = vehicle("VIN1");

        assert!(v.fetch_data(&service, policy(0)).await.unwrap());
        assert_eq!(service.count("data:"), 1);
    }

    #[tokio::test]
    async fn test_fetch_transport_error_is_returned() {
        let service = MockService::new(&[]);
        service.push_data("VIN1", Err(ServiceError::transport("reset by peer")));
        let mut v = vehicle("VIN1");

        let result = v.fetch_data(&service, policy(3)).await;
        assert!(matches!(result, Err(ServiceError::Transport(_))));
        assert_eq!(service.count("data:"), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_data() {
        let service = MockService::new(&[]);
        service.push_data("VIN1", Ok(json!({ "mileage": 10.0 })));
        service.push_data("VIN1", Err(ServiceError::status(500, "busy")));
        let mut v = vehicle("VIN1");

        assert!(v.fetch_data(&service, policy(1)).await.unwrap());
        assert!(!v.fetch_data(&service, policy(1)).await.unwrap());
        assert_eq!(v.mileage(), Some(10.0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_waits_between_attempts() {
        let service = MockService::new(&[]);
        service.push_data("VIN1", Err(ServiceError::status(500, "busy")));
        service.push_data("VIN1", Err(ServiceError::status(500, "busy")));
        let mut v = vehicle("VIN1");
        let policy = FetchPolicy {
            retry_budget: 3,
            retry_delay: Duration::from_secs(10),
        };

        let start = tokio::time::Instant::now();
        assert!(v.fetch_data(&service, policy).await.unwrap());
        assert_eq!(start.elapsed(), Duration::from_secs(20));
    }

    #[tokio::test]
    async fn test_imperial_conversion() {
        let service = MockService::new(&[]);
        service.push_data(
            "VIN1",
            Ok(json!({ "mileage": 160.9344, "outside_temperature": 20.0 })),
        );
        let mut v =
            Vehicle::new(VehicleDescriptor::new("VIN1"), UnitSystem::Imperial).unwrap();

        v.fetch_data(&service, policy(1)).await.unwrap();
        assert!((v.mileage().unwrap() - 100.0).abs() < 1e-9);
        assert!((v.outside_temperature().unwrap() - 68.0).abs() < 1e-9);
        assert_eq!(v.range(), None);
    }
}
