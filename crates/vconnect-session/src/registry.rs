//! Registry of vehicles discovered for the account

use std::collections::HashMap;

use tracing::warn;

use crate::vehicle::Vehicle;

/// Vehicles in discovery order, plus the subset registered by VIN.
///
/// A vehicle is *discovered* when it appears in the account listing and
/// *registered* once its first update has been processed. Keys are
/// lowercase VINs; each key maps to at most one vehicle.
#[derive(Debug, Default)]
pub struct VehicleRegistry {
    discovered: Vec<Vehicle>,
    registered: HashMap<String, usize>,
}

impl VehicleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a listing has populated the registry
    pub fn is_discovered(&self) -> bool {
        !self.discovered.is_empty()
    }

    /// Replace all vehicles with a fresh listing and clear registrations.
    ///
    /// Repeated VINs keep their first occurrence.
    pub fn replace_discovered(&mut self, vehicles: Vec<Vehicle>) {
        self.registered.clear();
        self.discovered.clear();

        for vehicle in vehicles {
            let key = vehicle.key();
            if self.discovered.iter().any(|v| v.key() == key) {
                warn!(vin = %vehicle.vin(), "Duplicate vehicle in listing, ignoring");
                continue;
            }
            self.discovered.push(vehicle);
        }
    }

    /// Number of discovered vehicles
    pub fn discovered_len(&self) -> usize {
        self.discovered.len()
    }

    pub(crate) fn discovered_at(&self, index: usize) -> &Vehicle {
        &self.discovered[index]
    }

    pub(crate) fn discovered_at_mut(&mut self, index: usize) -> &mut Vehicle {
        &mut self.discovered[index]
    }

    /// Mark the discovered vehicle at `index` as registered
    pub(crate) fn register(&mut self, index: usize) {
        let key = self.discovered[index].key();
        self.registered.insert(key, index);
    }

    pub fn is_registered(&self, key: &str) -> bool {
        self.registered.contains_key(key)
    }

    /// Number of registered vehicles
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }

    /// Look up a registered vehicle (case-insensitive)
    pub fn get(&self, vin: &str) -> Option<&Vehicle> {
        let index = self.registered.get(&vconnect_core::canonical_vin(vin))?;
        self.discovered.get(*index)
    }

    /// Registered vehicles in discovery order
    pub fn vehicles(&self) -> impl Iterator<Item = &Vehicle> + '_ {
        self.discovered
            .iter()
            .filter(|v| self.registered.contains_key(&v.key()))
    }

    /// VINs of registered vehicles, as reported by the service
    pub fn registered_vins(&self) -> Vec<String> {
        self.vehicles().map(|v| v.vin().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vconnect_core::{UnitSystem, VehicleDescriptor};

    fn vehicles(vins: &[&str]) -> Vec<Vehicle> {
        vins.iter()
            .filter_map(|vin| Vehicle::new(VehicleDescriptor::new(*vin), UnitSystem::Metric))
            .collect()
    }

    #[test]
    fn test_empty_registry() {
        let registry = VehicleRegistry::new();
        assert!(!registry.is_discovered());
        assert!(registry.is_empty());
        assert!(registry.get("VIN1").is_none());
    }

    #[test]
    fn test_discovery_keeps_order_and_dedupes() {
        let mut registry = VehicleRegistry::new();
        registry.replace_discovered(vehicles(&["VIN1", "VIN2", "vin1"]));

        assert!(registry.is_discovered());
        assert_eq!(registry.discovered_len(), 2);
        assert_eq!(registry.discovered_at(0).vin(), "VIN1");
        assert_eq!(registry.discovered_at(1).vin(), "VIN2");
        // Nothing registered until processed
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_and_lookup_case_insensitive() {
        let mut registry = VehicleRegistry::new();
        registry.replace_discovered(vehicles(&["VIN1", "VIN2"]));
        registry.register(1);
        registry.register(1);

        assert_eq!(registry.len(), 1);
        assert!(registry.is_registered("vin2"));
        assert!(!registry.is_registered("vin1"));
        assert_eq!(registry.get("Vin2").map(|v| v.vin()), Some("VIN2"));
        assert_eq!(registry.registered_vins(), vec!["VIN2".to_string()]);
    }

    #[test]
    fn test_vehicles_in_discovery_order() {
        let mut registry = VehicleRegistry::new();
        registry.replace_discovered(vehicles(&["A", "B", "C"]));
        registry.register(2);
        registry.register(0);

        assert_eq!(registry.registered_vins(), vec!["A", "C"]);
    }

    #[test]
    fn test_replace_clears_registrations() {
        let mut registry = VehicleRegistry::new();
        registry.replace_discovered(vehicles(&["A"]));
        registry.register(0);
        registry.replace_discovered(vehicles(&["B"]));

        assert!(registry.is_empty());
        assert_eq!(registry.discovered_len(), 1);
    }
}
