//! Wire and configuration types shared by services and the orchestrator

use serde::{Deserialize, Serialize};

/// Charge current applied when the caller does not pick one (amperes)
pub const DEFAULT_MAX_CHARGE_CURRENT: u8 = 32;

/// Canonical registry key for a VIN (case-insensitive compare)
pub fn canonical_vin(vin: &str) -> String {
    vin.trim().to_ascii_lowercase()
}

// =============================================================================
// Vehicle Listing
// =============================================================================

/// One entry of the account's vehicle listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleDescriptor {
    /// Vehicle identification number; some listings carry entries without one
    #[serde(default)]
    pub vin: Option<String>,
    /// User-assigned name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    /// Model designation reported by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl VehicleDescriptor {
    pub fn new(vin: impl Into<String>) -> Self {
        Self {
            vin: Some(vin.into()),
            nickname: None,
            model: None,
        }
    }
}

/// Vehicle listing response.
///
/// `user_vehicles` is `None` when the service omitted the collection, which
/// the orchestrator treats as a failed discovery.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VehicleList {
    #[serde(
        rename = "userVehicles",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub user_vehicles: Option<Vec<VehicleDescriptor>>,
}

impl VehicleList {
    pub fn new(vehicles: Vec<VehicleDescriptor>) -> Self {
        Self {
            user_vehicles: Some(vehicles),
        }
    }
}

// =============================================================================
// Command Parameters
// =============================================================================

/// Energy source used for climatisation / heating
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaterSource {
    Electric,
    Auxiliary,
    #[default]
    Automatic,
}

impl std::fmt::Display for HeaterSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HeaterSource::Electric => "electric",
            HeaterSource::Auxiliary => "auxiliary",
            HeaterSource::Automatic => "automatic",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for HeaterSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "electric" => Ok(HeaterSource::Electric),
            "auxiliary" => Ok(HeaterSource::Auxiliary),
            "automatic" => Ok(HeaterSource::Automatic),
            _ => Err(format!("Unknown heater source: '{}'", s)),
        }
    }
}

/// Honk/flash signalling mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HonkFlashMode {
    Honk,
    Flash,
}

impl std::fmt::Display for HonkFlashMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HonkFlashMode::Honk => f.write_str("honk"),
            HonkFlashMode::Flash => f.write_str("flash"),
        }
    }
}

// =============================================================================
// Units
// =============================================================================

/// Unit system used when presenting vehicle data.
///
/// Services report metric values; imperial is a presentation conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

const KM_PER_MILE: f64 = 1.609_344;

impl UnitSystem {
    /// Convert a distance reported in kilometres
    pub fn distance(&self, km: f64) -> f64 {
        match self {
            UnitSystem::Metric => km,
            UnitSystem::Imperial => km / KM_PER_MILE,
        }
    }

    /// Convert a temperature reported in degrees Celsius
    pub fn temperature(&self, celsius: f64) -> f64 {
        match self {
            UnitSystem::Metric => celsius,
            UnitSystem::Imperial => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    pub fn distance_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "km",
            UnitSystem::Imperial => "mi",
        }
    }

    pub fn temperature_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "°C",
            UnitSystem::Imperial => "°F",
        }
    }
}

impl std::str::FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            _ => Err(format!("Unknown unit system: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_vin() {
        assert_eq!(canonical_vin("WAUZZZ8V5KA123456"), "wauzzz8v5ka123456");
        assert_eq!(canonical_vin(" Vin123 "), "vin123");
    }

    #[test]
    fn test_vehicle_list_parsing() {
        let json = r#"{"userVehicles":[{"vin":"VIN1","nickname":"A3"},{"model":"Q4"}]}"#;
        let list: VehicleList = serde_json::from_str(json).unwrap();
        let vehicles = list.user_vehicles.unwrap();
        assert_eq!(vehicles.len(), 2);
        assert_eq!(vehicles[0].vin.as_deref(), Some("VIN1"));
        assert_eq!(vehicles[1].vin, None);
    }

    #[test]
    fn test_vehicle_list_missing_collection() {
        let list: VehicleList = serde_json::from_str(r#"{"error":"nope"}"#).unwrap();
        assert!(list.user_vehicles.is_none());
    }

    #[test]
    fn test_heater_source_roundtrip() {
        assert_eq!("Electric".parse::<HeaterSource>(), Ok(HeaterSource::Electric));
        assert_eq!(HeaterSource::Auxiliary.to_string(), "auxiliary");
        assert!("steam".parse::<HeaterSource>().is_err());
        assert_eq!(HeaterSource::default(), HeaterSource::Automatic);
    }

    #[test]
    fn test_unit_conversion() {
        let imperial = UnitSystem::Imperial;
        assert!((imperial.distance(160.9344) - 100.0).abs() < 1e-9);
        assert!((imperial.temperature(100.0) - 212.0).abs() < 1e-9);
        assert_eq!(UnitSystem::Metric.distance(42.0), 42.0);
    }
}
