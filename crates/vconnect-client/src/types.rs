//! Request and response bodies of the REST API

use serde::{Deserialize, Serialize};
use vconnect_core::{HeaterSource, HonkFlashMode};

// =============================================================================
// Authentication
// =============================================================================

/// `POST /auth/login` request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub country: String,
}

/// `POST /auth/login` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
}

/// Error body returned with non-success responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// =============================================================================
// Commands
// =============================================================================

/// `POST /vehicles/{vin}/lock`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockRequest {
    pub lock: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spin: Option<String>,
}

/// Body for plain on/off commands (charger, window heating)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivateRequest {
    pub activate: bool,
}

/// `POST /vehicles/{vin}/climatisation`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimatisationRequest {
    pub activate: bool,
    pub heater_source: HeaterSource,
}

/// `POST /vehicles/{vin}/pre-heater` and `/ventilation`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedRequest {
    pub activate: bool,
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spin: Option<String>,
}

/// `POST /vehicles/{vin}/honk-flash`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HonkFlashRequest {
    pub mode: HonkFlashMode,
    pub duration_secs: u32,
}

/// `PUT /vehicles/{vin}/charger/max-current`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxCurrentRequest {
    pub amps: u8,
}

/// `PUT /vehicles/{vin}/climatisation/temperature`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRequest {
    pub celsius: f64,
    pub heater_source: HeaterSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_request_omits_missing_spin() {
        let body = serde_json::to_value(LockRequest {
            lock: true,
            spin: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "lock": true }));
    }

    #[test]
    fn test_climatisation_request_serialization() {
        let body = serde_json::to_value(ClimatisationRequest {
            activate: true,
            heater_source: HeaterSource::Electric,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "activate": true, "heater_source": "electric" })
        );
    }

    #[test]
    fn test_login_response_without_expiry() {
        let resp: LoginResponse = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(resp.access_token, "abc");
        assert!(resp.expires_in.is_none());
    }
}
