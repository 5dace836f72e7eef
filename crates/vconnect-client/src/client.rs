//! REST client implementation

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use tracing::{debug, instrument};
use url::Url;
use vconnect_core::{HeaterSource, HonkFlashMode, VehicleList};

use crate::error::{ClientError, Result};
use crate::types::*;

/// URL-encode a VIN for use as a path segment
fn encode_path_segment(id: &str) -> String {
    id.replace('%', "%25").replace('/', "%2F")
}

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default connection timeout
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connected-vehicle REST API client
///
/// Clones share the HTTP connection pool and the bearer token obtained by
/// [`login`](Self::login).
#[derive(Debug, Clone)]
pub struct ConnectClient {
    client: Client,
    base_url: Url,
    token: Arc<RwLock<Option<String>>>,
    spin: Option<String>,
}

impl ConnectClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the service (e.g., "https://api.example.com")
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(base_url, DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a new client with custom timeouts
    pub fn with_config(
        base_url: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        let base_url = Url::parse(base_url)?;

        Ok(Self {
            client,
            base_url,
            token: Arc::new(RwLock::new(None)),
            spin: None,
        })
    }

    /// Security PIN sent with lock and pre-heater commands
    pub fn with_spin(mut self, spin: impl Into<String>) -> Self {
        self.spin = Some(spin.into());
        self
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether a bearer token is currently held
    pub fn has_token(&self) -> bool {
        self.token.read().is_some()
    }

    /// Drop the bearer token; later calls are sent unauthenticated
    pub fn clear_token(&self) {
        *self.token.write() = None;
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Log in and store the bearer token.
    ///
    /// Returns `Ok(false)` when the service rejects the credentials.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str, country: &str) -> Result<bool> {
        let url = self.base_url.join("/auth/login")?;
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
            country: country.to_string(),
        };

        let response = self.client.post(url).json(&request).send().await?;
        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                self.clear_token();
                debug!("Credentials rejected");
                Ok(false)
            }
            status if status.is_success() => {
                let login: LoginResponse = response
                    .json()
                    .await
                    .map_err(|e| ClientError::ParseError(e.to_string()))?;
                *self.token.write() = Some(login.access_token);
                debug!(expires_in = ?login.expires_in, "Obtained access token");
                Ok(true)
            }
            status => Err(self.extract_error_from_status(response, status).await),
        }
    }

    // =========================================================================
    // Vehicle Data
    // =========================================================================

    /// List the vehicles of the account
    #[instrument(skip(self))]
    pub async fn list_vehicles(&self) -> Result<VehicleList> {
        let url = self.base_url.join("/vehicles")?;
        debug!("Listing vehicles from {}", url);

        let response = self.authorized(self.client.get(url)).send().await?;
        self.handle_response(response).await
    }

    /// Read the last known status of a vehicle
    #[instrument(skip(self))]
    pub async fn vehicle_status(&self, vin: &str) -> Result<serde_json::Value> {
        let url = self.vehicle_url(vin, "status")?;

        let response = self.authorized(self.client.get(url)).send().await?;
        self.handle_response(response).await
    }

    /// Ask the service to pull fresh data from the vehicle
    #[instrument(skip(self))]
    pub async fn refresh(&self, vin: &str) -> Result<()> {
        let url = self.vehicle_url(vin, "refresh")?;

        let response = self.authorized(self.client.post(url)).send().await?;
        self.handle_empty(response).await
    }

    // =========================================================================
    // Commands
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn lock(&self, vin: &str, lock: bool) -> Result<()> {
        let body = LockRequest {
            lock,
            spin: self.spin.clone(),
        };
        self.post_command(vin, "lock", &body).await
    }

    #[instrument(skip(self))]
    pub async fn climatisation(
        &self,
        vin: &str,
        activate: bool,
        heater_source: HeaterSource,
    ) -> Result<()> {
        let body = ClimatisationRequest {
            activate,
            heater_source,
        };
        self.post_command(vin, "climatisation", &body).await
    }

    #[instrument(skip(self))]
    pub async fn charger(&self, vin: &str, activate: bool) -> Result<()> {
        self.post_command(vin, "charger", &ActivateRequest { activate })
            .await
    }

    #[instrument(skip(self))]
    pub async fn window_heating(&self, vin: &str, activate: bool) -> Result<()> {
        self.post_command(vin, "window-heating", &ActivateRequest { activate })
            .await
    }

    #[instrument(skip(self))]
    pub async fn pre_heater(&self, vin: &str, activate: bool, duration_minutes: u32) -> Result<()> {
        let body = TimedRequest {
            activate,
            duration_minutes,
            spin: self.spin.clone(),
        };
        self.post_command(vin, "pre-heater", &body).await
    }

    #[instrument(skip(self))]
    pub async fn ventilation(
        &self,
        vin: &str,
        activate: bool,
        duration_minutes: u32,
    ) -> Result<()> {
        let body = TimedRequest {
            activate,
            duration_minutes,
            spin: None,
        };
        self.post_command(vin, "ventilation", &body).await
    }

    #[instrument(skip(self))]
    pub async fn honk_flash(&self, vin: &str, mode: HonkFlashMode, duration_secs: u32) -> Result<()> {
        let body = HonkFlashRequest {
            mode,
            duration_secs,
        };
        self.post_command(vin, "honk-flash", &body).await
    }

    #[instrument(skip(self))]
    pub async fn charger_max_current(&self, vin: &str, amps: u8) -> Result<()> {
        let url = self.vehicle_url(vin, "charger/max-current")?;
        let response = self
            .authorized(self.client.put(url))
            .json(&MaxCurrentRequest { amps })
            .send()
            .await?;
        self.handle_empty(response).await
    }

    #[instrument(skip(self))]
    pub async fn climatisation_temperature(
        &self,
        vin: &str,
        celsius: f64,
        heater_source: HeaterSource,
    ) -> Result<()> {
        let url = self.vehicle_url(vin, "climatisation/temperature")?;
        let body = TemperatureRequest {
            celsius,
            heater_source,
        };
        let response = self
            .authorized(self.client.put(url))
            .json(&body)
            .send()
            .await?;
        self.handle_empty(response).await
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn vehicle_url(&self, vin: &str, resource: &str) -> Result<Url> {
        Ok(self.base_url.join(&format!(
            "/vehicles/{}/{}",
            encode_path_segment(vin),
            resource
        ))?)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token.read().as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn post_command<B: Serialize + ?Sized>(
        &self,
        vin: &str,
        resource: &str,
        body: &B,
    ) -> Result<()> {
        let url = self.vehicle_url(vin, resource)?;
        let response = self
            .authorized(self.client.post(url))
            .json(body)
            .send()
            .await?;
        self.handle_empty(response).await
    }

    /// Handle response and deserialize JSON
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ClientError::ParseError(e.to_string()))
        } else {
            Err(self.extract_error_from_status(response, status).await)
        }
    }

    /// Handle response without a meaningful body
    async fn handle_empty(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            Err(self.extract_error_from_status(response, status).await)
        }
    }

    async fn extract_error_from_status(
        &self,
        response: reqwest::Response,
        status: StatusCode,
    ) -> ClientError {
        // Try to parse error response body
        let message = match response.json::<ErrorResponse>().await {
            Ok(err) => err.error,
            Err(_) => format!("HTTP {}", status),
        };

        match status {
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ClientError::Timeout,
            _ => ClientError::server_error(status.as_u16(), message),
        }
    }
}
