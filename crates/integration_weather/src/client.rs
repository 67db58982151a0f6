//! Open-Meteo weather client
//!
//! HTTP client for the Open-Meteo Weather API.

use async_trait::async_trait;
use application::ports::{WeatherError, WeatherPort};
use domain::{Forecast, GeoLocation};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::models::ApiResponse;

/// Weather service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Open-Meteo API base URL (default: <https://api.open-meteo.com/v1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// IANA timezone the observation and daily dates are reported in
    pub timezone: String,
}

fn default_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

const fn default_timeout() -> u64 {
    30
}

/// Open-Meteo HTTP client
#[derive(Debug)]
pub struct OpenMeteoClient {
    client: Client,
    config: WeatherConfig,
    location: GeoLocation,
}

impl OpenMeteoClient {
    /// Create a new Open-Meteo client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig, location: GeoLocation) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::Fetch(e.to_string()))?;

        Ok(Self {
            client,
            config,
            location,
        })
    }

    /// Build the forecast request URL
    ///
    /// Temperatures are requested in Fahrenheit; the dashboard rounds them
    /// for display.
    fn build_forecast_url(&self) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&daily={}&current={}&timezone={}&temperature_unit=fahrenheit",
            self.config.base_url,
            self.location.latitude(),
            self.location.longitude(),
            "weather_code,temperature_2m_max,temperature_2m_min",
            "temperature_2m,relative_humidity_2m,weather_code",
            self.config.timezone,
        )
    }
}

#[async_trait]
impl WeatherPort for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn fetch_forecast(&self) -> Result<Forecast, WeatherError> {
        let url = self.build_forecast_url();
        debug!(url = %url, "fetching weather forecast");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| WeatherError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Fetch(format!("HTTP {status}")));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Malformed(e.to_string()))?;

        api_response.into_forecast()
    }
}
