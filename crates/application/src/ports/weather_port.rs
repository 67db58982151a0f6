//! Weather source port
//!
//! Defines the interface for fetching the normalized forecast.

use async_trait::async_trait;
use domain::Forecast;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Weather port errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Transport failure, timeout, or non-success HTTP status
    #[error("Weather request failed: {0}")]
    Fetch(String),

    /// Payload decoded but does not satisfy the forecast invariants
    #[error("Malformed weather data: {0}")]
    Malformed(String),
}

/// Weather source for the dashboard
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Fetch current conditions and the daily forecast
    ///
    /// The returned forecast carries at least six daily entries (today
    /// plus five lookahead days); anything less is reported as
    /// [`WeatherError::Malformed`] by the implementation.
    async fn fetch_forecast(&self) -> Result<Forecast, WeatherError>;
}
