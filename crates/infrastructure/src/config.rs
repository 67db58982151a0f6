//! Application configuration
//!
//! Raw settings come from an optional `inkboard.toml` overlaid by
//! `INKBOARD_*` environment variables, then resolve into domain-typed
//! [`Settings`]. Resolution is where fail-fast happens: a missing or
//! invalid required setting aborts startup instead of rendering garbage.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use domain::{GeoLocation, TargetDate, Timezone};

/// Configuration errors, fatal at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Sources could not be read or deserialized
    #[error("Configuration could not be loaded: {0}")]
    Load(#[from] config::ConfigError),

    /// A required setting is absent
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    /// A setting is present but unusable
    #[error("Invalid setting {setting}: {reason}")]
    Invalid {
        /// Dotted setting path
        setting: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

/// Raw application configuration as deserialized from the sources
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Calendar feed
    #[serde(default)]
    pub calendar: CalendarConfig,

    /// Forecast location
    #[serde(default)]
    pub location: LocationConfig,

    /// Display-facing settings
    #[serde(default)]
    pub display: DisplayConfig,

    /// Screen server endpoint
    #[serde(default)]
    pub terminus: TerminusConfig,

    /// Render cadence and fetch behavior
    #[serde(default)]
    pub render: RenderConfig,

    /// Weather source
    #[serde(default)]
    pub weather: WeatherSourceConfig,
}

/// Calendar feed configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// iCalendar feed URL (required)
    pub feed_url: Option<String>,
}

/// Forecast location configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Latitude in degrees (required)
    pub latitude: Option<f64>,
    /// Longitude in degrees (required)
    pub longitude: Option<f64>,
}

/// Display-facing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// IANA timezone the dashboard is rendered in (required)
    pub timezone: Option<String>,

    /// Countdown target as YYYY-MM-DD; the year is ignored (required)
    pub target_date: Option<String>,

    /// Path to the dashboard template
    #[serde(default = "default_template_path")]
    pub template_path: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            timezone: None,
            target_date: None,
            template_path: default_template_path(),
        }
    }
}

/// Screen server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TerminusConfig {
    /// Base URL of the screen server (required)
    pub base_url: Option<String>,
    /// Static access token sent with every upload (required)
    pub access_token: Option<String>,
}

/// Render cadence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Minutes between renders
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u32,

    /// Per-fetch timeout in seconds
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            interval_minutes: default_interval_minutes(),
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}

/// Weather source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSourceConfig {
    /// Open-Meteo API base URL
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
}

impl Default for WeatherSourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
        }
    }
}

fn default_template_path() -> String {
    "templates/dashboard.html".to_string()
}

const fn default_interval_minutes() -> u32 {
    10
}

const fn default_fetch_timeout() -> u64 {
    30
}

fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

/// Validated, domain-typed settings
#[derive(Debug, Clone)]
pub struct Settings {
    /// iCalendar feed URL
    pub feed_url: String,
    /// Forecast location
    pub location: GeoLocation,
    /// Display timezone
    pub timezone: Timezone,
    /// Countdown target
    pub target_date: TargetDate,
    /// Dashboard template path
    pub template_path: String,
    /// Screen server base URL
    pub terminus_base_url: String,
    /// Screen server access token
    pub terminus_access_token: String,
    /// Minutes between renders
    pub interval_minutes: u32,
    /// Per-fetch timeout in seconds
    pub fetch_timeout_secs: u64,
    /// Weather API base URL
    pub weather_base_url: String,
}

impl AppConfig {
    /// Load configuration from the optional file and environment overlay
    ///
    /// Environment variables use the `INKBOARD_` prefix with `__` as the
    /// section separator, e.g. `INKBOARD_CALENDAR__FEED_URL`.
    pub fn load() -> Result<Self, ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("inkboard").required(false))
            .add_source(
                config::Environment::with_prefix("INKBOARD")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Resolve into validated [`Settings`]
    ///
    /// # Errors
    ///
    /// Returns the first missing or invalid required setting.
    pub fn resolve(self) -> Result<Settings, ConfigError> {
        let feed_url = require(self.calendar.feed_url, "calendar.feed_url")?;

        let latitude = self
            .location
            .latitude
            .ok_or(ConfigError::Missing("location.latitude"))?;
        let longitude = self
            .location
            .longitude
            .ok_or(ConfigError::Missing("location.longitude"))?;
        let location = GeoLocation::new(latitude, longitude).map_err(|e| ConfigError::Invalid {
            setting: "location",
            reason: e.to_string(),
        })?;

        let timezone_name = require(self.display.timezone, "display.timezone")?;
        let timezone = Timezone::new(&timezone_name).map_err(|e| ConfigError::Invalid {
            setting: "display.timezone",
            reason: e.to_string(),
        })?;

        let target_raw = require(self.display.target_date, "display.target_date")?;
        let target_date = TargetDate::parse(&target_raw).map_err(|e| ConfigError::Invalid {
            setting: "display.target_date",
            reason: e.to_string(),
        })?;

        let terminus_base_url = require(self.terminus.base_url, "terminus.base_url")?;
        let terminus_access_token = require(self.terminus.access_token, "terminus.access_token")?;

        if self.render.interval_minutes == 0 {
            return Err(ConfigError::Invalid {
                setting: "render.interval_minutes",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Settings {
            feed_url,
            location,
            timezone,
            target_date,
            template_path: self.display.template_path,
            terminus_base_url,
            terminus_access_token,
            interval_minutes: self.render.interval_minutes,
            fetch_timeout_secs: self.render.fetch_timeout_secs,
            weather_base_url: self.weather.base_url,
        })
    }
}

/// Unwrap a required string setting, rejecting empty values
fn require(value: Option<String>, setting: &'static str) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(_) => Err(ConfigError::Invalid {
            setting,
            reason: "must not be empty".to_string(),
        }),
        None => Err(ConfigError::Missing(setting)),
    }
}
