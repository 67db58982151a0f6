//! Weather data model
//!
//! Normalized weather records and the WMO condition-code table used for
//! display text and icon selection.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Minimum daily entries a usable forecast must carry (today + 5 lookahead)
pub const MIN_FORECAST_DAYS: usize = 6;

/// Weather condition derived from WMO weather codes
///
/// Variants follow the dashboard's display vocabulary rather than the full
/// WMO taxonomy; codes outside the known set collapse to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    /// Clear sky (WMO 0)
    Clear,
    /// Partly cloudy (WMO 1, 2)
    PartlyCloudy,
    /// Overcast (WMO 3)
    Overcast,
    /// Fog (WMO 45, 48)
    Fog,
    /// Light drizzle (WMO 51)
    LightDrizzle,
    /// Drizzle (WMO 53, 55)
    Drizzle,
    /// Light rain (WMO 61)
    LightRain,
    /// Rain (WMO 63, 65)
    Rain,
    /// Freezing rain (WMO 66, 67)
    FreezingRain,
    /// Light snow (WMO 71)
    LightSnow,
    /// Snow (WMO 73, 75)
    Snow,
    /// Snow grains (WMO 77)
    SnowGrains,
    /// Rain showers (WMO 80, 81, 82)
    RainShowers,
    /// Snow showers (WMO 85, 86)
    SnowShowers,
    /// Thunderstorm (WMO 95)
    Thunderstorm,
    /// Thunderstorm with hail (WMO 96, 99); shares the "Thunderstorm"
    /// label but carries its own icon
    ThunderstormHail,
    /// Unknown condition
    Unknown,
}

impl WeatherCondition {
    /// Convert a WMO weather code to a `WeatherCondition`
    ///
    /// Total over all codes; see <https://open-meteo.com/en/docs> for the
    /// WMO code reference.
    #[must_use]
    pub const fn from_wmo_code(code: u8) -> Self {
        match code {
            0 => Self::Clear,
            1 | 2 => Self::PartlyCloudy,
            3 => Self::Overcast,
            45 | 48 => Self::Fog,
            51 => Self::LightDrizzle,
            53 | 55 => Self::Drizzle,
            61 => Self::LightRain,
            63 | 65 => Self::Rain,
            66 | 67 => Self::FreezingRain,
            71 => Self::LightSnow,
            73 | 75 => Self::Snow,
            77 => Self::SnowGrains,
            80..=82 => Self::RainShowers,
            85 | 86 => Self::SnowShowers,
            95 => Self::Thunderstorm,
            96 | 99 => Self::ThunderstormHail,
            _ => Self::Unknown,
        }
    }

    /// Display label shown on the dashboard
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Overcast => "Overcast",
            Self::Fog => "Fog",
            Self::LightDrizzle => "Light Drizzle",
            Self::Drizzle => "Drizzle",
            Self::LightRain => "Light Rain",
            Self::Rain => "Rain",
            Self::FreezingRain => "Freezing Rain",
            Self::LightSnow => "Light Snow",
            Self::Snow => "Snow",
            Self::SnowGrains => "Snow Grains",
            Self::RainShowers => "Rain Showers",
            Self::SnowShowers => "Snow Showers",
            Self::Thunderstorm | Self::ThunderstormHail => "Thunderstorm",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Current conditions at render time
///
/// `observed_at` is the authoritative "now" for the entire render cycle;
/// every downstream date computation derives from it rather than the
/// system clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Temperature in °F
    pub temperature: f64,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// WMO weather code
    pub weather_code: u8,
    /// Weather condition
    pub condition: WeatherCondition,
    /// Observation time, display-timezone wall clock
    pub observed_at: NaiveDateTime,
}

/// Forecast for a single day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyForecast {
    /// Forecast date
    pub date: NaiveDate,
    /// Minimum temperature in °F
    pub temperature_min: f64,
    /// Maximum temperature in °F
    pub temperature_max: f64,
    /// WMO weather code
    pub weather_code: u8,
    /// Weather condition
    pub condition: WeatherCondition,
}

/// Complete normalized forecast for one render cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    /// Current conditions
    pub current: WeatherSnapshot,
    /// Daily forecasts, index 0 = today
    pub daily: Vec<DailyForecast>,
}

impl Forecast {
    /// Get today's forecast
    #[must_use]
    pub fn today(&self) -> Option<&DailyForecast> {
        self.daily.first()
    }
}
