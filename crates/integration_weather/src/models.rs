//! Raw Open-Meteo response models
//!
//! Mirrors the JSON the API returns for the dashboard's query; conversion
//! into domain types enforces the forecast invariants (aligned daily
//! arrays, at least six days).

use application::ports::WeatherError;
use chrono::{NaiveDate, NaiveDateTime};
use domain::{DailyForecast, Forecast, MIN_FORECAST_DAYS, WeatherCondition, WeatherSnapshot};
use serde::Deserialize;

/// Raw current-conditions block
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentData {
    /// Observation time, local to the requested timezone
    pub time: String,
    /// Temperature in the requested unit
    pub temperature_2m: f64,
    /// Relative humidity percentage
    pub relative_humidity_2m: u8,
    /// WMO weather code
    pub weather_code: u8,
}

/// Raw daily-forecast arrays, indexed by day offset from today
#[derive(Debug, Clone, Deserialize)]
pub struct DailyData {
    pub time: Vec<String>,
    pub weather_code: Vec<u8>,
    pub temperature_2m_max: Vec<f64>,
    pub temperature_2m_min: Vec<f64>,
}

/// Raw API response
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub current: Option<CurrentData>,
    pub daily: Option<DailyData>,
}

impl ApiResponse {
    /// Normalize into the domain forecast
    ///
    /// # Errors
    ///
    /// Returns `WeatherError::Malformed` when the current block or daily
    /// arrays are absent, misaligned, too short, or carry unparseable
    /// dates.
    pub fn into_forecast(self) -> Result<Forecast, WeatherError> {
        let current = self
            .current
            .ok_or_else(|| WeatherError::Malformed("no current block in response".to_string()))?;
        let daily = self
            .daily
            .ok_or_else(|| WeatherError::Malformed("no daily block in response".to_string()))?;

        let observed_at = parse_observation_time(&current.time)?;
        let snapshot = WeatherSnapshot {
            temperature: current.temperature_2m,
            humidity: current.relative_humidity_2m,
            weather_code: current.weather_code,
            condition: WeatherCondition::from_wmo_code(current.weather_code),
            observed_at,
        };

        let days = daily.time.len();
        if daily.weather_code.len() != days
            || daily.temperature_2m_max.len() != days
            || daily.temperature_2m_min.len() != days
        {
            return Err(WeatherError::Malformed(format!(
                "daily arrays misaligned: {} dates, {} codes, {} max, {} min",
                days,
                daily.weather_code.len(),
                daily.temperature_2m_max.len(),
                daily.temperature_2m_min.len()
            )));
        }
        if days < MIN_FORECAST_DAYS {
            return Err(WeatherError::Malformed(format!(
                "daily forecast too short: {days} days, need {MIN_FORECAST_DAYS}"
            )));
        }

        let mut forecasts = Vec::with_capacity(days);
        for i in 0..days {
            let date = NaiveDate::parse_from_str(&daily.time[i], "%Y-%m-%d").map_err(|e| {
                WeatherError::Malformed(format!("invalid daily date {:?}: {e}", daily.time[i]))
            })?;
            forecasts.push(DailyForecast {
                date,
                temperature_min: daily.temperature_2m_min[i],
                temperature_max: daily.temperature_2m_max[i],
                weather_code: daily.weather_code[i],
                condition: WeatherCondition::from_wmo_code(daily.weather_code[i]),
            });
        }

        Ok(Forecast {
            current: snapshot,
            daily: forecasts,
        })
    }
}

/// Parse the observation timestamp
///
/// The API reports local wall time for the requested timezone, with or
/// without seconds.
fn parse_observation_time(value: &str) -> Result<NaiveDateTime, WeatherError> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| WeatherError::Malformed(format!("invalid observation time: {value:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ApiResponse {
        ApiResponse {
            current: Some(CurrentData {
                time: "2024-03-15T09:30".to_string(),
                temperature_2m: 48.6,
                relative_humidity_2m: 72,
                weather_code: 3,
            }),
            daily: Some(DailyData {
                time: (15..=21).map(|d| format!("2024-03-{d:02}")).collect(),
                weather_code: vec![3, 61, 0, 0, 71, 95, 2],
                temperature_2m_max: vec![55.0; 7],
                temperature_2m_min: vec![40.0; 7],
            }),
        }
    }

    #[test]
    fn normalizes_complete_response() {
        let forecast = sample().into_forecast().expect("normalizes");
        assert_eq!(forecast.current.humidity, 72);
        assert_eq!(forecast.current.condition, WeatherCondition::Overcast);
        assert_eq!(
            forecast.current.observed_at.to_string(),
            "2024-03-15 09:30:00"
        );
        assert_eq!(forecast.daily.len(), 7);
        assert_eq!(forecast.daily[1].condition, WeatherCondition::LightRain);
        assert_eq!(forecast.daily[5].condition, WeatherCondition::Thunderstorm);
    }

    #[test]
    fn observation_time_with_seconds_parses() {
        let mut response = sample();
        if let Some(current) = response.current.as_mut() {
            current.time = "2024-03-15T09:30:45".to_string();
        }
        let forecast = response.into_forecast().expect("normalizes");
        assert_eq!(
            forecast.current.observed_at.to_string(),
            "2024-03-15 09:30:45"
        );
    }

    #[test]
    fn missing_current_block_is_malformed() {
        let mut response = sample();
        response.current = None;
        let err = response.into_forecast().expect_err("fails");
        assert!(matches!(err, WeatherError::Malformed(_)));
        assert!(err.to_string().contains("current"));
    }

    #[test]
    fn missing_daily_block_is_malformed() {
        let mut response = sample();
        response.daily = None;
        let err = response.into_forecast().expect_err("fails");
        assert!(err.to_string().contains("daily"));
    }

    #[test]
    fn misaligned_daily_arrays_are_malformed() {
        let mut response = sample();
        if let Some(daily) = response.daily.as_mut() {
            daily.temperature_2m_min.pop();
        }
        let err = response.into_forecast().expect_err("fails");
        assert!(err.to_string().contains("misaligned"));
    }

    #[test]
    fn short_forecast_is_malformed() {
        let mut response = sample();
        if let Some(daily) = response.daily.as_mut() {
            daily.time.truncate(5);
            daily.weather_code.truncate(5);
            daily.temperature_2m_max.truncate(5);
            daily.temperature_2m_min.truncate(5);
        }
        let err = response.into_forecast().expect_err("fails");
        assert!(err.to_string().contains("too short"));
    }

    #[test]
    fn bad_observation_time_is_malformed() {
        let mut response = sample();
        if let Some(current) = response.current.as_mut() {
            current.time = "yesterday".to_string();
        }
        let err = response.into_forecast().expect_err("fails");
        assert!(err.to_string().contains("observation time"));
    }

    #[test]
    fn bad_daily_date_is_malformed() {
        let mut response = sample();
        if let Some(daily) = response.daily.as_mut() {
            daily.time[3] = "03/18/2024".to_string();
        }
        let err = response.into_forecast().expect_err("fails");
        assert!(err.to_string().contains("daily date"));
    }
}
