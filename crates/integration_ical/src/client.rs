//! iCalendar feed client
//!
//! Fetches the configured ics feed and parses its VEVENT components.
//! Individual events that cannot be resolved to a concrete start instant
//! are skipped; a feed that is not valid iCalendar syntax fails the fetch.

use application::ports::{CalendarError, CalendarPort};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use domain::{CalendarEvent, Timezone};
use icalendar::{CalendarComponent, Component, parser};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Calendar feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcalConfig {
    /// Feed URL
    pub feed_url: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

const fn default_timeout() -> u64 {
    30
}

/// HTTP client for a published iCalendar feed
#[derive(Debug)]
pub struct IcalFeedClient {
    client: Client,
    config: IcalConfig,
    timezone: Timezone,
}

impl IcalFeedClient {
    /// Create a new feed client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: IcalConfig, timezone: Timezone) -> Result<Self, CalendarError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CalendarError::Fetch(e.to_string()))?;

        Ok(Self {
            client,
            config,
            timezone,
        })
    }
}

#[async_trait]
impl CalendarPort for IcalFeedClient {
    #[instrument(skip(self))]
    async fn fetch_events(&self) -> Result<Vec<CalendarEvent>, CalendarError> {
        debug!(url = %self.config.feed_url, "fetching calendar feed");

        let response = self
            .client
            .get(&self.config.feed_url)
            .send()
            .await
            .map_err(|e| CalendarError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CalendarError::Fetch(format!("HTTP {status}")));
        }

        let text = response
            .text()
            .await
            .map_err(|e| CalendarError::Fetch(e.to_string()))?;

        parse_events(&text, self.timezone)
    }
}

/// Parse VEVENT components from iCalendar text
///
/// Events keep their feed order. Components without a SUMMARY or a
/// resolvable DTSTART are skipped; a missing DTEND falls back to the
/// start instant.
pub fn parse_events(
    ical_data: &str,
    timezone: Timezone,
) -> Result<Vec<CalendarEvent>, CalendarError> {
    let unfolded = parser::unfold(ical_data);
    let parsed = parser::read_calendar(&unfolded)
        .map_err(|e| CalendarError::Malformed(format!("iCalendar parse error: {e}")))?;

    let mut events = Vec::new();

    for component in parsed.components {
        let cal_component = CalendarComponent::from(component);

        if let CalendarComponent::Event(event) = cal_component {
            let Some(summary) = event.get_summary() else {
                debug!("skipping event without SUMMARY");
                continue;
            };

            let Some(start) = event
                .property_value("DTSTART")
                .and_then(|value| resolve_instant(value, timezone))
            else {
                debug!(summary = %summary, "skipping event without resolvable DTSTART");
                continue;
            };

            let end = event
                .property_value("DTEND")
                .and_then(|value| resolve_instant(value, timezone))
                .unwrap_or(start);

            events.push(CalendarEvent::new(summary, start, end));
        }
    }

    debug!(count = events.len(), "calendar feed parsed");
    Ok(events)
}

/// Resolve an iCalendar date or date-time value to display wall time
///
/// `...Z` values convert from UTC; floating values are taken verbatim;
/// date-only values resolve to midnight.
fn resolve_instant(value: &str, timezone: Timezone) -> Option<NaiveDateTime> {
    if let Some(utc_part) = value.strip_suffix('Z') {
        let naive = NaiveDateTime::parse_from_str(utc_part, "%Y%m%dT%H%M%S").ok()?;
        return Some(timezone.wall_time(Utc.from_utc_datetime(&naive)));
    }

    if let Ok(floating) = NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%S") {
        return Some(floating);
    }

    NaiveDate::parse_from_str(value, "%Y%m%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}
