//! Calendar events and upcoming-event selection

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Maximum events shown on the dashboard
pub const EVENT_DISPLAY_LIMIT: usize = 5;

/// A calendar event resolved to concrete display-timezone instants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Event title (iCalendar SUMMARY)
    pub title: String,
    /// Start instant, display-timezone wall clock
    pub start: NaiveDateTime,
    /// End instant, display-timezone wall clock
    pub end: NaiveDateTime,
}

impl CalendarEvent {
    /// Create a new event
    pub fn new(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            start,
            end,
        }
    }
}

/// Select the events to display: start at or after `now`, ascending by
/// start instant (feed order breaks ties), truncated to `limit`
///
/// An empty result is a normal outcome, not an error.
#[must_use]
pub fn upcoming_events(
    events: &[CalendarEvent],
    now: NaiveDateTime,
    limit: usize,
) -> Vec<CalendarEvent> {
    let mut upcoming: Vec<CalendarEvent> = events
        .iter()
        .filter(|event| event.start >= now)
        .cloned()
        .collect();
    upcoming.sort_by_key(|event| event.start);
    upcoming.truncate(limit);
    upcoming
}
