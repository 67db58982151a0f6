//! Calendar source port

use async_trait::async_trait;
use domain::CalendarEvent;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Calendar port errors
#[derive(Debug, Error)]
pub enum CalendarError {
    /// Transport failure, timeout, or non-success HTTP status
    #[error("Calendar request failed: {0}")]
    Fetch(String),

    /// Feed text is not valid iCalendar syntax
    #[error("Malformed calendar data: {0}")]
    Malformed(String),
}

/// Calendar feed source for the dashboard
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CalendarPort: Send + Sync {
    /// Fetch all events from the feed, in feed order
    ///
    /// Filtering and ordering for display happen downstream; this returns
    /// every event the feed resolves to a concrete start instant.
    async fn fetch_events(&self) -> Result<Vec<CalendarEvent>, CalendarError>;
}
