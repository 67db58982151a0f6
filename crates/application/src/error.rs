//! Application-level errors

use thiserror::Error;

use crate::ports::{CalendarError, PublishError, WeatherError};

/// Errors that can end a render cycle
///
/// None of these are fatal to the process: the cycle boundary logs them
/// and the next scheduled tick retries from scratch.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Weather source failed
    #[error(transparent)]
    Weather(#[from] WeatherError),

    /// Calendar source failed
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    /// Screen server rejected or never received the dashboard
    #[error(transparent)]
    Publish(#[from] PublishError),
}
