//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Timezone name is not a known IANA identifier
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Countdown target date could not be parsed
    #[error("Invalid target date: {0}")]
    InvalidTargetDate(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_timezone_error_message() {
        let err = DomainError::InvalidTimezone("Mars/Olympus".to_string());
        assert_eq!(err.to_string(), "Invalid timezone: Mars/Olympus");
    }

    #[test]
    fn invalid_target_date_error_message() {
        let err = DomainError::InvalidTargetDate("not-a-date".to_string());
        assert_eq!(err.to_string(), "Invalid target date: not-a-date");
    }
}
