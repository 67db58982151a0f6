//! Countdown target date value object
//!
//! The countdown target is a month and day; the year in the configured
//! value is ignored. The next occurrence of that month+day relative to the
//! render timestamp drives the day count.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

use crate::errors::DomainError;

const SECONDS_PER_DAY: i64 = 86_400;

/// A year-agnostic month+day countdown target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetDate {
    month: u32,
    day: u32,
}

impl TargetDate {
    /// Parse from "YYYY-MM-DD"; only the month and day are retained
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTargetDate` if the value is not a
    /// valid calendar date.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|_| DomainError::InvalidTargetDate(value.to_string()))?;
        Ok(Self {
            month: date.month(),
            day: date.day(),
        })
    }

    /// Get the target month (1-12)
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Get the target day of month
    #[must_use]
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// Resolve the next occurrence on or after `today`
    ///
    /// A Feb 29 target resolves to Mar 1 in non-leap years.
    #[must_use]
    pub fn next_occurrence(&self, today: NaiveDate) -> NaiveDate {
        let this_year = self.in_year(today.year());
        if this_year < today {
            self.in_year(today.year() + 1)
        } else {
            this_year
        }
    }

    /// Days remaining until the next occurrence, counted from `now`
    ///
    /// Computed as `ceil((target midnight - now) / 1 day)`; zero on the
    /// target day itself.
    #[must_use]
    pub fn days_until(&self, now: NaiveDateTime) -> i64 {
        let target = self.next_occurrence(now.date()).and_time(NaiveTime::MIN);
        // `i64::div_ceil` is still unstable (int_roundings); SECONDS_PER_DAY is
        // positive, so this reproduces its ceiling-division semantics exactly.
        let secs = (target - now).num_seconds();
        let quotient = secs / SECONDS_PER_DAY;
        if secs % SECONDS_PER_DAY > 0 {
            quotient + 1
        } else {
            quotient
        }
    }

    fn in_year(&self, year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, self.month, self.day).unwrap_or_else(|| {
            // Feb 29 outside a leap year lands on the nearest following day
            NaiveDate::from_ymd_opt(year, 3, 1).unwrap_or_default()
        })
    }
}

impl fmt::Display for TargetDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--{:02}-{:02}", self.month, self.day)
    }
}
