//! Month calendar grid
//!
//! Computes the fixed 6x7 Sunday-first grid for the month containing the
//! render timestamp. Months that would fit in fewer rows still emit all 42
//! cells; trailing next-month days spill into the final row by design.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::event::CalendarEvent;

/// Number of cells in the grid (6 weeks x 7 days)
pub const GRID_CELLS: usize = 42;

/// One cell of the month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum MonthCell {
    /// Day spilling in from the previous month
    PrevMonth {
        /// Day of month
        day: u32,
    },
    /// Day of the displayed month
    CurrentMonth {
        /// Day of month
        day: u32,
        /// Cell matches the render date
        is_today: bool,
        /// An upcoming event starts on this date
        has_event: bool,
    },
    /// Day spilling over into the next month
    NextMonth {
        /// Day of month
        day: u32,
    },
}

/// The 42-cell month grid, index 0 = top-left (first Sunday slot)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGrid {
    cells: Vec<MonthCell>,
}

impl MonthGrid {
    /// Build the grid for the month containing `today`
    ///
    /// `events` are the already-selected upcoming events; a current-month
    /// cell is flagged when an event *starts* on that date. Multi-day
    /// events mark only their start date.
    #[must_use]
    pub fn build(today: NaiveDate, events: &[CalendarEvent]) -> Self {
        let year = today.year();
        let month = today.month();

        let first_of_month = today.with_day(1).unwrap_or(today);
        let leading = first_of_month.weekday().num_days_from_sunday();
        let days_in_current_month = days_in_month(year, month);

        let (prev_year, prev_month) = if month == 1 {
            (year - 1, 12)
        } else {
            (year, month - 1)
        };
        let prev_last_day = days_in_month(prev_year, prev_month);

        let event_days: HashSet<NaiveDate> =
            events.iter().map(|event| event.start.date()).collect();

        let mut cells = Vec::with_capacity(GRID_CELLS);

        for i in 0..leading {
            cells.push(MonthCell::PrevMonth {
                day: prev_last_day - leading + i + 1,
            });
        }

        for day in 1..=days_in_current_month {
            let has_event = NaiveDate::from_ymd_opt(year, month, day)
                .is_some_and(|date| event_days.contains(&date));
            cells.push(MonthCell::CurrentMonth {
                day,
                is_today: day == today.day(),
                has_event,
            });
        }

        let mut next_day = 1;
        while cells.len() < GRID_CELLS {
            cells.push(MonthCell::NextMonth { day: next_day });
            next_day += 1;
        }

        Self { cells }
    }

    /// Get the cells, index 0 = top-left
    #[must_use]
    pub fn cells(&self) -> &[MonthCell] {
        &self.cells
    }
}

/// Number of days in the given month
fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(30, |last| last.day())
}
