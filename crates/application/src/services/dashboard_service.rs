//! Dashboard render cycle
//!
//! One cycle fetches both sources, renders the document, and publishes
//! it. Cycles are serialized with a busy flag: a tick that fires while the
//! previous cycle is still running is skipped, not queued, since every
//! cycle recomputes from scratch and a stale queued render has no value.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use domain::{
    EVENT_DISPLAY_LIMIT, MonthGrid, RenderedDashboard, TargetDate, Timezone, upcoming_events,
};
use tracing::{debug, info, warn};

use crate::error::ApplicationError;
use crate::ports::{CalendarPort, ScreenPort, WeatherPort};
use crate::render::{RenderInputs, Template, render_dashboard};

/// Outcome of one scheduler tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Dashboard rendered and uploaded
    Published {
        /// Filename the screen server received
        file_name: String,
    },
    /// Previous cycle still running; this tick did nothing
    SkippedBusy,
}

/// Orchestrates the fetch → render → publish cycle
pub struct DashboardService {
    weather: Arc<dyn WeatherPort>,
    calendar: Arc<dyn CalendarPort>,
    screen: Arc<dyn ScreenPort>,
    template: Template,
    target: TargetDate,
    timezone: Timezone,
    busy: AtomicBool,
}

impl std::fmt::Debug for DashboardService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardService")
            .field("target", &self.target)
            .field("timezone", &self.timezone)
            .field("busy", &self.busy.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl DashboardService {
    /// Create the service
    #[must_use]
    pub fn new(
        weather: Arc<dyn WeatherPort>,
        calendar: Arc<dyn CalendarPort>,
        screen: Arc<dyn ScreenPort>,
        template: Template,
        target: TargetDate,
        timezone: Timezone,
    ) -> Self {
        Self {
            weather,
            calendar,
            screen,
            template,
            target,
            timezone,
            busy: AtomicBool::new(false),
        }
    }

    /// Run one render cycle
    ///
    /// Errors are returned for the caller to log; they never need to stop
    /// the scheduler. Returns [`CycleOutcome::SkippedBusy`] without doing
    /// any work when a previous cycle is still in flight.
    pub async fn run_cycle(&self) -> Result<CycleOutcome, ApplicationError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            warn!("previous render cycle still running, skipping this tick");
            return Ok(CycleOutcome::SkippedBusy);
        }

        let result = self.render_and_publish().await;
        self.busy.store(false, Ordering::Release);
        result
    }

    async fn render_and_publish(&self) -> Result<CycleOutcome, ApplicationError> {
        debug!("render cycle started");

        // The two sources have no ordering dependency on each other
        let (forecast, events) =
            tokio::join!(self.weather.fetch_forecast(), self.calendar.fetch_events());
        let forecast = forecast?;
        let events = events?;

        let now = forecast.current.observed_at;
        let selected = upcoming_events(&events, now, EVENT_DISPLAY_LIMIT);
        let grid = MonthGrid::build(now.date(), &selected);

        debug!(
            observed_at = %now,
            events_total = events.len(),
            events_shown = selected.len(),
            "sources normalized"
        );

        let inputs = RenderInputs {
            forecast: &forecast,
            events: &selected,
            grid: &grid,
            target: self.target,
        };
        let html = render_dashboard(&self.template, &inputs);

        let dashboard = RenderedDashboard::new(html, self.timezone.wall_time(Utc::now()));
        self.screen.publish(&dashboard).await?;

        info!(file_name = %dashboard.file_name, "dashboard published");
        Ok(CycleOutcome::Published {
            file_name: dashboard.file_name,
        })
    }
}
