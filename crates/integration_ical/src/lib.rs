//! iCalendar feed integration
//!
//! Fetches a published ics feed and resolves its events to concrete
//! display-timezone instants.

pub mod client;

pub use client::{IcalConfig, IcalFeedClient, parse_events};
