//! Terminus screen server integration
//!
//! Uploads rendered dashboards to the display device's screen API.

pub mod client;

pub use client::{TerminusClient, TerminusConfig};
