//! Open-Meteo weather integration
//!
//! Fetches current conditions and the daily forecast and normalizes them
//! into the domain model.

pub mod client;
pub mod models;

pub use client::{OpenMeteoClient, WeatherConfig};
