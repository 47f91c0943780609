//! Core data models for skyfetch
//!
//! This module contains the data types used throughout the pipeline for
//! representing locations, raw forecast payloads, and the normalized
//! weather records handed to exporters.

pub mod forecast;
pub mod location;
pub mod normalize;

pub use forecast::{ForecastClient, ForecastError, ForecastPayload};
pub use location::{GeoClient, Location, LocationError};
pub use normalize::NormalizeError;

use serde::{Deserialize, Serialize};

/// Geographic coordinates resolved once per run
///
/// Produced by the location resolver and consumed by the forecast fetcher;
/// immutable for the rest of the run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

/// Normalized view of the current weather
///
/// Hourly-sourced fields (`relative_humidity`, `visibility`, `feels_like`)
/// are indexed at the local wall-clock hour the payload was normalized at;
/// the `day_*` fields come from today's entry of the daily series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Air temperature in the configured temperature unit
    pub temperature: f64,
    /// Wind speed in the configured wind speed unit
    pub wind_speed: f64,
    /// Wind direction in degrees
    pub wind_direction: f64,
    /// WMO weather code
    pub weather_code: u8,
    /// Relative humidity percentage (0-100)
    pub relative_humidity: f64,
    /// Visibility in the provider's distance unit
    pub visibility: f64,
    /// Apparent temperature in the configured temperature unit
    pub feels_like: f64,
    /// Today's maximum temperature
    pub day_max_temp: f64,
    /// Today's minimum temperature
    pub day_min_temp: f64,
    /// Today's total precipitation in the configured precipitation unit
    pub day_total_precip: f64,
}

/// One day of the normalized forecast, in source chronological order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastEntry {
    /// 1-based position in the daily series; day 1 is today
    pub day_index: usize,
    /// Maximum temperature for the day
    pub max_temp: f64,
    /// Minimum temperature for the day
    pub min_temp: f64,
    /// WMO weather code
    pub weather_code: u8,
    /// Total precipitation for the day
    pub precipitation: f64,
}
