//! Rainmeter display sink
//!
//! Pushes the finished records to a running Rainmeter instance as
//! `!SetVariable` bangs. The pipeline treats the sink as a capability it
//! was handed: it calls `push` once per run and logs the outcome, nothing
//! more.

use std::io;
use std::path::PathBuf;
use std::process::Command;

use crate::data::{CurrentConditions, DailyForecastEntry};

/// An external display tool fed with the finished records
///
/// Implementations are free to fail; the pipeline only logs the result.
pub trait DisplaySink {
    /// Human-readable sink name for log lines
    fn name(&self) -> &str;

    /// Pushes one run's records to the display tool
    fn push(&self, current: &CurrentConditions, days: &[DailyForecastEntry]) -> io::Result<()>;
}

/// Builds the variable assignments pushed to the skin, one bang each
///
/// Current-conditions variables come first, followed by four variables per
/// forecast day keyed by the entry's 1-based day index.
pub fn bangs_for(
    current: &CurrentConditions,
    days: &[DailyForecastEntry],
) -> Vec<(String, String)> {
    let mut bangs = vec![
        ("WeatherTemp".to_string(), current.temperature.to_string()),
        ("WeatherWindSpeed".to_string(), current.wind_speed.to_string()),
        ("WeatherWindDir".to_string(), current.wind_direction.to_string()),
        ("WeatherCode".to_string(), current.weather_code.to_string()),
        ("WeatherHumidity".to_string(), current.relative_humidity.to_string()),
        ("WeatherVisibility".to_string(), current.visibility.to_string()),
        ("WeatherFeelsLike".to_string(), current.feels_like.to_string()),
        ("WeatherMaxTemp".to_string(), current.day_max_temp.to_string()),
        ("WeatherMinTemp".to_string(), current.day_min_temp.to_string()),
        ("WeatherPrecip".to_string(), current.day_total_precip.to_string()),
    ];

    for day in days {
        bangs.push((format!("ForecastDay{}Max", day.day_index), day.max_temp.to_string()));
        bangs.push((format!("ForecastDay{}Min", day.day_index), day.min_temp.to_string()));
        bangs.push((format!("ForecastDay{}Code", day.day_index), day.weather_code.to_string()));
        bangs.push((
            format!("ForecastDay{}Precip", day.day_index),
            day.precipitation.to_string(),
        ));
    }

    bangs
}

/// Sink that drives a Rainmeter executable with command-line bangs
#[derive(Debug)]
pub struct RainmeterSink {
    executable: PathBuf,
}

impl RainmeterSink {
    /// Creates a sink that invokes `Rainmeter.exe` from PATH
    pub fn new() -> Self {
        Self {
            executable: PathBuf::from("Rainmeter.exe"),
        }
    }

    /// Creates a sink that invokes a specific executable
    pub fn with_executable(executable: PathBuf) -> Self {
        Self { executable }
    }
}

impl Default for RainmeterSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for RainmeterSink {
    fn name(&self) -> &str {
        "rainmeter"
    }

    fn push(&self, current: &CurrentConditions, days: &[DailyForecastEntry]) -> io::Result<()> {
        for (variable, value) in bangs_for(current, days) {
            let status = Command::new(&self.executable)
                .arg("!SetVariable")
                .arg(&variable)
                .arg(&value)
                .status()?;

            if !status.success() {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    format!("Rainmeter exited with {} while setting {}", status, variable),
                ));
            }
        }
        Ok(())
    }
}
