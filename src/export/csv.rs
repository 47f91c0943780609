//! CSV export of the normalized records
//!
//! Writes one file with the single current-conditions record and one file
//! with a row per forecast day, both in the working directory.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use crate::data::{CurrentConditions, DailyForecastEntry};

/// Output file for the current-conditions record
pub const CURRENT_CSV_FILE: &str = "weathercurrent.csv";

/// Output file for the daily forecast rows
pub const FORECAST_CSV_FILE: &str = "weatherforecast.csv";

/// Writes the current-conditions record as a header plus one row
pub fn write_current_csv(path: &Path, current: &CurrentConditions) -> io::Result<()> {
    let mut out = String::from(
        "temperature,wind_speed,wind_direction,weather_code,relative_humidity,\
         visibility,feels_like,day_max_temp,day_min_temp,day_total_precip\n",
    );
    let _ = writeln!(
        out,
        "{},{},{},{},{},{},{},{},{},{}",
        current.temperature,
        current.wind_speed,
        current.wind_direction,
        current.weather_code,
        current.relative_humidity,
        current.visibility,
        current.feels_like,
        current.day_max_temp,
        current.day_min_temp,
        current.day_total_precip,
    );
    fs::write(path, out)
}

/// Writes the forecast as a header plus one row per day, in series order
pub fn write_forecast_csv(path: &Path, days: &[DailyForecastEntry]) -> io::Result<()> {
    let mut out = String::from("day,max_temp,min_temp,weather_code,precipitation\n");
    for day in days {
        let _ = writeln!(
            out,
            "{},{},{},{},{}",
            day.day_index, day.max_temp, day.min_temp, day.weather_code, day.precipitation,
        );
    }
    fs::write(path, out)
}
