//! Normalization of raw forecast payloads into flat output records
//!
//! Pure functions over an in-memory payload; no I/O. Missing fields or
//! indices in an otherwise well-formed payload indicate an upstream schema
//! change and are surfaced as errors rather than tolerated.

use thiserror::Error;

use crate::data::{CurrentConditions, DailyForecastEntry, ForecastPayload};

/// Data-integrity errors raised while normalizing a payload
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// An hourly series is shorter than the index being read
    #[error("Hourly series '{field}' has {len} entries, needed index {index}")]
    HourlyIndexOutOfRange {
        field: &'static str,
        index: usize,
        len: usize,
    },

    /// The daily series has no entry for today
    #[error("Daily series '{field}' is empty")]
    EmptyDaily { field: &'static str },

    /// The daily series arrays disagree on length
    #[error("Daily series arrays have inconsistent lengths")]
    InconsistentDaily,
}

/// Derives the current-conditions record from a payload
///
/// `local_hour` must be the caller's local wall-clock hour (0-23) at
/// normalization time: it selects the row of the hourly series that the
/// humidity, visibility, and feels-like fields are read from. This couples
/// the output to the process clock and timezone — an identical cached
/// payload normalizes differently at different hours of the day.
///
/// The three `day_*` fields are read from index 0 of the daily series
/// (today).
pub fn current(
    payload: &ForecastPayload,
    local_hour: usize,
) -> Result<CurrentConditions, NormalizeError> {
    let hourly = &payload.hourly;
    let daily = &payload.daily;

    let hour_value = |field: &'static str, series: &[f64]| {
        series
            .get(local_hour)
            .copied()
            .ok_or(NormalizeError::HourlyIndexOutOfRange {
                field,
                index: local_hour,
                len: series.len(),
            })
    };
    let today_value = |field: &'static str, series: &[f64]| {
        series
            .first()
            .copied()
            .ok_or(NormalizeError::EmptyDaily { field })
    };

    Ok(CurrentConditions {
        temperature: payload.current_weather.temperature,
        wind_speed: payload.current_weather.windspeed,
        wind_direction: payload.current_weather.winddirection,
        weather_code: payload.current_weather.weathercode,
        relative_humidity: hour_value("relativehumidity_2m", &hourly.relativehumidity_2m)?,
        visibility: hour_value("visibility", &hourly.visibility)?,
        feels_like: hour_value("apparent_temperature", &hourly.apparent_temperature)?,
        day_max_temp: today_value("temperature_2m_max", &daily.temperature_2m_max)?,
        day_min_temp: today_value("temperature_2m_min", &daily.temperature_2m_min)?,
        day_total_precip: today_value("precipitation_sum", &daily.precipitation_sum)?,
    })
}

/// Derives the ordered daily forecast from a payload
///
/// Produces exactly one entry per daily-series element in source
/// chronological order. `day_index` is 1-based and derived purely from
/// position, not from any date field.
pub fn forecast(payload: &ForecastPayload) -> Result<Vec<DailyForecastEntry>, NormalizeError> {
    let daily = &payload.daily;
    let len = daily.time.len();

    if daily.weathercode.len() != len
        || daily.temperature_2m_max.len() != len
        || daily.temperature_2m_min.len() != len
        || daily.precipitation_sum.len() != len
    {
        return Err(NormalizeError::InconsistentDaily);
    }

    let mut entries = Vec::with_capacity(len);
    for i in 0..len {
        entries.push(DailyForecastEntry {
            day_index: i + 1,
            max_temp: daily.temperature_2m_max[i],
            min_temp: daily.temperature_2m_min[i],
            weather_code: daily.weathercode[i],
            precipitation: daily.precipitation_sum[i],
        });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::forecast::{CurrentWeather, DailySeries, HourlySeries};

    fn sample_payload() -> ForecastPayload {
        ForecastPayload {
            latitude: 40.0,
            longitude: -105.0,
            current_weather: CurrentWeather {
                temperature: 18.6,
                windspeed: 9.4,
                winddirection: 230.0,
                weathercode: 3,
                time: 1_700_000_000,
            },
            hourly: HourlySeries {
                time: (0..24).map(|h| 1_700_000_000 + h * 3600).collect(),
                temperature_2m: (0..24).map(|h| 10.0 + h as f64 * 0.5).collect(),
                relativehumidity_2m: (0..24).map(|h| 50.0 + h as f64).collect(),
                visibility: (0..24).map(|h| 20000.0 + h as f64 * 100.0).collect(),
                apparent_temperature: (0..24).map(|h| 9.0 + h as f64 * 0.5).collect(),
                windspeed_10m: vec![9.4; 24],
            },
            daily: DailySeries {
                time: (0..7).map(|d| 1_700_000_000 + d * 86400).collect(),
                weathercode: vec![3, 2, 61, 0, 1, 80, 3],
                temperature_2m_max: vec![21.0, 22.5, 17.8, 23.1, 24.0, 16.2, 20.0],
                temperature_2m_min: vec![9.0, 10.2, 8.5, 11.0, 12.1, 7.9, 9.6],
                precipitation_sum: vec![0.0, 0.2, 6.4, 0.0, 0.0, 11.8, 0.1],
            },
        }
    }

    #[test]
    fn test_current_is_total_over_all_hours() {
        let payload = sample_payload();
        for hour in 0..24 {
            let result = current(&payload, hour);
            assert!(result.is_ok(), "current() should succeed for hour {}", hour);
        }
    }

    #[test]
    fn test_current_indexes_hourly_at_local_hour() {
        let payload = sample_payload();
        let conditions = current(&payload, 14).expect("Should normalize");

        assert!((conditions.relative_humidity - 64.0).abs() < 0.01);
        assert!((conditions.visibility - 21400.0).abs() < 0.01);
        assert!((conditions.feels_like - 16.0).abs() < 0.01);
    }

    #[test]
    fn test_current_reads_snapshot_fields_verbatim() {
        let payload = sample_payload();
        let conditions = current(&payload, 0).expect("Should normalize");

        assert!((conditions.temperature - 18.6).abs() < 0.01);
        assert!((conditions.wind_speed - 9.4).abs() < 0.01);
        assert!((conditions.wind_direction - 230.0).abs() < 0.01);
        assert_eq!(conditions.weather_code, 3);
    }

    #[test]
    fn test_current_pulls_day_zero_daily_values() {
        let payload = sample_payload();
        let conditions = current(&payload, 7).expect("Should normalize");

        assert!((conditions.day_max_temp - 21.0).abs() < 0.01);
        assert!((conditions.day_min_temp - 9.0).abs() < 0.01);
        assert!((conditions.day_total_precip - 0.0).abs() < 0.01);
    }

    #[test]
    fn test_short_hourly_series_is_an_integrity_error() {
        let mut payload = sample_payload();
        payload.hourly.relativehumidity_2m.truncate(12);

        let result = current(&payload, 20);
        match result {
            Err(NormalizeError::HourlyIndexOutOfRange { field, index, len }) => {
                assert_eq!(field, "relativehumidity_2m");
                assert_eq!(index, 20);
                assert_eq!(len, 12);
            }
            other => panic!("Expected HourlyIndexOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_daily_series_is_an_integrity_error() {
        let mut payload = sample_payload();
        payload.daily.temperature_2m_max.clear();

        let result = current(&payload, 0);
        assert!(matches!(
            result,
            Err(NormalizeError::EmptyDaily {
                field: "temperature_2m_max"
            })
        ));
    }

    #[test]
    fn test_forecast_yields_one_entry_per_day_in_order() {
        let payload = sample_payload();
        let entries = forecast(&payload).expect("Should normalize");

        assert_eq!(entries.len(), 7);
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.day_index, i + 1, "day_index must be 1-based position");
        }
        assert!((entries[0].max_temp - 21.0).abs() < 0.01);
        assert_eq!(entries[2].weather_code, 61);
        assert!((entries[5].precipitation - 11.8).abs() < 0.01);
        assert!((entries[6].min_temp - 9.6).abs() < 0.01);
    }

    #[test]
    fn test_forecast_on_single_day_payload() {
        let mut payload = sample_payload();
        payload.daily.time.truncate(1);
        payload.daily.weathercode.truncate(1);
        payload.daily.temperature_2m_max.truncate(1);
        payload.daily.temperature_2m_min.truncate(1);
        payload.daily.precipitation_sum.truncate(1);

        let entries = forecast(&payload).expect("Should normalize");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].day_index, 1);
    }

    #[test]
    fn test_forecast_rejects_inconsistent_daily_lengths() {
        let mut payload = sample_payload();
        payload.daily.precipitation_sum.truncate(5);

        let result = forecast(&payload);
        assert!(matches!(result, Err(NormalizeError::InconsistentDaily)));
    }
}
