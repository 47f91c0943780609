//! Pipeline orchestration for skyfetch
//!
//! One `Pipeline` instance owns the settings and clients for a single run:
//! resolve the measurement scale, geolocate, fetch the forecast through the
//! cache, normalize, and hand the finished records to the configured
//! exporters. The stages run strictly in sequence; the forecast depends on
//! the location, so there is nothing to fan out.

use chrono::{Local, Timelike};
use std::path::Path;

use crate::cache::CacheStore;
use crate::config::Settings;
use crate::data::{
    normalize, CurrentConditions, DailyForecastEntry, ForecastClient, GeoClient, NormalizeError,
};
use crate::export::{
    self, DisplaySink, RainmeterSink, CURRENT_CSV_FILE, FORECAST_CSV_FILE,
};
use crate::units::UnitScale;

/// How a single pipeline run ended
///
/// The early-exit variants are reportable conditions, not process failures;
/// the caller logs them and exits cleanly.
#[derive(Debug)]
pub enum RunOutcome {
    /// Normalized records were produced (and exported where configured)
    Completed {
        current: CurrentConditions,
        forecast: Vec<DailyForecastEntry>,
    },
    /// Geolocation failed; no forecast request was attempted
    LocationUnavailable,
    /// The forecast request failed and no usable cache exists
    ForecastUnavailable,
}

/// A configured pipeline, ready to run
pub struct Pipeline {
    settings: Settings,
    scale: UnitScale,
    geo: GeoClient,
    forecast: ForecastClient,
    sink: Option<Box<dyn DisplaySink>>,
}

impl Pipeline {
    /// Creates a pipeline from settings, with production clients and the
    /// Rainmeter sink when `rainmeter_ctrl` is set
    pub fn new(settings: Settings) -> Result<Self, reqwest::Error> {
        let scale = UnitScale::from_preference(&settings.preferred_scale);
        let geo = GeoClient::new()?;
        let forecast = ForecastClient::new(CacheStore::new())?;
        let sink: Option<Box<dyn DisplaySink>> = if settings.rainmeter_ctrl {
            Some(Box::new(RainmeterSink::new()))
        } else {
            None
        };

        Ok(Self {
            settings,
            scale,
            geo,
            forecast,
            sink,
        })
    }

    /// Creates a pipeline with custom clients and no display sink
    ///
    /// Useful for testing against mock endpoints.
    pub fn with_clients(settings: Settings, geo: GeoClient, forecast: ForecastClient) -> Self {
        let scale = UnitScale::from_preference(&settings.preferred_scale);
        Self {
            settings,
            scale,
            geo,
            forecast,
            sink: None,
        }
    }

    /// Runs the pipeline once, normalizing at the current local hour
    pub async fn run(&self) -> Result<RunOutcome, NormalizeError> {
        self.run_at(Local::now().hour() as usize).await
    }

    /// Runs the pipeline once, normalizing at the given local hour (0-23)
    ///
    /// `local_hour` selects the row of the hourly series used for the
    /// current-conditions record, so output differs across hours of the day
    /// even for an identical cached payload.
    pub async fn run_at(&self, local_hour: usize) -> Result<RunOutcome, NormalizeError> {
        let location = match self.geo.lookup(&self.settings.ipaddress).await {
            Ok(location) => location,
            Err(e) => {
                tracing::error!("Unable to resolve location: {}", e);
                return Ok(RunOutcome::LocationUnavailable);
            }
        };
        tracing::info!(
            city = %location.city,
            region = %location.region,
            country = %location.country,
            "Resolved location"
        );

        let payload = match self
            .forecast
            .fetch(&location.coordinates(), &self.scale, self.settings.update_time)
            .await
        {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Forecast unavailable: {}", e);
                return Ok(RunOutcome::ForecastUnavailable);
            }
        };

        let current = normalize::current(&payload, local_hour)?;
        let forecast = normalize::forecast(&payload)?;
        tracing::debug!(days = forecast.len(), "Normalized forecast payload");

        if self.settings.export_csv {
            self.export_csv(&current, &forecast);
        }
        if let Some(sink) = &self.sink {
            match sink.push(&current, &forecast) {
                Ok(()) => tracing::info!(sink = sink.name(), "Pushed records to display sink"),
                Err(e) => tracing::warn!(sink = sink.name(), "Display sink push failed: {}", e),
            }
        }

        Ok(RunOutcome::Completed { current, forecast })
    }

    /// Writes both CSV files, logging per-file outcomes
    fn export_csv(&self, current: &CurrentConditions, forecast: &[DailyForecastEntry]) {
        match export::write_current_csv(Path::new(CURRENT_CSV_FILE), current) {
            Ok(()) => tracing::info!(file = CURRENT_CSV_FILE, "Exported current conditions"),
            Err(e) => tracing::warn!(file = CURRENT_CSV_FILE, "CSV export failed: {}", e),
        }
        match export::write_forecast_csv(Path::new(FORECAST_CSV_FILE), forecast) {
            Ok(()) => tracing::info!(file = FORECAST_CSV_FILE, "Exported daily forecast"),
            Err(e) => tracing::warn!(file = FORECAST_CSV_FILE, "CSV export failed: {}", e),
        }
    }
}
