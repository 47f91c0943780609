//! Open-Meteo forecast client with a single-slot cache in front
//!
//! The fetch path is the request-rate bound of the whole pipeline: a fresh
//! cached payload is returned without touching the network, a stale or
//! absent one triggers exactly one request, and a failed request falls back
//! to whatever cached payload exists, however old.

use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cache::{is_fresh, CacheStore};
use crate::data::Coordinates;
use crate::units::UnitScale;

/// Base URL for the Open-Meteo API
const OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com";

/// Timeout applied to the forecast request
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Errors that can occur when fetching forecast data
#[derive(Debug, Error)]
pub enum ForecastError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse forecast response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The request failed and no cached payload exists to fall back on
    #[error("Forecast unavailable: {source} (no cached payload to fall back on)")]
    Unavailable {
        #[source]
        source: Box<ForecastError>,
    },
}

/// Raw forecast response from Open-Meteo
///
/// Held verbatim in the cache slot; the normalizer derives the flat output
/// records from it. Timestamps are epoch seconds (`timeformat=unixtime`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastPayload {
    /// Latitude the provider resolved the request to
    pub latitude: f64,
    /// Longitude the provider resolved the request to
    pub longitude: f64,
    /// Snapshot of the current weather
    pub current_weather: CurrentWeather,
    /// Hourly series for the forecast window
    pub hourly: HourlySeries,
    /// Daily series for the forecast window
    pub daily: DailySeries,
}

impl ForecastPayload {
    /// Observation time of the payload's current-weather snapshot, epoch
    /// seconds
    ///
    /// This embedded timestamp, not the wall-clock capture time, anchors the
    /// cache freshness window.
    pub fn observation_time(&self) -> i64 {
        self.current_weather.time
    }
}

/// Current weather snapshot from Open-Meteo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub windspeed: f64,
    pub winddirection: f64,
    pub weathercode: u8,
    /// Observation time, epoch seconds
    pub time: i64,
}

/// Hourly data arrays from Open-Meteo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<i64>,
    pub temperature_2m: Vec<f64>,
    pub relativehumidity_2m: Vec<f64>,
    pub visibility: Vec<f64>,
    pub apparent_temperature: Vec<f64>,
    pub windspeed_10m: Vec<f64>,
}

/// Daily data arrays from Open-Meteo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySeries {
    pub time: Vec<i64>,
    pub weathercode: Vec<u8>,
    pub temperature_2m_max: Vec<f64>,
    pub temperature_2m_min: Vec<f64>,
    pub precipitation_sum: Vec<f64>,
}

/// Client for fetching forecast data through the cache slot
///
/// The client is the only writer of the cache store it owns.
#[derive(Debug)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
    cache: CacheStore,
}

impl ForecastClient {
    /// Creates a new ForecastClient backed by the given cache store
    pub fn new(cache: CacheStore) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: OPEN_METEO_BASE_URL.to_string(),
            cache,
        })
    }

    /// Overrides the API base URL
    ///
    /// Useful for testing against a mock endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Produces a raw forecast payload for the given coordinates and scale
    ///
    /// Resolution order:
    /// 1. A cached payload fresh within `update_time` seconds is returned
    ///    with no network access.
    /// 2. Otherwise one request is issued; on success the payload is
    ///    persisted before it is returned, so the freshness window restarts
    ///    from the payload's embedded observation time.
    /// 3. On request failure any cached payload, stale included, is
    ///    returned; with no cache at all the failure is surfaced as
    ///    [`ForecastError::Unavailable`].
    pub async fn fetch(
        &self,
        coords: &Coordinates,
        scale: &UnitScale,
        update_time: u64,
    ) -> Result<ForecastPayload, ForecastError> {
        let now = Utc::now().timestamp();
        let cached = self.cache.load();

        if let Some(payload) = &cached {
            if is_fresh(payload, now, update_time) {
                tracing::debug!(
                    age_secs = now - payload.observation_time(),
                    "Reusing fresh cached forecast"
                );
                return Ok(payload.clone());
            }
            tracing::debug!(
                age_secs = now - payload.observation_time(),
                "Cached forecast is stale"
            );
        } else {
            tracing::debug!("No cached forecast found");
        }

        match self.request(coords, scale).await {
            Ok(payload) => {
                if let Err(e) = self.cache.save(&payload) {
                    tracing::warn!("Failed to write forecast cache: {}", e);
                }
                tracing::debug!("Fetched new forecast from provider");
                Ok(payload)
            }
            Err(e) => match cached {
                Some(stale) => {
                    tracing::warn!("Forecast request failed ({}); reusing stale cache", e);
                    Ok(stale)
                }
                None => Err(ForecastError::Unavailable {
                    source: Box::new(e),
                }),
            },
        }
    }

    /// Issues the forecast request
    async fn request(
        &self,
        coords: &Coordinates,
        scale: &UnitScale,
    ) -> Result<ForecastPayload, ForecastError> {
        let url = format!(
            "{}/v1/forecast?latitude={}&longitude={}&current_weather=true\
             &hourly=temperature_2m,relativehumidity_2m,visibility,apparent_temperature,windspeed_10m\
             &daily=weathercode,temperature_2m_max,temperature_2m_min,precipitation_sum\
             &temperature_unit={}&windspeed_unit={}&precipitation_unit={}\
             &timeformat=unixtime&timezone=auto",
            self.base_url,
            coords.latitude,
            coords.longitude,
            scale.temperature,
            scale.wind_speed,
            scale.precipitation,
        );

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let text = response.text().await?;
        let payload: ForecastPayload = serde_json::from_str(&text)?;
        Ok(payload)
    }
}
