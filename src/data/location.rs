//! IP geolocation client
//!
//! Resolves an IP address (or the caller's own public IP) to coordinates
//! via an ip-api.com lookup. A failed or malformed lookup is a soft
//! failure: the orchestrator logs it and ends the run without coordinates.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::Coordinates;

/// Base URL for the ip-api geolocation service
const IP_API_BASE_URL: &str = "http://ip-api.com";

/// Timeout applied to the geolocation request
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Errors that can occur when resolving a location
#[derive(Debug, Error)]
pub enum LocationError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse geolocation response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// A resolved location
///
/// Only the coordinates feed later pipeline stages; the place names are
/// carried for logging and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub country: String,
    pub region: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// The coordinates consumed by the forecast fetcher
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// ip-api response structure
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    country: String,
    #[serde(rename = "regionName")]
    region_name: String,
    city: String,
    lat: f64,
    lon: f64,
}

/// Client for the geolocation lookup
#[derive(Debug)]
pub struct GeoClient {
    client: Client,
    base_url: String,
}

impl GeoClient {
    /// Creates a new GeoClient with a bounded request timeout
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: IP_API_BASE_URL.to_string(),
        })
    }

    /// Overrides the API base URL
    ///
    /// Useful for testing against a mock endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Resolves an IP address to a location
    ///
    /// An empty `ip` resolves the caller's own public IP. Exactly one
    /// request is issued; there is no retry.
    pub async fn lookup(&self, ip: &str) -> Result<Location, LocationError> {
        let url = format!(
            "{}/json/{}?fields=country,regionName,city,lat,lon,query",
            self.base_url, ip
        );

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let text = response.text().await?;
        let raw: IpApiResponse = serde_json::from_str(&text)?;

        tracing::debug!(city = %raw.city, "Geolocation lookup succeeded");
        Ok(Location {
            country: raw.country,
            region: raw.region_name,
            city: raw.city,
            latitude: raw.lat,
            longitude: raw.lon,
        })
    }
}
