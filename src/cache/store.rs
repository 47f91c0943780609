//! On-disk store for the most recent forecast payload
//!
//! Provides a `CacheStore` that owns the single cache file, plus the
//! freshness predicate used by the fetch path.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::data::ForecastPayload;

/// File name of the single-slot cache, relative to the working directory
pub const CACHE_FILE: &str = "weather_cache.json";

/// Owns the single cache file holding the last-fetched raw payload
///
/// There is no versioning and no per-location keying; a refresh simply
/// overwrites the slot. Two overlapping invocations can race on the file —
/// an accepted limitation of a best-effort, single-slot cache.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Location of the cache file
    path: PathBuf,
}

impl CacheStore {
    /// Creates a store backed by `weather_cache.json` in the working directory
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(CACHE_FILE),
        }
    }

    /// Creates a store backed by a specific file
    ///
    /// Useful for testing or when a specific cache location is needed.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the path of the cache file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the persisted payload
    ///
    /// Returns `None` if the file does not exist or its contents are not a
    /// valid payload; a parse failure is treated identically to absence.
    pub fn load(&self) -> Option<ForecastPayload> {
        let contents = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Overwrites the persisted payload
    ///
    /// The contents are written pretty-printed for inspectability, in a
    /// single scoped write-then-close so a concurrent reader never observes
    /// a half-written file.
    pub fn save(&self, payload: &ForecastPayload) -> io::Result<()> {
        let json = serde_json::to_string_pretty(payload)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, json)
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}

/// True iff the payload's embedded observation time is within
/// `update_time` seconds of `now`
///
/// The comparison is strict: a payload exactly `update_time` seconds old is
/// stale. Freshness derives from the payload's own `current_weather.time`,
/// not from when the file was written.
pub fn is_fresh(payload: &ForecastPayload, now: i64, update_time: u64) -> bool {
    now - payload.observation_time() < update_time as i64
}
