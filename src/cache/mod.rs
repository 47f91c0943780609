//! Single-slot cache for the raw forecast payload
//!
//! This module persists the most recent forecast response to one JSON file
//! in the working directory. Freshness is judged against the payload's own
//! observation timestamp, so the request-rate bound survives process
//! restarts. A missing or corrupt file is a normal cold start, never an
//! error.

mod store;

pub use store::{is_fresh, CacheStore, CACHE_FILE};
