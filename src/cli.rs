//! Command-line interface parsing for skyfetch
//!
//! The CLI carries only what varies between invocations of the same
//! install: the config file location and a debug-logging override.

use clap::Parser;
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_FILE;

/// skyfetch - fetch, cache, and export local weather
#[derive(Parser, Debug)]
#[command(name = "skyfetch")]
#[command(about = "Fetch, cache, and export local weather geolocated by IP")]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults to skyfetch.toml in the
    /// working directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Raise the default log level to DEBUG, same as debug_mode in the
    /// config file
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// The config file path to load, explicit or default
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }
}
