//! Configuration loading for skyfetch
//!
//! Settings are read from a TOML file in the working directory and passed
//! explicitly to each component at construction; there is no ambient or
//! module-level configuration state.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "skyfetch.toml";

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read
    #[error("Failed to read config file {path}: {source}")]
    Unreadable {
        path: String,
        source: std::io::Error,
    },

    /// The config file exists but is not valid TOML
    #[error("Failed to parse config file {path}: {source}")]
    Invalid {
        path: String,
        source: toml::de::Error,
    },
}

/// Runtime settings for one pipeline invocation
///
/// Every field has a default so a missing config file is a valid cold start.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Minimum seconds between forecast requests; cached data younger than
    /// this is reused without network access
    pub update_time: u64,
    /// IP address to geolocate; empty string resolves the caller's own
    /// public IP
    pub ipaddress: String,
    /// Write weathercurrent.csv / weatherforecast.csv after a successful run
    pub export_csv: bool,
    /// Push the finished records to the Rainmeter display sink
    pub rainmeter_ctrl: bool,
    /// Raise the default log level to DEBUG
    pub debug_mode: bool,
    /// Measurement scale token; only the exact value "imperial" selects
    /// imperial units
    pub preferred_scale: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            update_time: 3600,
            ipaddress: String::new(),
            export_csv: false,
            rainmeter_ctrl: false,
            debug_mode: false,
            preferred_scale: "metric".to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from the given path, or returns defaults if the file
    /// does not exist.
    ///
    /// A present-but-invalid file is an error; the caller reports it and the
    /// process ends cleanly rather than running with half-applied settings.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Invalid {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, contents).expect("Failed to write test config");
        path
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let settings = Settings::load(&dir.path().join("nonexistent.toml"))
            .expect("Missing file should yield defaults");

        assert_eq!(settings.update_time, 3600);
        assert_eq!(settings.ipaddress, "");
        assert!(!settings.export_csv);
        assert!(!settings.rainmeter_ctrl);
        assert!(!settings.debug_mode);
        assert_eq!(settings.preferred_scale, "metric");
    }

    #[test]
    fn test_full_config_parses() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = write_config(
            &dir,
            r#"
update_time = 1800
ipaddress = "203.0.113.7"
export_csv = true
rainmeter_ctrl = true
debug_mode = true
preferred_scale = "imperial"
"#,
        );

        let settings = Settings::load(&path).expect("Config should parse");
        assert_eq!(settings.update_time, 1800);
        assert_eq!(settings.ipaddress, "203.0.113.7");
        assert!(settings.export_csv);
        assert!(settings.rainmeter_ctrl);
        assert!(settings.debug_mode);
        assert_eq!(settings.preferred_scale, "imperial");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = write_config(&dir, "update_time = 600\n");

        let settings = Settings::load(&path).expect("Config should parse");
        assert_eq!(settings.update_time, 600);
        assert_eq!(settings.preferred_scale, "metric");
        assert!(!settings.export_csv);
    }

    #[test]
    fn test_unrecognized_scale_is_carried_verbatim() {
        // Scale resolution happens downstream; the config layer does not
        // validate the token.
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = write_config(&dir, "preferred_scale = \"Imperial\"\n");

        let settings = Settings::load(&path).expect("Config should parse");
        assert_eq!(settings.preferred_scale, "Imperial");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = write_config(&dir, "update_time = \"not a number");

        let result = Settings::load(&path);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
