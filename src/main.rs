//! skyfetch - fetch, cache, and export local weather
//!
//! A single-run pipeline: geolocate the machine's IP, fetch an Open-Meteo
//! forecast through a single-slot on-disk cache, normalize the payload into
//! flat records, and export them to CSV and/or a Rainmeter display.

use clap::Parser;

use skyfetch::app::{Pipeline, RunOutcome};
use skyfetch::cli::Cli;
use skyfetch::config::Settings;

/// Initializes the log subscriber
///
/// `RUST_LOG` wins when set; otherwise `debug` selects between DEBUG and
/// INFO as the default level for this crate.
fn init_tracing(debug: bool) {
    let default_filter = if debug { "skyfetch=debug" } else { "skyfetch=info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = Settings::load(&cli.config_path())?;
    init_tracing(settings.debug_mode || cli.debug);
    tracing::debug!("Configuration loaded");

    let pipeline = Pipeline::new(settings)?;

    // Degraded runs are logged and end cleanly; only a payload failing
    // integrity checks is reported as an error, since it points at a
    // provider schema change rather than a transient fault.
    match pipeline.run().await {
        Ok(RunOutcome::Completed { current, forecast }) => {
            tracing::info!(
                temperature = current.temperature,
                weather_code = current.weather_code,
                forecast_days = forecast.len(),
                "Weather updated"
            );
        }
        Ok(RunOutcome::LocationUnavailable) => {
            tracing::warn!("Run ended early: location unavailable");
        }
        Ok(RunOutcome::ForecastUnavailable) => {
            tracing::warn!("Run ended early: forecast unavailable");
        }
        Err(e) => {
            tracing::error!("Payload failed integrity checks: {}", e);
        }
    }

    Ok(())
}
