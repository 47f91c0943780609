//! Exporters for the normalized weather records
//!
//! Exporters are read-only consumers of the finished records; the pipeline
//! logs their outcome and assumes nothing else about them.

pub mod csv;
pub mod rainmeter;

pub use csv::{write_current_csv, write_forecast_csv, CURRENT_CSV_FILE, FORECAST_CSV_FILE};
pub use rainmeter::{DisplaySink, RainmeterSink};
