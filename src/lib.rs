//! Sunblock Library
//!
//! Finds the next block of N consecutive clear, daylight hours at a location
//! from an Open-Meteo hourly forecast.

pub mod app;
pub mod cli;
pub mod convert;
pub mod data;
pub mod normalize;
pub mod sunblock;

pub use convert::{fahrenheit_to_celsius, fahrenheit_to_celsius_all, ConversionError};
pub use data::{HourRecord, Location, SunBlockResult};
pub use normalize::{normalize, NormalizeError};
pub use sunblock::{find_run, find_run_after, sun_precip_summary, SearchError};
