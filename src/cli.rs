//! Command-line interface parsing for the sun block finder
//!
//! This module handles parsing of CLI arguments using clap and turns them into
//! a validated [`RunConfig`].

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::data::weather::OPEN_METEO_BASE_URL;
use crate::data::{all_places, get_place_by_id, Location};
use crate::sunblock::{parse_num_hours, SearchError};

/// Preset used when no location is given
pub const DEFAULT_PLACE: &str = "brighton";

/// Error types for CLI argument handling
#[derive(Debug, Error)]
pub enum CliError {
    /// The named location is not one of the presets
    #[error("Invalid location: '{0}'. Valid locations: {valid}", valid = place_ids())]
    InvalidLocation(String),

    /// Only one of latitude/longitude was given
    #[error("Both --lat and --lon are required when giving coordinates")]
    IncompleteCoordinates,

    /// The hour count was rejected
    #[error(transparent)]
    Hours(#[from] SearchError),
}

fn place_ids() -> String {
    all_places()
        .iter()
        .map(|p| p.id)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Find the next block of sunshine lasting N hours at your location
#[derive(Parser, Debug)]
#[command(name = "sunblock")]
#[command(about = "Find the next block of sunshine lasting N hours")]
#[command(version)]
pub struct Cli {
    /// Length of the sun block in hours (1-23)
    #[arg(short = 'n', long, value_name = "N", default_value = "2", allow_negative_numbers = true)]
    pub hours: String,

    /// Preset location: oxford, newcastle, brighton
    #[arg(short, long, value_name = "NAME", conflicts_with_all = ["lat", "lon"])]
    pub location: Option<String>,

    /// Latitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Read the forecast from a saved Open-Meteo JSON file instead of the network
    #[arg(long, value_name = "PATH")]
    pub fixture: Option<PathBuf>,

    /// Forecast endpoint to query
    #[arg(long, value_name = "URL", default_value = OPEN_METEO_BASE_URL)]
    pub api_url: String,

    /// Only consider hours later than the current time in the forecast's timezone
    #[arg(long)]
    pub from_now: bool,

    /// Also report sunny hours and precipitation per day
    #[arg(long)]
    pub summary: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Log level when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,
}

/// Where the forecast comes from
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastSource {
    /// Query the Open-Meteo API at this base URL
    Api(String),
    /// Read a saved payload from disk
    Fixture(PathBuf),
}

/// Validated settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Where to look for sun
    pub location: Location,
    /// Display name when a preset was used
    pub place_name: Option<&'static str>,
    /// Requested sun block length
    pub num_hours: u32,
    /// Forecast source
    pub source: ForecastSource,
    /// Skip hours up to the current time
    pub from_now: bool,
    /// Include the per-day summary
    pub summary: bool,
    /// Emit JSON instead of text
    pub json: bool,
}

impl RunConfig {
    /// Creates a RunConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(RunConfig)` with the resolved location and hour count
    /// * `Err(CliError)` if the location or hour count is invalid
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let num_hours = parse_num_hours(&cli.hours)?;

        let (location, place_name) = match (&cli.location, cli.lat, cli.lon) {
            (Some(name), _, _) => {
                let place =
                    get_place_by_id(name).ok_or_else(|| CliError::InvalidLocation(name.clone()))?;
                (place.location, Some(place.name))
            }
            (None, Some(lat), Some(lon)) => (Location::new(lat, lon), None),
            (None, None, None) => {
                let place = get_place_by_id(DEFAULT_PLACE)
                    .ok_or_else(|| CliError::InvalidLocation(DEFAULT_PLACE.to_string()))?;
                (place.location, Some(place.name))
            }
            (None, _, _) => return Err(CliError::IncompleteCoordinates),
        };

        let source = match &cli.fixture {
            Some(path) => ForecastSource::Fixture(path.clone()),
            None => ForecastSource::Api(cli.api_url.clone()),
        };

        Ok(RunConfig {
            location,
            place_name,
            num_hours,
            source,
            from_now: cli.from_now,
            summary: cli.summary,
            json: cli.json,
        })
    }
}
