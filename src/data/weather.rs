//! Open-Meteo forecast client
//!
//! This module fetches the raw hourly/daily forecast payload from the Open-Meteo
//! API, or loads the same payload from a file on disk.

use std::path::Path;

use log::{debug, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Location;

/// Base URL for the Open-Meteo API
pub const OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Raw forecast payload as returned by Open-Meteo
///
/// Timestamps are kept as the API's `YYYY-MM-DDTHH:MM` strings; the normalizer
/// parses them. Temperatures are in Fahrenheit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawForecast {
    /// Latitude of the grid cell the API resolved, if reported
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude of the grid cell the API resolved, if reported
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Offset of the payload's local timestamps from UTC
    #[serde(default)]
    pub utc_offset_seconds: Option<i32>,
    /// One entry per calendar day
    pub daily: DailySeries,
    /// One entry per hour, 24 per day
    pub hourly: HourlySeries,
}

/// Daily sunrise/sunset series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    pub sunrise: Vec<String>,
    pub sunset: Vec<String>,
}

/// Hourly series, aligned index by index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<String>,
    /// Temperature 2m above ground, Fahrenheit
    pub temperature_2m: Vec<f64>,
    /// Precipitation in millimeters
    pub precipitation: Vec<f64>,
    /// WMO weather code
    pub weather_code: Vec<u8>,
}

/// Errors that can occur when retrieving forecast data
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP body could not be read
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Forecast file could not be read
    #[error("Failed to read forecast file: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the Open-Meteo query URL for a location
///
/// The query asks for hourly temperature (in Fahrenheit), precipitation and
/// weather code plus daily sunrise and sunset.
pub fn openmeteo_api_url(base_url: &str, location: Location) -> String {
    format!(
        "{}?latitude={}&longitude={}&hourly=temperature_2m,precipitation,weather_code&daily=sunrise,sunset&temperature_unit=fahrenheit",
        base_url, location.latitude, location.longitude
    )
}

/// Client for fetching forecasts from the Open-Meteo API
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherClient {
    /// Create a new WeatherClient pointing at the public Open-Meteo API
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: OPEN_METEO_BASE_URL.to_string(),
        }
    }

    /// Create a new WeatherClient with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            base_url: OPEN_METEO_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different forecast endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the forecast for the given location
    ///
    /// # Returns
    /// * `Ok(Some(RawForecast))` - The payload was retrieved and parsed
    /// * `Ok(None)` - The API was unreachable or answered with a non-success status
    /// * `Err(WeatherError)` - The API answered but the body was unreadable or not a forecast
    pub async fn fetch_forecast(
        &self,
        location: Location,
    ) -> Result<Option<RawForecast>, WeatherError> {
        let url = openmeteo_api_url(&self.base_url, location);
        debug!("Fetching forecast from {}", url);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Forecast source unreachable at {}: {}", url, e);
                return Ok(None);
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("Forecast source returned {} for {}", status, url);
            return Ok(None);
        }

        let text = response.text().await?;
        let raw: RawForecast = serde_json::from_str(&text)?;
        debug!(
            "Received {} days / {} hours of forecast",
            raw.daily.sunrise.len(),
            raw.hourly.time.len()
        );
        Ok(Some(raw))
    }
}

/// Load a forecast payload saved from the Open-Meteo API
pub fn load_forecast_file(path: impl AsRef<Path>) -> Result<RawForecast, WeatherError> {
    let text = std::fs::read_to_string(path.as_ref())?;
    debug!("Loaded forecast file {}", path.as_ref().display());
    Ok(serde_json::from_str(&text)?)
}
