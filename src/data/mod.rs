//! Core data models for the sun block finder
//!
//! This module contains the value types that flow through the pipeline:
//! where to look, one normalized hour of forecast, and what was found.

pub mod locations;
pub mod weather;

pub use locations::{all_places, get_place_by_id, Place};
pub use weather::{openmeteo_api_url, RawForecast, WeatherClient, WeatherError};

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// WMO codes counted as a clear-ish sky: 0 (clear sky) and 1 (mainly clear)
pub const CLEARISH_SKY_WMO_CODES: [u8; 2] = [0, 1];

/// Status message reported when no run of qualifying hours exists
pub const NO_INTERVAL_MESSAGE: &str = "No sunny interval found";

/// A geographic position in signed decimal degrees
///
/// Values outside ±90/±180 are accepted as-is; Open-Meteo decides what to do with them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude coordinate
    pub latitude: f64,
    /// Longitude coordinate
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// One hour of normalized forecast data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourRecord {
    /// Local time at the start of the hour
    pub time: NaiveDateTime,
    /// Sunrise of the day this hour belongs to
    pub sunrise: NaiveDateTime,
    /// Sunset of the day this hour belongs to
    pub sunset: NaiveDateTime,
    /// Temperature in Celsius
    pub temperature_celsius: f64,
    /// Precipitation in millimeters
    pub precipitation_mm: f64,
    /// WMO weather code
    pub weather_code: u8,
}

impl HourRecord {
    /// Whether the hour lies between sunrise and sunset, both inclusive
    pub fn is_daylight(&self) -> bool {
        self.sunrise <= self.time && self.time <= self.sunset
    }

    /// Whether the sky is clear or mainly clear
    pub fn is_clearish(&self) -> bool {
        CLEARISH_SKY_WMO_CODES.contains(&self.weather_code)
    }

    /// Whether this hour can be part of a sun block
    pub fn qualifies(&self) -> bool {
        self.is_daylight() && self.is_clearish()
    }
}

/// Outcome of a sun block search
///
/// Either both `start` and `mean_temp_celsius` are present and `message` is
/// empty, or neither is present and `message` says why. The constructors are
/// the only way to build one, so a partial result cannot exist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SunBlockResult {
    num_hours: u32,
    start: Option<NaiveDateTime>,
    mean_temp_celsius: Option<f64>,
    message: String,
}

impl SunBlockResult {
    /// A sun block starting at `start` with the given mean temperature
    pub fn found(num_hours: u32, start: NaiveDateTime, mean_temp_celsius: f64) -> Self {
        Self {
            num_hours,
            start: Some(start),
            mean_temp_celsius: Some(mean_temp_celsius),
            message: String::new(),
        }
    }

    /// No qualifying run of `num_hours` hours exists
    pub fn not_found(num_hours: u32) -> Self {
        Self {
            num_hours,
            start: None,
            mean_temp_celsius: None,
            message: NO_INTERVAL_MESSAGE.to_string(),
        }
    }

    pub fn num_hours(&self) -> u32 {
        self.num_hours
    }

    pub fn start(&self) -> Option<NaiveDateTime> {
        self.start
    }

    pub fn mean_temp_celsius(&self) -> Option<f64> {
        self.mean_temp_celsius
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_found(&self) -> bool {
        self.start.is_some()
    }
}

impl fmt::Display for SunBlockResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.start, self.mean_temp_celsius) {
            (Some(start), Some(mean)) if self.message.is_empty() => write!(
                f,
                "Found sun block of {} hours, starting at: {}, mean temperature is {:.1}°C",
                self.num_hours, start, mean
            ),
            _ => f.write_str(&self.message),
        }
    }
}

/// Sunshine and rain totals for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    /// The calendar day
    pub date: NaiveDate,
    /// Number of qualifying (daylight, clear-ish) hours
    pub sunny_hours: u32,
    /// Total precipitation over the day in millimeters
    pub precipitation_mm: f64,
}

impl fmt::Display for DaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} sunny hours, {:.1} mm precipitation",
            self.date, self.sunny_hours, self.precipitation_mm
        )
    }
}
