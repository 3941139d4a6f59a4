//! Turns a raw forecast payload into a flat per-hour table
//!
//! Each day's sunrise and sunset are broadcast onto that day's 24 hourly rows
//! (hour `i` belongs to day `i / 24`) and temperatures are converted to Celsius.
//! Row order follows the payload exactly.

use chrono::NaiveDateTime;
use log::debug;
use thiserror::Error;

use crate::convert::{fahrenheit_to_celsius_all, ConversionError};
use crate::data::{HourRecord, RawForecast};

/// Hours covered by one daily sunrise/sunset entry
pub const HOURS_PER_DAY: usize = 24;

/// Timestamp format used by Open-Meteo, e.g. "2024-08-23T11:00"
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Errors that can occur when normalizing a forecast payload
#[derive(Debug, Error, PartialEq)]
pub enum NormalizeError {
    /// The payload's series do not line up
    #[error("Misaligned forecast series: {0}")]
    MisalignedSeries(String),

    /// Invalid time format in payload
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),

    /// A temperature could not be converted
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// Normalize a raw forecast into one [`HourRecord`] per hour.
///
/// A missing payload (the fetch failed) yields `Ok(None)`; the caller decides
/// what "no data" means. The returned table always has exactly as many rows as
/// the payload has hourly timestamps.
pub fn normalize(raw: Option<RawForecast>) -> Result<Option<Vec<HourRecord>>, NormalizeError> {
    let Some(raw) = raw else {
        debug!("No forecast payload to normalize");
        return Ok(None);
    };

    let daily = &raw.daily;
    let hourly = &raw.hourly;
    let len = hourly.time.len();

    if hourly.temperature_2m.len() != len
        || hourly.precipitation.len() != len
        || hourly.weather_code.len() != len
    {
        return Err(NormalizeError::MisalignedSeries(
            "hourly arrays have inconsistent lengths".to_string(),
        ));
    }
    if daily.sunrise.len() != daily.sunset.len() {
        return Err(NormalizeError::MisalignedSeries(
            "daily sunrise and sunset arrays have inconsistent lengths".to_string(),
        ));
    }
    if len != daily.sunrise.len() * HOURS_PER_DAY {
        return Err(NormalizeError::MisalignedSeries(format!(
            "expected {} hourly entries for {} days, found {}",
            daily.sunrise.len() * HOURS_PER_DAY,
            daily.sunrise.len(),
            len
        )));
    }

    let sunrises = parse_all(&daily.sunrise)?;
    let sunsets = parse_all(&daily.sunset)?;
    let temperatures = fahrenheit_to_celsius_all(&hourly.temperature_2m)?;

    let mut table = Vec::with_capacity(len);
    for i in 0..len {
        let day = i / HOURS_PER_DAY;
        table.push(HourRecord {
            time: parse_datetime(&hourly.time[i])?,
            sunrise: sunrises[day],
            sunset: sunsets[day],
            temperature_celsius: temperatures[i],
            precipitation_mm: hourly.precipitation[i],
            weather_code: hourly.weather_code[i],
        });
    }

    debug!("Normalized {} days into {} hourly rows", sunrises.len(), table.len());
    Ok(Some(table))
}

/// Parse a timestamp in Open-Meteo's ISO 8601 local format
pub fn parse_datetime(datetime_str: &str) -> Result<NaiveDateTime, NormalizeError> {
    NaiveDateTime::parse_from_str(datetime_str, TIMESTAMP_FORMAT)
        .map_err(|_| NormalizeError::InvalidTimeFormat(datetime_str.to_string()))
}

fn parse_all(values: &[String]) -> Result<Vec<NaiveDateTime>, NormalizeError> {
    values.iter().map(|s| parse_datetime(s)).collect()
}
