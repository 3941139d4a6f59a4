//! One end-to-end run: fetch, normalize, search, render
//!
//! Everything here is a thin wrapper around the library's pipeline so the binary
//! and the integration tests drive exactly the same code.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use log::info;
use serde::Serialize;
use thiserror::Error;

use crate::cli::{ForecastSource, RunConfig};
use crate::data::weather::load_forecast_file;
use crate::data::{DaySummary, Location, RawForecast, SunBlockResult, WeatherClient, WeatherError};
use crate::normalize::{normalize, NormalizeError};
use crate::sunblock::{find_run_after, sun_precip_summary, SearchError};

/// Errors that end a run
#[derive(Debug, Error)]
pub enum AppError {
    /// The forecast source gave no data
    #[error("Error fetching data for {}, {}", .0.latitude, .0.longitude)]
    FetchUnavailable(Location),

    #[error(transparent)]
    Weather(#[from] WeatherError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error(transparent)]
    Search(#[from] SearchError),

    /// The report could not be rendered as JSON
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything a run produces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub result: SunBlockResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Vec<DaySummary>>,
}

impl Report {
    /// Render as plain text: the result line, then one line per summarized day
    pub fn to_text(&self) -> String {
        let mut out = self.result.to_string();
        if let Some(days) = &self.summary {
            for day in days {
                out.push('\n');
                out.push_str(&day.to_string());
            }
        }
        out
    }

    pub fn to_json(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Retrieve the raw forecast from the configured source
pub async fn load_forecast(config: &RunConfig) -> Result<Option<RawForecast>, WeatherError> {
    match &config.source {
        ForecastSource::Fixture(path) => load_forecast_file(path).map(Some),
        ForecastSource::Api(base_url) => {
            WeatherClient::new()
                .with_base_url(base_url.as_str())
                .fetch_forecast(config.location)
                .await
        }
    }
}

/// Wall-clock time in the forecast's own timezone
///
/// Open-Meteo timestamps are local to the timezone it was asked for (GMT when
/// none is given), with `utc_offset_seconds` saying how far that is from UTC.
/// A payload without the field is treated as GMT.
pub fn forecast_now(utc_offset_seconds: Option<i32>, now: DateTime<Utc>) -> NaiveDateTime {
    now.naive_utc() + Duration::seconds(i64::from(utc_offset_seconds.unwrap_or(0)))
}

/// Search an already retrieved forecast according to `config`
pub fn build_report(config: &RunConfig, raw: Option<RawForecast>) -> Result<Report, AppError> {
    let utc_offset_seconds = raw.as_ref().and_then(|r| r.utc_offset_seconds);
    let table = normalize(raw)?.ok_or(AppError::FetchUnavailable(config.location))?;

    let not_before = config
        .from_now
        .then(|| forecast_now(utc_offset_seconds, Utc::now()));
    let result = find_run_after(&table, i64::from(config.num_hours), not_before)?;
    info!(
        "Search for {} hours at {}: {}",
        config.num_hours,
        config.place_name.unwrap_or("custom location"),
        if result.is_found() { "found" } else { "not found" }
    );

    let summary = config.summary.then(|| sun_precip_summary(&table));
    Ok(Report { result, summary })
}

/// Run the whole pipeline and render the output the way the config asks
pub async fn run(config: &RunConfig) -> Result<String, AppError> {
    let raw = load_forecast(config).await?;
    let report = build_report(config, raw)?;
    if config.json {
        report.to_json()
    } else {
        Ok(report.to_text())
    }
}
