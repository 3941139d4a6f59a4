//! Sun block search over a normalized hourly table
//!
//! An hour qualifies when it falls between its day's sunrise and sunset and the
//! sky is clear or mainly clear. The search reports the first run of
//! `num_hours` consecutive qualifying hours.

use std::fmt;

use chrono::NaiveDateTime;
use log::debug;
use thiserror::Error;

use crate::data::{DaySummary, HourRecord, SunBlockResult};

/// Smallest block length that can be searched for
pub const MIN_HOURS: i64 = 1;

/// Largest block length that can be searched for; a full day never fits in daylight
pub const MAX_HOURS: i64 = 23;

/// Which end of the allowed hour range was violated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourBound {
    /// Fewer than the minimum number of hours
    Lower,
    /// More than the maximum number of hours
    Upper,
}

impl fmt::Display for HourBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HourBound::Lower => write!(f, "below the minimum of {}", MIN_HOURS),
            HourBound::Upper => write!(f, "above the maximum of {}", MAX_HOURS),
        }
    }
}

/// Errors raised for a malformed search request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Hour count outside the allowed range
    #[error("Invalid argument: number of hours {value} is {bound}")]
    InvalidArgument { value: i64, bound: HourBound },

    /// Hour count is not an integer
    #[error("Type mismatch: number of hours must be an integer, got '{0}'")]
    TypeMismatch(String),
}

/// Check that an hour count lies in the searchable range
pub fn validate_num_hours(num_hours: i64) -> Result<u32, SearchError> {
    if num_hours < MIN_HOURS {
        return Err(SearchError::InvalidArgument {
            value: num_hours,
            bound: HourBound::Lower,
        });
    }
    if num_hours > MAX_HOURS {
        return Err(SearchError::InvalidArgument {
            value: num_hours,
            bound: HourBound::Upper,
        });
    }
    // Range check above guarantees this fits
    Ok(num_hours as u32)
}

/// Parse an hour count from text, then range-check it
///
/// # Returns
/// * `Ok(u32)` - A valid hour count
/// * `Err(SearchError::TypeMismatch)` - The text is not an integer (e.g. "2.5")
/// * `Err(SearchError::InvalidArgument)` - The integer is outside 1..=23
pub fn parse_num_hours(s: &str) -> Result<u32, SearchError> {
    let value: i64 = s
        .trim()
        .parse()
        .map_err(|_| SearchError::TypeMismatch(s.to_string()))?;
    validate_num_hours(value)
}

/// Find the first run of `num_hours` consecutive qualifying hours.
///
/// The reported mean temperature covers the rows `start..=start + num_hours`,
/// one row past the matched run, clipped at the end of the table. This keeps
/// results comparable with earlier reports from this tool.
pub fn find_run(table: &[HourRecord], num_hours: i64) -> Result<SunBlockResult, SearchError> {
    find_run_after(table, num_hours, None)
}

/// Like [`find_run`], but hours at or before `not_before` never qualify.
pub fn find_run_after(
    table: &[HourRecord],
    num_hours: i64,
    not_before: Option<NaiveDateTime>,
) -> Result<SunBlockResult, SearchError> {
    let num_hours = validate_num_hours(num_hours)?;
    let wanted = num_hours as usize;

    let qualifies = |record: &HourRecord| {
        record.qualifies() && not_before.is_none_or(|cutoff| record.time > cutoff)
    };

    let mut streak = 0;
    let mut start = None;
    for (pos, record) in table.iter().enumerate() {
        if qualifies(record) {
            streak += 1;
            if streak == wanted {
                start = Some(pos + 1 - wanted);
                break;
            }
        } else {
            streak = 0;
        }
    }

    let Some(idx) = start else {
        debug!("No run of {} sunny hours in {} rows", num_hours, table.len());
        return Ok(SunBlockResult::not_found(num_hours));
    };

    let end = (idx + wanted).min(table.len() - 1);
    let window = &table[idx..=end];
    let mean = window.iter().map(|r| r.temperature_celsius).sum::<f64>() / window.len() as f64;

    debug!(
        "Found {} sunny hours from row {} ({}), mean {:.2}°C over {} rows",
        num_hours,
        idx,
        table[idx].time,
        mean,
        window.len()
    );
    Ok(SunBlockResult::found(num_hours, table[idx].time, mean))
}

/// Total qualifying hours and precipitation for each calendar day in the table
///
/// Days appear in the order they are first seen.
pub fn sun_precip_summary(table: &[HourRecord]) -> Vec<DaySummary> {
    let mut summaries: Vec<DaySummary> = Vec::new();
    for record in table {
        let date = record.time.date();
        let summary = match summaries.iter().position(|s| s.date == date) {
            Some(i) => &mut summaries[i],
            None => {
                summaries.push(DaySummary {
                    date,
                    sunny_hours: 0,
                    precipitation_mm: 0.0,
                });
                let last = summaries.len() - 1;
                &mut summaries[last]
            }
        };
        if record.qualifies() {
            summary.sunny_hours += 1;
        }
        summary.precipitation_mm += record.precipitation_mm;
    }
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }

    /// One day of rows from a string of weather codes per hour, sunrise 06:00,
    /// sunset 20:00, temperature equal to the hour of day
    fn day(date: &str, codes: &[u8; 24]) -> Vec<HourRecord> {
        codes
            .iter()
            .enumerate()
            .map(|(h, &code)| HourRecord {
                time: at(&format!("{}T{:02}:00", date, h)),
                sunrise: at(&format!("{}T06:00", date)),
                sunset: at(&format!("{}T20:00", date)),
                temperature_celsius: h as f64,
                precipitation_mm: if code >= 61 { 0.5 } else { 0.0 },
                weather_code: code,
            })
            .collect()
    }

    const OVERCAST: [u8; 24] = [3; 24];

    fn codes_with_clear(hours: std::ops::Range<usize>) -> [u8; 24] {
        let mut codes = OVERCAST;
        for h in hours {
            codes[h] = 0;
        }
        codes
    }

    #[test]
    fn test_rejects_out_of_range_hours() {
        let table = day("2024-08-23", &OVERCAST);
        assert_eq!(
            find_run(&table, 0),
            Err(SearchError::InvalidArgument {
                value: 0,
                bound: HourBound::Lower
            })
        );
        assert_eq!(
            find_run(&table, 24),
            Err(SearchError::InvalidArgument {
                value: 24,
                bound: HourBound::Upper
            })
        );
        assert!(matches!(
            find_run(&table, -3),
            Err(SearchError::InvalidArgument {
                bound: HourBound::Lower,
                ..
            })
        ));
    }

    #[test]
    fn test_accepts_range_ends() {
        let table = day("2024-08-23", &OVERCAST);
        assert!(find_run(&table, 1).is_ok());
        assert!(find_run(&table, 23).is_ok());
    }

    #[test]
    fn test_invalid_argument_message_names_bound() {
        let err = find_run(&[], 24).unwrap_err();
        assert!(err.to_string().contains("maximum of 23"));
        let err = find_run(&[], 0).unwrap_err();
        assert!(err.to_string().contains("minimum of 1"));
    }

    #[test]
    fn test_parse_num_hours() {
        assert_eq!(parse_num_hours("3"), Ok(3));
        assert_eq!(parse_num_hours(" 23 "), Ok(23));
        assert_eq!(
            parse_num_hours("2.5"),
            Err(SearchError::TypeMismatch("2.5".to_string()))
        );
        assert!(matches!(
            parse_num_hours("three"),
            Err(SearchError::TypeMismatch(_))
        ));
        assert!(matches!(
            parse_num_hours("0"),
            Err(SearchError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_empty_table_has_no_run() {
        assert_eq!(find_run(&[], 3), Ok(SunBlockResult::not_found(3)));
    }

    #[test]
    fn test_table_shorter_than_run() {
        let table = day("2024-08-23", &codes_with_clear(6..21));
        assert_eq!(find_run(&table[10..12], 3), Ok(SunBlockResult::not_found(3)));
    }

    #[test]
    fn test_no_match_result() {
        let table = day("2024-08-23", &codes_with_clear(10..12));
        let result = find_run(&table, 3).unwrap();
        assert_eq!(result.num_hours(), 3);
        assert!(result.start().is_none());
        assert!(result.mean_temp_celsius().is_none());
        assert_eq!(result.message(), "No sunny interval found");
    }

    #[test]
    fn test_finds_first_run() {
        let mut table = day("2024-08-23", &codes_with_clear(9..12));
        table.extend(day("2024-08-24", &codes_with_clear(8..16)));

        let result = find_run(&table, 3).unwrap();
        assert_eq!(result.start(), Some(at("2024-08-23T09:00")));

        let result = find_run(&table, 4).unwrap();
        assert_eq!(result.start(), Some(at("2024-08-24T08:00")));
    }

    #[test]
    fn test_mean_spans_one_row_past_the_run() {
        // Clear 09..12 on an hour-of-day temperature ramp: rows 9, 10, 11 and 12
        let table = day("2024-08-23", &codes_with_clear(9..12));
        let result = find_run(&table, 3).unwrap();
        let mean = result.mean_temp_celsius().unwrap();
        assert!((mean - (9.0 + 10.0 + 11.0 + 12.0) / 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_mean_window_clipped_at_table_end() {
        let table = day("2024-08-23", &codes_with_clear(6..21));
        let result = find_run(&table[..13], 3).unwrap();
        assert_eq!(result.start(), Some(at("2024-08-23T06:00")));
        let mean = result.mean_temp_celsius().unwrap();
        assert!((mean - (6.0 + 7.0 + 8.0 + 9.0) / 4.0).abs() < 1e-9);

        // Run ends on the final row, so there is no row past it
        let result = find_run(&table[6..9], 3).unwrap();
        let mean = result.mean_temp_celsius().unwrap();
        assert!((mean - (6.0 + 7.0 + 8.0) / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_mainly_clear_qualifies() {
        let mut codes = OVERCAST;
        codes[12] = 1;
        codes[13] = 0;
        let table = day("2024-08-23", &codes);
        let result = find_run(&table, 2).unwrap();
        assert_eq!(result.start(), Some(at("2024-08-23T12:00")));
    }

    #[test]
    fn test_clear_night_does_not_qualify() {
        // Clear from midnight to 05:00 and after 21:00, overcast all day
        let mut codes = [0u8; 24];
        for code in codes.iter_mut().take(21).skip(6) {
            *code = 3;
        }
        let table = day("2024-08-23", &codes);
        assert!(!find_run(&table, 2).unwrap().is_found());
    }

    #[test]
    fn test_run_may_touch_sunrise_and_sunset() {
        let table = day("2024-08-23", &codes_with_clear(0..24));
        let result = find_run(&table, 15).unwrap();
        assert_eq!(result.start(), Some(at("2024-08-23T06:00")));
        assert!(!find_run(&table, 16).unwrap().is_found());
    }

    #[test]
    fn test_run_does_not_cross_night() {
        let mut table = day("2024-08-23", &codes_with_clear(0..24));
        table.extend(day("2024-08-24", &codes_with_clear(0..24)));
        // 15 daylight hours per day, separated by the night
        assert!(!find_run(&table, 16).unwrap().is_found());
    }

    #[test]
    fn test_not_before_cutoff() {
        let mut table = day("2024-08-23", &codes_with_clear(9..13));
        table.extend(day("2024-08-24", &codes_with_clear(14..17)));

        let result = find_run_after(&table, 3, Some(at("2024-08-23T09:30"))).unwrap();
        assert_eq!(result.start(), Some(at("2024-08-23T10:00")));

        // The cutoff hour itself is excluded
        let result = find_run_after(&table, 3, Some(at("2024-08-23T10:00"))).unwrap();
        assert_eq!(result.start(), Some(at("2024-08-24T14:00")));

        let result = find_run_after(&table, 3, Some(at("2024-08-25T00:00"))).unwrap();
        assert!(!result.is_found());
    }

    #[test]
    fn test_not_before_none_matches_find_run() {
        let table = day("2024-08-23", &codes_with_clear(9..13));
        assert_eq!(find_run_after(&table, 2, None), find_run(&table, 2));
    }

    #[test]
    fn test_sun_precip_summary() {
        let mut codes = codes_with_clear(9..12);
        codes[15] = 61;
        codes[16] = 63;
        let mut table = day("2024-08-23", &codes);
        table.extend(day("2024-08-24", &codes_with_clear(0..24)));

        let summary = sun_precip_summary(&table);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].date, NaiveDate::from_ymd_opt(2024, 8, 23).unwrap());
        assert_eq!(summary[0].sunny_hours, 3);
        assert!((summary[0].precipitation_mm - 1.0).abs() < 1e-9);
        assert_eq!(summary[1].sunny_hours, 15);
        assert!(summary[1].precipitation_mm.abs() < 1e-9);
    }

    #[test]
    fn test_sun_precip_summary_empty() {
        assert!(sun_precip_summary(&[]).is_empty());
    }
}
