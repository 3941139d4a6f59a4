//! Temperature scale conversion
//!
//! Open-Meteo is queried in Fahrenheit; everything downstream works in Celsius.

use thiserror::Error;

/// Absolute zero on the Fahrenheit scale
pub const ABSOLUTE_ZERO_FAHRENHEIT: f64 = -459.67;

/// Absolute zero on the Celsius scale
pub const ABSOLUTE_ZERO_CELSIUS: f64 = -273.15;

/// Errors that can occur when converting a temperature
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConversionError {
    /// Value is NaN
    #[error("Invalid input: temperature is not a number")]
    NotANumber,

    /// Value is positive or negative infinity
    #[error("Invalid input: temperature {0} is not finite")]
    NotFinite(f64),

    /// Value is colder than absolute zero
    #[error("Invalid input: {0}°F is below absolute zero (-459.67°F)")]
    BelowAbsoluteZero(f64),
}

/// Convert a single Fahrenheit reading to Celsius.
///
/// # Returns
/// * `Ok(f64)` - The temperature in Celsius
/// * `Err(ConversionError)` - If the value is NaN, infinite, or below -459.67°F
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> Result<f64, ConversionError> {
    if fahrenheit.is_nan() {
        return Err(ConversionError::NotANumber);
    }
    if fahrenheit.is_infinite() {
        return Err(ConversionError::NotFinite(fahrenheit));
    }
    if fahrenheit < ABSOLUTE_ZERO_FAHRENHEIT {
        return Err(ConversionError::BelowAbsoluteZero(fahrenheit));
    }
    // Divide before scaling so values near f64::MAX stay finite.
    // Rounding can land a hair under -273.15 at the bound itself.
    let celsius = (fahrenheit - 32.0) / 9.0 * 5.0;
    if !celsius.is_finite() {
        return Err(ConversionError::NotFinite(fahrenheit));
    }
    Ok(celsius.max(ABSOLUTE_ZERO_CELSIUS))
}

/// Convert a series of Fahrenheit readings element-wise.
///
/// Every element is validated the same way as [`fahrenheit_to_celsius`];
/// the first invalid element aborts the whole conversion.
pub fn fahrenheit_to_celsius_all(values: &[f64]) -> Result<Vec<f64>, ConversionError> {
    values.iter().copied().map(fahrenheit_to_celsius).collect()
}
