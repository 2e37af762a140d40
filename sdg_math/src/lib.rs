//! # SDG Math
//!
//! Numeric building blocks for indicator forecasting.
//! This crate provides ordinary least squares regression over an arbitrary
//! number of features and the accuracy metrics used to score forecasts
//! against observed values.

use thiserror::Error;

pub mod accuracy;
pub mod regression;

pub use accuracy::{forecast_accuracy, ForecastAccuracy};
pub use regression::OrdinaryLeastSquares;

/// Errors that can occur in numeric calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for numeric operations
pub type Result<T> = std::result::Result<T, MathError>;

/// Round a value to the given number of decimal places.
///
/// ```
/// assert_eq!(sdg_math::round_to(2.345_6, 2), 2.35);
/// assert_eq!(sdg_math::round_to(-1.004, 2), -1.0);
/// ```
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
