//! Error types for the sdg_forecast crate

use crate::indicators::Indicator;
use polars::prelude::PolarsError;
use sdg_math::MathError;
use thiserror::Error;

/// Custom error types for the sdg_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// A required file or column is absent; fatal for the whole run
    #[error("Missing data: {0}")]
    MissingData(String),

    /// Input is present but malformed
    #[error("Data error: {0}")]
    DataError(String),

    /// Too few usable historical rows to fit one indicator's model for one country
    #[error(
        "Insufficient training data for {indicator} in {country}: {rows} usable rows, {required} required"
    )]
    InsufficientTrainingData {
        country: String,
        indicator: Indicator,
        rows: usize,
        required: usize,
    },

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error in the engine configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error from mathematical operations
    #[error("Math error: {0}")]
    MathError(#[from] MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),

    /// Error while writing CSV output
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Error while reading JSON configuration
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ForecastError {
    /// Whether the error only affects a single country/indicator pair
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ForecastError::InsufficientTrainingData { .. } | ForecastError::MathError(_)
        )
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::PolarsError(err.to_string())
    }
}

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::CsvError(err.to_string())
    }
}
