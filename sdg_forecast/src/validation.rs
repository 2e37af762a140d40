//! Backtesting of the per-indicator models
//!
//! Models are trained on the years up to a cutoff and scored one step ahead on
//! the later years, using the observed lag values of each test year.

use crate::data::ObservationTable;
use crate::error::{ForecastError, Result};
use crate::features::{build_lagged_rows, LaggedRow};
use crate::indicators::{Indicator, IndicatorCatalog};
use crate::models::ModelFitter;
use log::{debug, info};
use sdg_math::{forecast_accuracy, ForecastAccuracy};
use std::cmp::Ordering;

/// Default last training year
pub const DEFAULT_CUTOFF_YEAR: i32 = 2019;
/// Default minimum number of complete training rows per country
pub const DEFAULT_MIN_TRAIN_ROWS: usize = 5;

/// Out-of-sample error of one country/indicator model
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub country: String,
    pub indicator: Indicator,
    /// Error metrics over the test years
    pub accuracy: ForecastAccuracy,
    /// Number of test years scored
    pub test_points: usize,
}

/// Average error of one indicator across countries
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSummary {
    pub indicator: Indicator,
    pub mean_mae: f64,
    pub mean_rmse: f64,
    pub countries: usize,
}

/// Splits each country's history at a cutoff year and scores the fitted models
#[derive(Debug, Clone, Copy)]
pub struct Backtester<'a> {
    catalog: &'a IndicatorCatalog,
    cutoff_year: i32,
    min_train_rows: usize,
}

impl<'a> Backtester<'a> {
    /// Create a backtester training on years up to and including `cutoff_year`
    pub fn new(catalog: &'a IndicatorCatalog, cutoff_year: i32) -> Self {
        Self {
            catalog,
            cutoff_year,
            min_train_rows: DEFAULT_MIN_TRAIN_ROWS,
        }
    }

    /// Change the minimum number of complete training rows
    pub fn with_min_train_rows(mut self, rows: usize) -> Result<Self> {
        if rows == 0 {
            return Err(ForecastError::InvalidParameter(
                "minimum training rows must be positive".to_string(),
            ));
        }
        self.min_train_rows = rows;
        Ok(self)
    }

    /// Last training year
    pub fn cutoff_year(&self) -> i32 {
        self.cutoff_year
    }

    /// Backtest every country in the table
    pub fn run(&self, table: &ObservationTable) -> Vec<ValidationResult> {
        let results: Vec<ValidationResult> = table
            .countries()
            .iter()
            .flat_map(|country| self.backtest_country(table, country))
            .collect();

        info!(
            "Backtested {} models with cutoff {}",
            results.len(),
            self.cutoff_year
        );
        results
    }

    /// Backtest one country; empty if it has too little history on either side of the cutoff
    pub fn backtest_country(&self, table: &ObservationTable, country: &str) -> Vec<ValidationResult> {
        let rows = table.country_rows(country);
        let lagged = build_lagged_rows(&rows);
        let (train, test): (Vec<LaggedRow>, Vec<LaggedRow>) = lagged
            .into_iter()
            .partition(|r| r.year <= self.cutoff_year);

        let complete = train
            .iter()
            .filter(|r| r.current.is_complete() && r.lag1.is_complete())
            .count();
        if complete < self.min_train_rows || test.is_empty() {
            debug!(
                "{}: skipped, {} complete training rows and {} test rows",
                country,
                complete,
                test.len()
            );
            return Vec::new();
        }

        let fitter = ModelFitter::new(self.catalog);
        let mut results = Vec::new();
        for indicator in Indicator::ALL {
            let model = match fitter.fit(country, &train, indicator) {
                Ok(model) => model,
                Err(err) => {
                    debug!("{}", err);
                    continue;
                }
            };

            let (predicted, actual): (Vec<f64>, Vec<f64>) = test
                .iter()
                .filter_map(|r| Some((model.predict(r)?, r.current.get(indicator)?)))
                .unzip();

            match forecast_accuracy(&predicted, &actual) {
                Ok(accuracy) => {
                    debug!("{} / {} over {} years\n{}", country, indicator, actual.len(), accuracy);
                    results.push(ValidationResult {
                        country: country.to_string(),
                        indicator,
                        accuracy,
                        test_points: actual.len(),
                    });
                }
                Err(err) => debug!("{} / {}: {}", country, indicator, err),
            }
        }
        results
    }
}

/// Mean error per indicator across countries, lowest first
pub fn summarize_by_indicator(results: &[ValidationResult]) -> Vec<IndicatorSummary> {
    let mut summaries: Vec<IndicatorSummary> = Indicator::ALL
        .into_iter()
        .filter_map(|indicator| {
            let matching: Vec<&ForecastAccuracy> = results
                .iter()
                .filter(|r| r.indicator == indicator)
                .map(|r| &r.accuracy)
                .collect();
            if matching.is_empty() {
                return None;
            }
            let n = matching.len() as f64;
            Some(IndicatorSummary {
                indicator,
                mean_mae: matching.iter().map(|a| a.mae).sum::<f64>() / n,
                mean_rmse: matching.iter().map(|a| a.rmse).sum::<f64>() / n,
                countries: matching.len(),
            })
        })
        .collect();

    summaries.sort_by(|a, b| a.mean_mae.partial_cmp(&b.mean_mae).unwrap_or(Ordering::Equal));
    summaries
}
