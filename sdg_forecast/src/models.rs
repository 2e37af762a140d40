//! Per-indicator regression models
//!
//! Every indicator is modeled as an ordinary least squares regression on the
//! calendar year plus the lag-1 values of its configured predictors. Models
//! are fitted per country from that country's rows only.

use crate::error::{ForecastError, Result};
use crate::features::{FeatureName, LaggedRow};
use crate::indicators::{Indicator, IndicatorCatalog};
use log::debug;
use sdg_math::OrdinaryLeastSquares;
use std::collections::BTreeMap;

/// Regression model for one indicator, with the ordered inputs it was fitted on
#[derive(Debug, Clone, PartialEq)]
pub struct FittedModel {
    indicator: Indicator,
    features: Vec<FeatureName>,
    regression: OrdinaryLeastSquares,
    r_squared: Option<f64>,
}

impl FittedModel {
    /// Predict the indicator for a row, or `None` if an input is missing
    pub fn predict(&self, row: &LaggedRow) -> Option<f64> {
        let inputs = row.features(&self.features)?;
        self.regression.predict(&inputs).ok()
    }

    /// Indicator being modeled
    pub fn indicator(&self) -> Indicator {
        self.indicator
    }

    /// Model inputs, in the order the regression expects them
    pub fn features(&self) -> &[FeatureName] {
        &self.features
    }

    /// The underlying regression
    pub fn regression(&self) -> &OrdinaryLeastSquares {
        &self.regression
    }

    /// Number of rows the model was fitted on
    pub fn training_rows(&self) -> usize {
        self.regression.n_samples()
    }

    /// In-sample R², or `None` when the target was constant over the training rows
    pub fn r_squared(&self) -> Option<f64> {
        self.r_squared
    }
}

/// Models fitted for one country, plus the indicators that could not be fitted
#[derive(Debug)]
pub struct ModelSet {
    pub country: String,
    models: BTreeMap<Indicator, FittedModel>,
    failures: Vec<(Indicator, ForecastError)>,
}

impl ModelSet {
    /// Model for an indicator, if its fit succeeded
    pub fn get(&self, indicator: Indicator) -> Option<&FittedModel> {
        self.models.get(&indicator)
    }

    /// Indicators whose fit failed, with the reason
    pub fn failures(&self) -> &[(Indicator, ForecastError)] {
        &self.failures
    }

    /// Number of fitted models
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Check if no model was fitted
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Fits per-indicator models according to an indicator catalogue
#[derive(Debug, Clone, Copy)]
pub struct ModelFitter<'a> {
    catalog: &'a IndicatorCatalog,
    excluded_years: &'a [i32],
}

impl<'a> ModelFitter<'a> {
    /// Create a fitter for a catalogue
    pub fn new(catalog: &'a IndicatorCatalog) -> Self {
        Self {
            catalog,
            excluded_years: &[],
        }
    }

    /// Leave the given years out of every training set
    pub fn excluding_years(mut self, years: &'a [i32]) -> Self {
        self.excluded_years = years;
        self
    }

    /// Inputs of an indicator's model: the year, then its predictors' lags
    pub fn feature_names(&self, indicator: Indicator) -> Vec<FeatureName> {
        std::iter::once(FeatureName::Year)
            .chain(
                self.catalog
                    .spec(indicator)
                    .predictors
                    .iter()
                    .map(|&p| FeatureName::Lag(p)),
            )
            .collect()
    }

    /// Fit one indicator's model on the rows where the target and all inputs are present
    pub fn fit(&self, country: &str, rows: &[LaggedRow], indicator: Indicator) -> Result<FittedModel> {
        let features = self.feature_names(indicator);

        let (x, y): (Vec<Vec<f64>>, Vec<f64>) = rows
            .iter()
            .filter(|row| !self.excluded_years.contains(&row.year))
            .filter_map(|row| Some((row.features(&features)?, row.current.get(indicator)?)))
            .unzip();

        let required = OrdinaryLeastSquares::parameter_count(features.len());
        if y.len() < required {
            return Err(ForecastError::InsufficientTrainingData {
                country: country.to_string(),
                indicator,
                rows: y.len(),
                required,
            });
        }

        let regression = OrdinaryLeastSquares::fit(&x, &y)?;
        let r_squared = regression.r_squared(&x, &y).ok();
        debug!(
            "{} / {}: fitted on {} rows with [{}], R² {}",
            country,
            indicator,
            y.len(),
            features
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            r_squared
                .map(|r| format!("{:.4}", r))
                .unwrap_or_else(|| "n/a".to_string())
        );

        Ok(FittedModel {
            indicator,
            features,
            regression,
            r_squared,
        })
    }

    /// Fit every indicator for one country
    ///
    /// Failures that only concern one indicator are collected in the set; any
    /// other error is returned.
    pub fn fit_country(&self, country: &str, rows: &[LaggedRow]) -> Result<ModelSet> {
        let mut models = BTreeMap::new();
        let mut failures = Vec::new();

        for indicator in Indicator::ALL {
            match self.fit(country, rows, indicator) {
                Ok(model) => {
                    models.insert(indicator, model);
                }
                Err(err) if err.is_local() => failures.push((indicator, err)),
                Err(err) => return Err(err),
            }
        }

        Ok(ModelSet {
            country: country.to_string(),
            models,
            failures,
        })
    }
}
