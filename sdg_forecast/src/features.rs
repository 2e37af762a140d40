//! Lag-1 feature construction

use crate::data::Observation;
use crate::indicators::{Indicator, IndicatorValues};
use std::fmt;

/// Name of a model input column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureName {
    /// Calendar year
    Year,
    /// Previous row's value of an indicator
    Lag(Indicator),
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureName::Year => f.write_str("Year"),
            FeatureName::Lag(indicator) => write!(f, "{}_lag1", indicator.column_name()),
        }
    }
}

/// One year of a country's history (or forecast) with its lag-1 inputs
#[derive(Debug, Clone, PartialEq)]
pub struct LaggedRow {
    pub year: i32,
    pub current: IndicatorValues,
    pub lag1: IndicatorValues,
}

impl LaggedRow {
    /// Value of a model input, if present
    pub fn feature(&self, name: FeatureName) -> Option<f64> {
        match name {
            FeatureName::Year => Some(self.year as f64),
            FeatureName::Lag(indicator) => self.lag1.get(indicator),
        }
    }

    /// Values of several inputs, or `None` if any is missing
    pub fn features(&self, names: &[FeatureName]) -> Option<Vec<f64>> {
        names.iter().map(|&name| self.feature(name)).collect()
    }
}

/// Add lag-1 columns to one country's rows.
///
/// `rows` must be sorted ascending by year. Each row's lags are the values of
/// the immediately preceding row; the first row has no lags.
pub fn build_lagged_rows(rows: &[&Observation]) -> Vec<LaggedRow> {
    let mut previous = IndicatorValues::empty();

    rows.iter()
        .map(|observation| {
            let row = LaggedRow {
                year: observation.year,
                current: observation.values,
                lag1: previous,
            };
            previous = observation.values;
            row
        })
        .collect()
}
