//! Recursive year-by-year projection
//!
//! Starting from the anchor year's observed values, each step copies the
//! previous year's values into the lag-1 inputs and predicts every indicator
//! for the next year. The horizon is fixed: exactly `target - anchor` steps.

use crate::error::{ForecastError, Result};
use crate::features::{FeatureName, LaggedRow};
use crate::indicators::{Indicator, IndicatorCatalog, IndicatorValues};
use crate::models::ModelSet;
use std::collections::BTreeMap;
use std::fmt;

/// Why a forecast path has no values for an indicator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PartialReason {
    /// The indicator's model could not be fitted
    NoModel,
    /// An input was unavailable from this year on
    MissingInput { year: i32, feature: FeatureName },
}

impl fmt::Display for PartialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartialReason::NoModel => f.write_str("no fitted model"),
            PartialReason::MissingInput { year, feature } => {
                write!(f, "input {} unavailable for {}", feature, year)
            }
        }
    }
}

/// Year-by-year projection for one country, from the anchor to the target year
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPath {
    pub country: String,
    records: Vec<LaggedRow>,
    partial: BTreeMap<Indicator, PartialReason>,
}

impl ForecastPath {
    /// All records; the first is the anchor year's observation
    pub fn records(&self) -> &[LaggedRow] {
        &self.records
    }

    /// The observed anchor record
    pub fn anchor(&self) -> &LaggedRow {
        &self.records[0]
    }

    /// The target-year record
    pub fn last(&self) -> &LaggedRow {
        &self.records[self.records.len() - 1]
    }

    /// Anchor year
    pub fn anchor_year(&self) -> i32 {
        self.anchor().year
    }

    /// Target year
    pub fn target_year(&self) -> i32 {
        self.last().year
    }

    /// Number of projected years
    pub fn steps(&self) -> usize {
        self.records.len() - 1
    }

    /// Value of an indicator in the target year
    pub fn final_value(&self, indicator: Indicator) -> Option<f64> {
        self.last().current.get(indicator)
    }

    /// Value of an indicator in a given year of the path
    pub fn value_at(&self, indicator: Indicator, year: i32) -> Option<f64> {
        self.records
            .iter()
            .find(|r| r.year == year)
            .and_then(|r| r.current.get(indicator))
    }

    /// Indicators with gaps in the projection, and why
    pub fn partial(&self) -> &BTreeMap<Indicator, PartialReason> {
        &self.partial
    }

    /// Whether an indicator has gaps in the projection
    pub fn is_partial(&self, indicator: Indicator) -> bool {
        self.partial.contains_key(&indicator)
    }
}

/// Projects a country's fitted models forward to a target year
#[derive(Debug, Clone, Copy)]
pub struct RecursiveProjector<'a> {
    catalog: &'a IndicatorCatalog,
    target_year: i32,
}

impl<'a> RecursiveProjector<'a> {
    /// Create a projector
    pub fn new(catalog: &'a IndicatorCatalog, target_year: i32) -> Self {
        Self {
            catalog,
            target_year,
        }
    }

    /// Target year of the projection
    pub fn target_year(&self) -> i32 {
        self.target_year
    }

    /// Project from the anchor row to the target year
    pub fn project(&self, models: &ModelSet, anchor: &LaggedRow) -> Result<ForecastPath> {
        if anchor.year > self.target_year {
            return Err(ForecastError::InvalidParameter(format!(
                "anchor year {} is after target year {}",
                anchor.year, self.target_year
            )));
        }

        let mut records = Vec::with_capacity((self.target_year - anchor.year) as usize + 1);
        records.push(anchor.clone());
        let mut partial = BTreeMap::new();

        for year in anchor.year + 1..=self.target_year {
            let previous = &records[records.len() - 1];
            let mut record = LaggedRow {
                year,
                current: IndicatorValues::empty(),
                lag1: previous.current,
            };

            for indicator in Indicator::ALL {
                let Some(model) = models.get(indicator) else {
                    partial.entry(indicator).or_insert(PartialReason::NoModel);
                    continue;
                };
                // a gap is never filled back in
                if partial.contains_key(&indicator) {
                    continue;
                }

                match model.predict(&record) {
                    Some(value) => {
                        let value = if self.catalog.spec(indicator).floor_at_zero {
                            value.max(0.0)
                        } else {
                            value
                        };
                        record.current.set(indicator, Some(value));
                    }
                    None => {
                        if let Some(&feature) =
                            model.features().iter().find(|f| record.feature(**f).is_none())
                        {
                            partial
                                .entry(indicator)
                                .or_insert(PartialReason::MissingInput { year, feature });
                        }
                    }
                }
            }

            records.push(record);
        }

        Ok(ForecastPath {
            country: models.country.clone(),
            records,
            partial,
        })
    }
}
