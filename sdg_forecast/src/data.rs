//! Observation table handling
//!
//! The observation table is keyed by (country, year) and holds one optional
//! value per indicator. It is built once by the loader and only read
//! afterwards.

use crate::error::{ForecastError, Result};
use crate::indicators::{Indicator, IndicatorValues};
use log::{debug, info};
use polars::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io;
use std::path::Path;

/// Name of the country key column
pub const COUNTRY_COLUMN: &str = "Country";
/// Name of the year key column
pub const YEAR_COLUMN: &str = "Year";

/// Historical values of every indicator for one country and year
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub country: String,
    pub year: i32,
    pub values: IndicatorValues,
}

impl Observation {
    /// Create an observation
    pub fn new(country: impl Into<String>, year: i32, values: IndicatorValues) -> Self {
        Self {
            country: country.into(),
            year,
            values,
        }
    }
}

/// Read-only table of observations keyed by (country, year)
#[derive(Debug, Clone, Default)]
pub struct ObservationTable {
    /// Countries in order of first appearance
    countries: Vec<String>,
    /// Per-country observations, keyed by year
    rows: HashMap<String, BTreeMap<i32, Observation>>,
}

/// Data loader for observation tables
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load an observation table from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<ObservationTable> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => ForecastError::MissingData(format!(
                "input file '{}' not found",
                path.display()
            )),
            _ => ForecastError::IoError(err),
        })?;

        let df = CsvReader::new(file)
            .infer_schema(Some(100))
            .has_header(true)
            .finish()?;

        info!("Loaded {} rows from {}", df.height(), path.display());
        Self::from_dataframe(&df)
    }

    /// Create an observation table from an existing DataFrame
    pub fn from_dataframe(df: &DataFrame) -> Result<ObservationTable> {
        Self::check_required_columns(df)?;

        let countries = df.column(COUNTRY_COLUMN)?.cast(&DataType::Utf8)?;
        let countries = countries.utf8()?;
        let years = df.column(YEAR_COLUMN)?.cast(&DataType::Int64)?;
        let years = years.i64()?;

        let mut indicator_columns = Vec::with_capacity(Indicator::COUNT);
        for indicator in Indicator::ALL {
            let column = df
                .column(indicator.column_name())?
                .cast(&DataType::Float64)?;
            let values: Vec<Option<f64>> = column.f64()?.into_iter().collect();
            indicator_columns.push((indicator, values));
        }

        let mut observations = Vec::with_capacity(df.height());
        for (row, (country, year)) in countries.into_iter().zip(years.into_iter()).enumerate() {
            let country = country.map(str::trim).filter(|c| !c.is_empty()).ok_or_else(|| {
                ForecastError::DataError(format!("row {} has no {}", row + 1, COUNTRY_COLUMN))
            })?;
            let year = year.ok_or_else(|| {
                ForecastError::DataError(format!("row {} has no {}", row + 1, YEAR_COLUMN))
            })?;
            let year = i32::try_from(year).map_err(|_| {
                ForecastError::DataError(format!("row {} has out-of-range year {}", row + 1, year))
            })?;

            let mut values = IndicatorValues::empty();
            for (indicator, column) in &indicator_columns {
                values.set(*indicator, column[row]);
            }
            observations.push(Observation::new(country, year, values));
        }

        ObservationTable::from_observations(observations)
    }

    /// Fail with `MissingData` naming every absent required column
    fn check_required_columns(df: &DataFrame) -> Result<()> {
        let present = df.get_column_names();
        let missing: Vec<&str> = [COUNTRY_COLUMN, YEAR_COLUMN]
            .into_iter()
            .chain(Indicator::ALL.into_iter().map(Indicator::column_name))
            .filter(|name| !present.contains(name))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ForecastError::MissingData(format!(
                "required column(s) not found: {}",
                missing.join(", ")
            )))
        }
    }
}

impl ObservationTable {
    /// Build a table from observations; duplicate (country, year) keys are rejected
    pub fn from_observations(observations: Vec<Observation>) -> Result<Self> {
        let mut table = ObservationTable::default();

        for observation in observations {
            if !table.rows.contains_key(&observation.country) {
                table.countries.push(observation.country.clone());
            }
            let by_year = table.rows.entry(observation.country.clone()).or_default();
            if by_year.contains_key(&observation.year) {
                return Err(ForecastError::DataError(format!(
                    "duplicate row for {} in {}",
                    observation.country, observation.year
                )));
            }
            by_year.insert(observation.year, observation);
        }

        debug!(
            "Observation table holds {} countries, {} rows",
            table.countries.len(),
            table.len()
        );
        Ok(table)
    }

    /// Countries in order of first appearance
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    /// Observations for one country, ascending by year
    pub fn country_rows(&self, country: &str) -> Vec<&Observation> {
        self.rows
            .get(country)
            .map(|by_year| by_year.values().collect())
            .unwrap_or_default()
    }

    /// Observation for one country and year
    pub fn get(&self, country: &str, year: i32) -> Option<&Observation> {
        self.rows.get(country).and_then(|by_year| by_year.get(&year))
    }

    /// Latest year in which every indicator is observed, falling back to the
    /// latest year with any observation at all
    pub fn anchor_year(&self, country: &str) -> Option<i32> {
        let by_year = self.rows.get(country)?;
        by_year
            .values()
            .rev()
            .find(|o| o.values.is_complete())
            .or_else(|| by_year.values().rev().find(|o| o.values.has_any()))
            .map(|o| o.year)
    }

    /// Total number of rows
    pub fn len(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}
