//! Engine configuration

use crate::error::{ForecastError, Result};
use crate::indicators::IndicatorCatalog;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// Default projection horizon
pub const DEFAULT_TARGET_YEAR: i32 = 2030;

/// Settings for a projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Last year to project
    pub target_year: i32,
    /// Fixed anchor year for every country; derived per country when unset
    pub anchor_year: Option<i32>,
    /// Years left out of every training set, e.g. the 2020 outlier
    pub excluded_training_years: Vec<i32>,
    /// Indicator predictors, target rules and floors
    pub catalog: IndicatorCatalog,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_year: DEFAULT_TARGET_YEAR,
            anchor_year: None,
            excluded_training_years: Vec::new(),
            catalog: IndicatorCatalog::eu_2030(),
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a JSON file; omitted fields keep their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => ForecastError::MissingData(format!(
                "configuration file '{}' not found",
                path.display()
            )),
            _ => ForecastError::IoError(err),
        })?;

        let config: EngineConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Check settings that the type system does not
    pub fn validate(&self) -> Result<()> {
        if let Some(anchor) = self.anchor_year {
            if anchor > self.target_year {
                return Err(ForecastError::ConfigError(format!(
                    "anchor year {} is after target year {}",
                    anchor, self.target_year
                )));
            }
        }
        Ok(())
    }
}
