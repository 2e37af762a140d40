//! Per-country forecasting pipeline
//!
//! For each country: lag features → fit models → project to the target year →
//! classify → score. Countries share nothing but the read-only observation
//! table, and a failure to model one indicator never stops the others.

use crate::config::EngineConfig;
use crate::data::ObservationTable;
use crate::error::{ForecastError, Result};
use crate::features::build_lagged_rows;
use crate::indicators::{Indicator, IndicatorValues};
use crate::models::ModelFitter;
use crate::projection::{ForecastPath, RecursiveProjector};
use crate::scoring::{score_country, CountryScore};
use crate::status::{StatusClassifier, StatusRecord};
use log::{info, warn};
use std::cmp::Ordering;
use std::fmt;

/// A country/indicator pair without a forecast status
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedPair {
    pub country: String,
    pub indicator: Indicator,
    pub reason: String,
}

impl fmt::Display for SkippedPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}: {}", self.country, self.indicator, self.reason)
    }
}

/// Everything the engine produced for one country
#[derive(Debug, Clone)]
pub struct CountryOutlook {
    pub country: String,
    pub anchor_year: Option<i32>,
    /// Latest observed value of each indicator up to the anchor year
    pub last_observed: IndicatorValues,
    pub path: Option<ForecastPath>,
    pub statuses: Vec<StatusRecord>,
    pub score: CountryScore,
    pub skipped: Vec<SkippedPair>,
}

impl CountryOutlook {
    /// Status record for one indicator
    pub fn status(&self, indicator: Indicator) -> Option<&StatusRecord> {
        self.statuses.iter().find(|r| r.indicator == indicator)
    }
}

/// Results of a whole batch
#[derive(Debug, Clone)]
pub struct OutlookReport {
    pub target_year: i32,
    pub outlooks: Vec<CountryOutlook>,
}

impl OutlookReport {
    /// Every skipped pair across all countries
    pub fn skipped(&self) -> impl Iterator<Item = &SkippedPair> {
        self.outlooks.iter().flat_map(|o| o.skipped.iter())
    }

    /// Country scores, best first; countries without a score come last
    pub fn leaderboard(&self) -> Vec<&CountryScore> {
        let mut scores: Vec<&CountryScore> = self.outlooks.iter().map(|o| &o.score).collect();
        scores.sort_by(|a, b| {
            b.global_score
                .partial_cmp(&a.global_score)
                .unwrap_or(Ordering::Equal)
        });
        scores
    }

    /// Outlook for one country
    pub fn country(&self, country: &str) -> Option<&CountryOutlook> {
        self.outlooks.iter().find(|o| o.country == country)
    }
}

/// Runs the forecasting pipeline with a fixed configuration
#[derive(Debug, Clone)]
pub struct OutlookEngine {
    config: EngineConfig,
}

impl OutlookEngine {
    /// Create an engine; the configuration is validated first
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The engine's configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run every country in the table, in input order
    pub fn run(&self, table: &ObservationTable) -> Result<OutlookReport> {
        if table.is_empty() {
            return Err(ForecastError::MissingData(
                "observation table has no rows".to_string(),
            ));
        }

        let outlooks = table
            .countries()
            .iter()
            .map(|country| self.forecast_country(table, country))
            .collect::<Result<Vec<_>>>()?;

        let skipped: usize = outlooks.iter().map(|o| o.skipped.len()).sum();
        info!(
            "Projected {} countries to {}, {} pairs without forecast",
            outlooks.len(),
            self.config.target_year,
            skipped
        );

        Ok(OutlookReport {
            target_year: self.config.target_year,
            outlooks,
        })
    }

    /// Run the pipeline for one country
    pub fn forecast_country(&self, table: &ObservationTable, country: &str) -> Result<CountryOutlook> {
        let catalog = &self.config.catalog;
        let classifier = StatusClassifier::new(catalog);

        let rows = table.country_rows(country);
        let lagged = build_lagged_rows(&rows);
        let anchor_year = self.config.anchor_year.or_else(|| table.anchor_year(country));
        let anchor_index = anchor_year.and_then(|year| lagged.iter().position(|r| r.year == year));

        let Some(anchor_index) = anchor_index else {
            let reason = match anchor_year {
                Some(year) => format!("no observation for anchor year {}", year),
                None => "no observations".to_string(),
            };
            warn!("{}: {}", country, reason);
            return Ok(self.unforecastable(country, anchor_year, reason));
        };

        let target_year = self.config.target_year;
        let anchor = &lagged[anchor_index];
        if anchor.year > target_year {
            let reason = format!("anchor year {} is after target year {}", anchor.year, target_year);
            warn!("{}: {}", country, reason);
            return Ok(self.unforecastable(country, Some(anchor.year), reason));
        }

        let history = &lagged[..=anchor_index];
        let mut last_observed = IndicatorValues::empty();
        for indicator in Indicator::ALL {
            let latest = history.iter().rev().find_map(|r| r.current.get(indicator));
            last_observed.set(indicator, latest);
        }

        let models = ModelFitter::new(catalog)
            .excluding_years(&self.config.excluded_training_years)
            .fit_country(country, history)?;
        let path = RecursiveProjector::new(catalog, target_year).project(&models, anchor)?;

        let mut statuses = Vec::with_capacity(Indicator::COUNT);
        let mut skipped = Vec::new();
        for indicator in Indicator::ALL {
            let forecast = if path.is_partial(indicator) {
                None
            } else {
                path.final_value(indicator)
            };
            let record = classifier.assess(country, indicator, last_observed.get(indicator), forecast);

            if record.status.is_none() {
                let reason = if let Some((_, err)) = models.failures().iter().find(|(i, _)| *i == indicator) {
                    err.to_string()
                } else if let Some(partial) = path.partial().get(&indicator) {
                    partial.to_string()
                } else if record.forecast.is_none() {
                    format!("no value projected for {}", path.target_year())
                } else {
                    "no observed value to compare against".to_string()
                };
                let pair = SkippedPair {
                    country: country.to_string(),
                    indicator,
                    reason,
                };
                warn!("No forecast for {}", pair);
                skipped.push(pair);
            }
            statuses.push(record);
        }

        let score = score_country(country, &statuses);
        info!(
            "{}: anchor {}, score {}",
            country,
            path.anchor_year(),
            score
                .global_score
                .map(|s| format!("{:.2}", s))
                .unwrap_or_else(|| "n/a".to_string())
        );

        Ok(CountryOutlook {
            country: country.to_string(),
            anchor_year: Some(path.anchor_year()),
            last_observed,
            path: Some(path),
            statuses,
            score,
            skipped,
        })
    }

    /// Outlook for a country that cannot be projected at all
    fn unforecastable(&self, country: &str, anchor_year: Option<i32>, reason: String) -> CountryOutlook {
        let classifier = StatusClassifier::new(&self.config.catalog);
        let statuses: Vec<StatusRecord> = Indicator::ALL
            .into_iter()
            .map(|indicator| classifier.assess(country, indicator, None, None))
            .collect();
        let skipped = Indicator::ALL
            .into_iter()
            .map(|indicator| SkippedPair {
                country: country.to_string(),
                indicator,
                reason: reason.clone(),
            })
            .collect();

        CountryOutlook {
            country: country.to_string(),
            anchor_year,
            last_observed: IndicatorValues::empty(),
            path: None,
            score: score_country(country, &statuses),
            statuses,
            skipped,
        }
    }
}
