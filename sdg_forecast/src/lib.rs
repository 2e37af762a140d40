//! # SDG Forecast
//!
//! Recursive projections of European SDG indicators to 2030, with
//! target classification and a composite score per country.
//!
//! ## Features
//!
//! - Observation tables loaded from CSV (Country, Year, seven indicators)
//! - Per-country OLS models on the year and lag-1 predictors
//! - Year-by-year recursive projection to a target year
//! - Threshold, growth and trend target rules with a three-tier status
//! - Composite score and grade per country
//! - CSV reports and an out-of-sample backtest
//!
//! ## Quick Start
//!
//! ```no_run
//! use sdg_forecast::config::EngineConfig;
//! use sdg_forecast::data::DataLoader;
//! use sdg_forecast::pipeline::OutlookEngine;
//!
//! // Load data
//! let table = DataLoader::from_csv("sdg_indicators.csv")?;
//!
//! // Project every country to 2030
//! let engine = OutlookEngine::new(EngineConfig::default())?;
//! let report = engine.run(&table)?;
//!
//! for score in report.leaderboard() {
//!     println!("{}: {:?}", score.country, score.grade);
//! }
//! # Ok::<(), sdg_forecast::ForecastError>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod features;
pub mod indicators;
pub mod models;
pub mod pipeline;
pub mod projection;
pub mod report;
pub mod scoring;
pub mod status;
pub mod validation;

// Re-export commonly used types
pub use crate::config::EngineConfig;
pub use crate::data::{DataLoader, Observation, ObservationTable};
pub use crate::error::ForecastError;
pub use crate::indicators::{Indicator, IndicatorCatalog, IndicatorValues, TargetRule};
pub use crate::pipeline::{CountryOutlook, OutlookEngine, OutlookReport, SkippedPair};
pub use crate::scoring::{CountryScore, Grade};
pub use crate::status::{Status, StatusRecord};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
