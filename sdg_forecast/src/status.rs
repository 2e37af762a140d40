//! Classification of final-year forecasts against policy targets

use crate::indicators::{Indicator, IndicatorCatalog, TargetRule};
use std::fmt;

/// Ordinal tier of a status
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Bottom = 1,
    Middle = 2,
    Top = 3,
}

/// Outcome of comparing a forecast with its target and the last observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Threshold met
    OnTarget,
    /// Threshold missed, but moving the right way
    Improving,
    /// Threshold missed and not improving
    Worsening,
    /// Growth above the high band
    HighGrowth,
    /// Growth within the medium band
    MediumGrowth,
    /// Growth below the medium band
    Stagnation,
    /// Trend in the right direction
    Good,
    /// Trend flat or in the wrong direction
    Bad,
}

impl Status {
    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            Status::OnTarget => "On Target",
            Status::Improving => "Improving",
            Status::Worsening => "Worsening",
            Status::HighGrowth => "High Growth",
            Status::MediumGrowth => "Medium Growth",
            Status::Stagnation => "Stagnation",
            Status::Good => "Good",
            Status::Bad => "Bad",
        }
    }

    /// Ordinal tier
    pub fn tier(self) -> Tier {
        match self {
            Status::OnTarget | Status::HighGrowth | Status::Good => Tier::Top,
            Status::Improving | Status::MediumGrowth => Tier::Middle,
            Status::Worsening | Status::Stagnation | Status::Bad => Tier::Bottom,
        }
    }

    /// Ordinal score: 3 for the top tier, 2 for the middle, 1 for the bottom
    pub fn score(self) -> u8 {
        self.tier() as u8
    }

    /// Traffic-light colour used by the presentation layer
    pub fn color(self) -> &'static str {
        match self.tier() {
            Tier::Top => "Green",
            Tier::Middle => "Orange",
            Tier::Bottom => "Red",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Percentage change from `last` to `forecast`; zero when `last` is zero
pub fn growth_percent(last: f64, forecast: f64) -> f64 {
    if last == 0.0 {
        0.0
    } else {
        (forecast - last) / last * 100.0
    }
}

/// Classify a forecast under a target rule
pub fn classify(rule: &TargetRule, last: f64, forecast: f64) -> Status {
    match *rule {
        TargetRule::Threshold { value, direction } => {
            if direction.meets(forecast, value) {
                Status::OnTarget
            } else if direction.improves(last, forecast) {
                Status::Improving
            } else {
                Status::Worsening
            }
        }
        TargetRule::Growth { high, medium } => {
            let growth = growth_percent(last, forecast);
            if growth > high {
                Status::HighGrowth
            } else if growth >= medium {
                Status::MediumGrowth
            } else {
                Status::Stagnation
            }
        }
        // Two states only: trend-only indicators have no middle tier
        TargetRule::Trend { direction } => {
            if direction.improves(last, forecast) {
                Status::Good
            } else {
                Status::Bad
            }
        }
    }
}

/// Status of one country/indicator pair
#[derive(Debug, Clone, PartialEq)]
pub struct StatusRecord {
    pub country: String,
    pub indicator: Indicator,
    pub last_observed: Option<f64>,
    pub forecast: Option<f64>,
    pub target: String,
    /// `None` when there is no forecast to classify
    pub status: Option<Status>,
}

/// Applies the catalogue's target rules
#[derive(Debug, Clone, Copy)]
pub struct StatusClassifier<'a> {
    catalog: &'a IndicatorCatalog,
}

impl<'a> StatusClassifier<'a> {
    /// Create a classifier for a catalogue
    pub fn new(catalog: &'a IndicatorCatalog) -> Self {
        Self { catalog }
    }

    /// Build the status record for one pair
    pub fn assess(
        &self,
        country: &str,
        indicator: Indicator,
        last_observed: Option<f64>,
        forecast: Option<f64>,
    ) -> StatusRecord {
        let rule = &self.catalog.spec(indicator).rule;
        let status = match (last_observed, forecast) {
            (Some(last), Some(forecast)) => Some(classify(rule, last, forecast)),
            _ => None,
        };

        StatusRecord {
            country: country.to_string(),
            indicator,
            last_observed,
            forecast,
            target: rule.describe(),
            status,
        }
    }
}
