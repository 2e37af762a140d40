//! The fixed indicator set and its per-indicator configuration
//!
//! Each indicator carries two static attributes: the lag-1 predictors that feed
//! its regression model and the target rule its 2030 forecast is judged by.
//! Both live in an [`IndicatorCatalog`], an immutable lookup table that is
//! handed explicitly to the fitter, the projector and the classifier.

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the seven socio-economic indicators tracked per country
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Indicator {
    #[serde(rename = "Real_GDP_Per_Capita")]
    RealGdpPerCapita,
    #[serde(rename = "NEET_Rate")]
    NeetRate,
    #[serde(rename = "Unemployment_Rate")]
    UnemploymentRate,
    #[serde(rename = "Income_Distribution_Ratio")]
    IncomeDistributionRatio,
    #[serde(rename = "Income_Share_Bottom_40")]
    IncomeShareBottom40,
    #[serde(rename = "Renewable_Energy_Share")]
    RenewableEnergyShare,
    #[serde(rename = "GHG_Emissions")]
    GhgEmissions,
}

impl Indicator {
    /// Number of indicators
    pub const COUNT: usize = 7;

    /// All indicators, in the canonical column order
    pub const ALL: [Indicator; Indicator::COUNT] = [
        Indicator::RealGdpPerCapita,
        Indicator::NeetRate,
        Indicator::UnemploymentRate,
        Indicator::IncomeDistributionRatio,
        Indicator::IncomeShareBottom40,
        Indicator::RenewableEnergyShare,
        Indicator::GhgEmissions,
    ];

    /// Column name in the observation table
    pub fn column_name(self) -> &'static str {
        match self {
            Indicator::RealGdpPerCapita => "Real_GDP_Per_Capita",
            Indicator::NeetRate => "NEET_Rate",
            Indicator::UnemploymentRate => "Unemployment_Rate",
            Indicator::IncomeDistributionRatio => "Income_Distribution_Ratio",
            Indicator::IncomeShareBottom40 => "Income_Share_Bottom_40",
            Indicator::RenewableEnergyShare => "Renewable_Energy_Share",
            Indicator::GhgEmissions => "GHG_Emissions",
        }
    }

    /// Name of the lag-1 column derived from this indicator
    pub fn lag_column_name(self) -> String {
        format!("{}_lag1", self.column_name())
    }

    /// Look an indicator up by its column name
    pub fn from_column_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.column_name() == name)
    }

    /// Position of the indicator in [`Indicator::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.column_name())
    }
}

/// Value per indicator for a single year; `None` means no observation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IndicatorValues {
    values: [Option<f64>; Indicator::COUNT],
}

impl IndicatorValues {
    /// All indicators missing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Value for one indicator
    pub fn get(&self, indicator: Indicator) -> Option<f64> {
        self.values[indicator.index()]
    }

    /// Set the value for one indicator; non-finite values are stored as missing
    pub fn set(&mut self, indicator: Indicator, value: Option<f64>) {
        self.values[indicator.index()] = value.filter(|v| v.is_finite());
    }

    /// Builder-style [`IndicatorValues::set`]
    pub fn with(mut self, indicator: Indicator, value: f64) -> Self {
        self.set(indicator, Some(value));
        self
    }

    /// Whether every indicator has a value
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    /// Whether at least one indicator has a value
    pub fn has_any(&self) -> bool {
        self.values.iter().any(Option::is_some)
    }

    /// Iterate over `(indicator, value)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Indicator, Option<f64>)> + '_ {
        Indicator::ALL.into_iter().map(move |i| (i, self.get(i)))
    }
}

/// Which way an indicator should move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    LowerIsBetter,
    HigherIsBetter,
}

impl Direction {
    /// Whether `to` is strictly better than `from`
    pub fn improves(self, from: f64, to: f64) -> bool {
        match self {
            Direction::LowerIsBetter => to < from,
            Direction::HigherIsBetter => to > from,
        }
    }

    /// Whether `value` satisfies `threshold`, inclusively
    pub fn meets(self, value: f64, threshold: f64) -> bool {
        match self {
            Direction::LowerIsBetter => value <= threshold,
            Direction::HigherIsBetter => value >= threshold,
        }
    }
}

/// How the final-year forecast of an indicator is judged
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetRule {
    /// Fixed numeric target in a direction: three tiers
    Threshold { value: f64, direction: Direction },
    /// Percentage growth from the last observation, in percent: three tiers
    Growth { high: f64, medium: f64 },
    /// Direction of travel only: two tiers
    Trend { direction: Direction },
}

impl TargetRule {
    /// Human-readable target for display next to a forecast
    pub fn describe(&self) -> String {
        match self {
            TargetRule::Threshold {
                value,
                direction: Direction::LowerIsBetter,
            } => format!("≤ {:.1}", value),
            TargetRule::Threshold {
                value,
                direction: Direction::HigherIsBetter,
            } => format!("≥ {:.1}", value),
            TargetRule::Growth { high, .. } => format!("> {}% growth", high),
            TargetRule::Trend { .. } => "Good Trend".to_string(),
        }
    }

    /// Short name of the rule family
    pub fn kind(&self) -> &'static str {
        match self {
            TargetRule::Threshold { .. } => "threshold",
            TargetRule::Growth { .. } => "growth",
            TargetRule::Trend { .. } => "trend",
        }
    }
}

/// Static configuration of one indicator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSpec {
    pub indicator: Indicator,
    /// Indicators whose lag-1 values feed the model, alongside the year
    #[serde(default)]
    pub predictors: Vec<Indicator>,
    pub rule: TargetRule,
    /// Clamp negative projections to zero
    #[serde(default)]
    pub floor_at_zero: bool,
}

/// Immutable indicator → spec lookup table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<IndicatorSpec>", into = "Vec<IndicatorSpec>")]
pub struct IndicatorCatalog {
    // indexed by Indicator::index()
    specs: Vec<IndicatorSpec>,
}

impl IndicatorCatalog {
    /// Build a catalogue, checking that every indicator is configured exactly once
    pub fn new(specs: Vec<IndicatorSpec>) -> Result<Self> {
        let mut slots: Vec<Option<IndicatorSpec>> = vec![None; Indicator::COUNT];

        for spec in specs {
            let indicator = spec.indicator;
            if spec.predictors.contains(&indicator) {
                return Err(ForecastError::ConfigError(format!(
                    "{} cannot be a predictor of itself",
                    indicator
                )));
            }
            for (i, predictor) in spec.predictors.iter().enumerate() {
                if spec.predictors[..i].contains(predictor) {
                    return Err(ForecastError::ConfigError(format!(
                        "{} lists predictor {} twice",
                        indicator, predictor
                    )));
                }
            }
            validate_rule(indicator, &spec.rule)?;

            let slot = &mut slots[indicator.index()];
            if slot.is_some() {
                return Err(ForecastError::ConfigError(format!(
                    "{} is configured more than once",
                    indicator
                )));
            }
            *slot = Some(spec);
        }

        let specs = slots
            .into_iter()
            .zip(Indicator::ALL)
            .map(|(slot, indicator)| {
                slot.ok_or_else(|| {
                    ForecastError::ConfigError(format!("{} is not configured", indicator))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { specs })
    }

    /// The EU 2030 catalogue: SDG 8, 10 and 13 targets with the hybrid feature map
    pub fn eu_2030() -> Self {
        use Direction::*;
        use Indicator::*;

        fn spec(
            indicator: Indicator,
            predictors: &[Indicator],
            rule: TargetRule,
            floor_at_zero: bool,
        ) -> IndicatorSpec {
            IndicatorSpec {
                indicator,
                predictors: predictors.to_vec(),
                rule,
                floor_at_zero,
            }
        }

        let specs = vec![
            spec(
                RealGdpPerCapita,
                &[NeetRate, IncomeDistributionRatio],
                TargetRule::Growth {
                    high: 10.0,
                    medium: 5.0,
                },
                false,
            ),
            spec(
                NeetRate,
                &[UnemploymentRate, IncomeDistributionRatio],
                TargetRule::Threshold {
                    value: 9.0,
                    direction: LowerIsBetter,
                },
                true,
            ),
            spec(
                UnemploymentRate,
                &[NeetRate, IncomeDistributionRatio],
                TargetRule::Threshold {
                    value: 5.0,
                    direction: LowerIsBetter,
                },
                true,
            ),
            spec(
                IncomeDistributionRatio,
                &[NeetRate, IncomeShareBottom40],
                TargetRule::Trend {
                    direction: LowerIsBetter,
                },
                false,
            ),
            spec(
                IncomeShareBottom40,
                &[NeetRate, IncomeDistributionRatio],
                TargetRule::Trend {
                    direction: HigherIsBetter,
                },
                true,
            ),
            spec(
                RenewableEnergyShare,
                &[RealGdpPerCapita],
                TargetRule::Threshold {
                    value: 42.5,
                    direction: HigherIsBetter,
                },
                true,
            ),
            // Other indicators did not improve the emissions fit: year-only trend
            spec(
                GhgEmissions,
                &[],
                TargetRule::Trend {
                    direction: LowerIsBetter,
                },
                false,
            ),
        ];

        Self { specs }
    }

    /// Configuration for one indicator
    pub fn spec(&self, indicator: Indicator) -> &IndicatorSpec {
        &self.specs[indicator.index()]
    }

    /// All specs in canonical indicator order
    pub fn specs(&self) -> &[IndicatorSpec] {
        &self.specs
    }
}

impl Default for IndicatorCatalog {
    fn default() -> Self {
        Self::eu_2030()
    }
}

impl TryFrom<Vec<IndicatorSpec>> for IndicatorCatalog {
    type Error = ForecastError;

    fn try_from(specs: Vec<IndicatorSpec>) -> Result<Self> {
        Self::new(specs)
    }
}

impl From<IndicatorCatalog> for Vec<IndicatorSpec> {
    fn from(catalog: IndicatorCatalog) -> Self {
        catalog.specs
    }
}

fn validate_rule(indicator: Indicator, rule: &TargetRule) -> Result<()> {
    match *rule {
        TargetRule::Threshold { value, .. } if !value.is_finite() => Err(
            ForecastError::ConfigError(format!("{} has a non-finite threshold", indicator)),
        ),
        TargetRule::Growth { high, medium }
            if !high.is_finite() || !medium.is_finite() || medium > high =>
        {
            Err(ForecastError::ConfigError(format!(
                "{} growth bands must be finite with medium <= high",
                indicator
            )))
        }
        _ => Ok(()),
    }
}
