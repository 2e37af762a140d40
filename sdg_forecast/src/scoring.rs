//! Composite per-country score and grade

use crate::status::StatusRecord;
use sdg_math::round_to;
use std::fmt;

/// Lowest average score graded On Track
pub const ON_TRACK_THRESHOLD: f64 = 2.5;
/// Lowest average score graded Progressing
pub const PROGRESSING_THRESHOLD: f64 = 1.8;

/// Overall grade of a country
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grade {
    OnTrack,
    Progressing,
    OffTrack,
}

impl Grade {
    /// Grade for an average score
    pub fn from_score(score: f64) -> Self {
        if score >= ON_TRACK_THRESHOLD {
            Grade::OnTrack
        } else if score >= PROGRESSING_THRESHOLD {
            Grade::Progressing
        } else {
            Grade::OffTrack
        }
    }

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            Grade::OnTrack => "On Track",
            Grade::Progressing => "Progressing",
            Grade::OffTrack => "Off Track",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Average status score of one country
#[derive(Debug, Clone, PartialEq)]
pub struct CountryScore {
    pub country: String,
    /// Mean ordinal score rounded to two decimals; `None` if nothing was assessed
    pub global_score: Option<f64>,
    pub grade: Option<Grade>,
    /// Number of statuses the score is based on
    pub assessed: usize,
}

/// Score a country from its status records; records without a status are ignored
pub fn score_country(country: &str, records: &[StatusRecord]) -> CountryScore {
    let scores: Vec<u8> = records
        .iter()
        .filter_map(|r| r.status)
        .map(|s| s.score())
        .collect();

    if scores.is_empty() {
        return CountryScore {
            country: country.to_string(),
            global_score: None,
            grade: None,
            assessed: 0,
        };
    }

    let mean = scores.iter().map(|&s| f64::from(s)).sum::<f64>() / scores.len() as f64;
    let global_score = round_to(mean, 2);

    CountryScore {
        country: country.to_string(),
        global_score: Some(global_score),
        grade: Some(Grade::from_score(global_score)),
        assessed: scores.len(),
    }
}
