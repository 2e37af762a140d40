//! # SDG Outlook
//!
//! Umbrella crate for the SDG outlook workspace.
//!
//! - [`sdg_math`]: least squares regression and accuracy metrics
//! - [`sdg_forecast`]: the projection, classification and scoring engine
//!
//! ## Example
//!
//! ```
//! use sdg_outlook_workspace::sdg_forecast::{Indicator, IndicatorCatalog};
//!
//! let catalog = IndicatorCatalog::eu_2030();
//! assert_eq!(catalog.spec(Indicator::NeetRate).rule.describe(), "≤ 9.0");
//! ```

pub use sdg_forecast;
pub use sdg_math;
