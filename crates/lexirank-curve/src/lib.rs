//! Curve fitting over recorded scores and the resulting vocabulary estimate.
//!
//! Scores are smoothed with a robust locally weighted regression
//! ([`CurveSmoother`]). The falloff rank is the last rank where the fitted
//! curve is still at or above one half ([`find_falloff`]), and that rank is
//! mapped to a CEFR band and a proficiency label ([`estimate`]).
//!
//! # Main types
//!
//! - [`CurveConfig`]: Smoothing fraction, robustness iterations and falloff threshold.
//! - [`CurveSmoother`]: LOWESS fit over (rank, score) points.
//! - [`CurvePoint`]: One fitted point of the curve.
//! - [`VocabularyEstimate`]: Falloff rank, CEFR band, label and curve.
//! - [`ScoreGroup`]: Scores bucketed into fixed-size rank groups.

/// Smoothing and falloff parameters.
pub mod config;
/// End-to-end estimate from a score store.
pub mod estimate;
/// Falloff detection on a fitted curve.
pub mod falloff;
/// Fixed-size rank grouping of scores.
pub mod grouping;
/// Robust locally weighted regression.
pub mod lowess;

pub use config::CurveConfig;
pub use estimate::{estimate, VocabularyEstimate};
pub use falloff::find_falloff;
pub use grouping::{group_count, group_scores, ScoreGroup};
pub use lowess::{CurvePoint, CurveSmoother};
