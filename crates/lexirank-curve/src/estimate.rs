use crate::config::CurveConfig;
use crate::falloff::find_falloff;
use crate::lowess::{CurvePoint, CurveSmoother};
use lexirank_core::{find_cefr, find_label, Rank};
use lexirank_session::ScoreStore;
use serde::Serialize;
use tracing::info;

/// The outcome of a test: falloff rank, proficiency strings and the curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VocabularyEstimate {
    /// Estimated number of known words, `None` when undetermined.
    pub known_words: Option<Rank>,
    /// CEFR band for `known_words`.
    pub cefr: Option<&'static str>,
    /// Proficiency description for `known_words`.
    pub label: Option<&'static str>,
    /// Number of scored words the curve was fitted on.
    pub observations: usize,
    /// The smoothed curve, ascending by rank.
    pub curve: Vec<CurvePoint>,
}

/// Fit the recorded scores and turn the falloff rank into an estimate.
pub fn estimate(scores: &ScoreStore, config: &CurveConfig) -> VocabularyEstimate {
    let curve = CurveSmoother::from_config(config).smooth_scores(scores);
    let known_words = find_falloff(&curve, config.falloff_threshold);
    info!(
        observations = scores.len(),
        known_words = ?known_words,
        "Estimated vocabulary size"
    );
    VocabularyEstimate {
        known_words,
        cefr: known_words.map(find_cefr),
        label: known_words.map(find_label),
        observations: scores.len(),
        curve,
    }
}
