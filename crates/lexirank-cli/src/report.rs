use lexirank_core::Span;
use lexirank_curve::{ScoreGroup, VocabularyEstimate};
use lexirank_search::{ChunkScore, ChunkScoreTable, SearchOutcome};
use lexirank_session::ScoreStore;
use serde::Serialize;

/// Printed on stderr before the first interactive prompt.
pub const INSTRUCTIONS: &str = "\
For each word, answer:
  1  I don't know it
  2  I recognize it, but can't define it
  3  I know it";

const UNDETERMINED: &str =
    "Estimated vocabulary:  undetermined (no tested rank reached the falloff threshold)";

/// Everything `--json` prints after a test or simulation.
#[derive(Debug, Serialize)]
pub struct TestReport<'a> {
    /// Falloff estimate with its fitted curve.
    pub estimate: &'a VocabularyEstimate,
    /// Every recorded score, keyed by rank.
    pub scores: &'a ScoreStore,
    /// Expansion span means in scoring order.
    pub chunks: &'a ChunkScoreTable,
    /// Span chosen for refinement.
    pub median: Option<Span>,
    /// Span means of the refinement pass.
    pub refinements: &'a [ChunkScore],
}

impl<'a> TestReport<'a> {
    /// Borrows the parts of a finished search.
    pub fn new(estimate: &'a VocabularyEstimate, outcome: &'a SearchOutcome) -> Self {
        Self {
            estimate,
            scores: &outcome.session.scores,
            chunks: &outcome.chunks,
            median: outcome.median,
            refinements: &outcome.refinements,
        }
    }
}

/// Per-span means of the search, with the median span marked.
pub fn format_chunks(outcome: &SearchOutcome) -> String {
    let mut lines = vec!["Span means:".to_string()];
    for chunk in outcome.chunks.iter() {
        let marker = if outcome.median == Some(chunk.span) {
            "  <- median"
        } else {
            ""
        };
        lines.push(format!(
            "  {:<13} {:.2}  ({} words){marker}",
            chunk.span.to_string(),
            chunk.mean,
            chunk.sampled
        ));
    }
    join_lines(&lines)
}

/// Human-readable summary of the estimate.
pub fn format_estimate(estimate: &VocabularyEstimate) -> String {
    let mut lines = vec![format!("Words tested:          {}", estimate.observations)];
    match (estimate.known_words, estimate.cefr, estimate.label) {
        (Some(known), Some(cefr), Some(label)) => {
            lines.push(format!("Estimated vocabulary:  {known} words"));
            lines.push(format!("CEFR level:            {cefr}"));
            lines.push(format!("Description:           {label}"));
        }
        _ => lines.push(UNDETERMINED.to_string()),
    }
    join_lines(&lines)
}

/// One line per rank group, `n/a` for groups without a tested word.
pub fn format_groups(groups: &[ScoreGroup]) -> String {
    let lines: Vec<String> = groups
        .iter()
        .map(|group| match group.mean {
            Some(mean) => format!("{group}: {mean:.2} (n={})", group.scores.len()),
            None => format!("{group}: n/a"),
        })
        .collect();
    join_lines(&lines)
}

fn join_lines(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}
