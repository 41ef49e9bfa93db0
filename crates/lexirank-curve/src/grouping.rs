use lexirank_core::{Rank, Span};
use lexirank_session::ScoreStore;
use serde::Serialize;
use std::fmt;

/// Scores that fall into one fixed-size rank group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreGroup {
    /// Ranks covered by the group.
    pub span: Span,
    /// Scores recorded inside the span, in rank order.
    pub scores: Vec<f64>,
    /// Mean of `scores`, `None` when nothing was tested there.
    pub mean: Option<f64>,
}

impl fmt::Display for ScoreGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Group [{}-{}]", self.span.lo, self.span.hi)
    }
}

/// Bucket scores into consecutive groups of `group_size` ranks.
///
/// Groups run from rank 1 up to the group holding the highest scored rank.
/// A group with no scores has no mean.
pub fn group_scores(scores: &ScoreStore, group_size: u32) -> Vec<ScoreGroup> {
    let group_size = group_size.max(1);
    let Some(highest) = scores.highest_rank() else {
        return Vec::new();
    };
    let mut groups: Vec<ScoreGroup> = (0..group_count(highest, group_size))
        .map(|g| ScoreGroup {
            span: Span::starting_at(g * group_size + 1, group_size),
            scores: Vec::new(),
            mean: None,
        })
        .collect();
    for record in scores.iter() {
        let idx = ((record.rank.max(1) - 1) / group_size) as usize;
        if let Some(group) = groups.get_mut(idx) {
            group.scores.push(record.score);
        }
    }
    for group in &mut groups {
        if !group.scores.is_empty() {
            group.mean = Some(group.scores.iter().sum::<f64>() / group.scores.len() as f64);
        }
    }
    groups
}

/// Number of groups needed to cover `highest` with groups of `group_size`.
pub fn group_count(highest: Rank, group_size: u32) -> u32 {
    highest.div_ceil(group_size.max(1))
}
