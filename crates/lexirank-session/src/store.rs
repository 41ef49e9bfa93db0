use lexirank_core::{Rank, ScoreRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Accumulated rank→score observations, ordered by rank.
///
/// Entries are only ever inserted or overwritten, so the store never shrinks
/// during a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreStore {
    scores: BTreeMap<Rank, f64>,
}

impl ScoreStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a score, replacing any earlier score at the same rank.
    pub fn record(&mut self, record: ScoreRecord) -> Option<f64> {
        self.scores.insert(record.rank, record.score)
    }

    /// Score recorded at `rank`.
    pub fn get(&self, rank: Rank) -> Option<f64> {
        self.scores.get(&rank).copied()
    }

    /// Number of scored ranks.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether nothing has been scored yet.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Highest scored rank.
    pub fn highest_rank(&self) -> Option<Rank> {
        self.scores.keys().next_back().copied()
    }

    /// Iterate records in ascending rank order.
    pub fn iter(&self) -> impl Iterator<Item = ScoreRecord> + '_ {
        self.scores
            .iter()
            .map(|(&rank, &score)| ScoreRecord { rank, score })
    }

    /// Number of scored ranks inside `lo..=hi`.
    pub fn count_between(&self, lo: Rank, hi: Rank) -> usize {
        if lo > hi {
            return 0;
        }
        self.scores.range(lo..=hi).count()
    }
}

/// Words already put to the person in this session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestedWordSet {
    words: HashSet<String>,
}

impl TestedWordSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `word` as tested. Returns `false` if it was already tested.
    pub fn insert(&mut self, word: impl Into<String>) -> bool {
        self.words.insert(word.into())
    }

    /// Whether `word` has been tested.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of tested words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether no word has been tested yet.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
