use crate::store::{ScoreStore, TestedWordSet};
use chrono::{DateTime, Utc};
use lexirank_core::{Rank, Response, ScoreRecord};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// All mutable state of one test run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSession {
    /// Identifies the run in logs.
    pub id: Uuid,
    /// Score of every answered rank.
    pub scores: ScoreStore,
    /// Words already asked about.
    pub tested: TestedWordSet,
    /// When the session was opened.
    pub created_at: DateTime<Utc>,
    /// When the last answer was recorded.
    pub updated_at: DateTime<Utc>,
}

impl SearchSession {
    /// Empty session with a fresh id.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            scores: ScoreStore::new(),
            tested: TestedWordSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Store the answer for `word` at `rank` and mark the word as tested.
    pub fn record_answer(&mut self, rank: Rank, word: &str, response: Response) -> f64 {
        let record = ScoreRecord::new(rank, response);
        self.scores.record(record);
        self.tested.insert(word);
        self.updated_at = Utc::now();
        record.score
    }

    /// Number of answers recorded so far.
    pub fn answer_count(&self) -> usize {
        self.scores.len()
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}
