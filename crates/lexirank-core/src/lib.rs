//! Core types and error definitions for lexirank.
//!
//! This crate provides the foundational types shared across all lexirank
//! crates: error handling, the rank/span/score data model, the answer
//! collection trait, the ranked vocabulary and the proficiency tables.
//!
//! # Main types
//!
//! - [`LexirankError`]: Unified error enum for all lexirank subsystems.
//! - [`LexirankResult`]: Convenience alias for `Result<T, LexirankError>`.
//! - [`Span`]: A closed interval of ranks sampled as one batch.
//! - [`Response`]: The three-way recognition answer and its score.
//! - [`ScoreRecord`]: A single (rank, score) observation.
//! - [`RankedVocabulary`]: Dense 1-based rank↔word list.
//! - [`AnswerCollector`]: Capability that asks a person about one word.
//! - [`BreakpointTable`]: Ordered floor-lookup table for CEFR bands and labels.

/// Answer collection trait and retry policy.
pub mod answer;
/// Breakpoint tables mapping a known-word count to CEFR bands and labels.
pub mod proficiency;
/// Dense rank-ordered vocabulary.
pub mod vocabulary;

pub use answer::{prompt_until_valid, AnswerCollector, RetryPolicy};
pub use proficiency::{find_cefr, find_label, BreakpointTable, CEFR_BANDS, PROFICIENCY_LABELS};
pub use vocabulary::{normalize_ranks, RankedVocabulary};

use serde::{Deserialize, Serialize};
use std::fmt;

// --- Error types ---

/// Top-level error type for lexirank.
///
/// Each variant corresponds to a subsystem that can produce errors.
#[derive(Debug, thiserror::Error)]
pub enum LexirankError {
    /// The vocabulary is malformed (gaps, duplicate ranks, unknown format).
    #[error("Vocabulary error: {0}")]
    Vocabulary(String),

    /// A rank inside the vocabulary bounds has no word attached.
    #[error("Vocabulary has no word at rank {0}")]
    MissingRank(Rank),

    /// The answer collector could not produce a valid response.
    #[error("Answer error: {0}")]
    Answer(String),

    /// An error raised by the adaptive search controller.
    #[error("Search error: {0}")]
    Search(String),

    /// An error in configuration parsing or validation.
    #[error("Config error: {0}")]
    Config(String),

    /// A JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` alias using [`LexirankError`].
pub type LexirankResult<T> = Result<T, LexirankError>;

// --- Rank and span types ---

/// 1-based position of a word in a frequency-ordered vocabulary.
pub type Rank = u32;

/// A closed interval `[lo, hi]` of ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Lowest rank in the span (inclusive).
    pub lo: Rank,
    /// Highest rank in the span (inclusive).
    pub hi: Rank,
}

impl Span {
    /// Creates a span, swapping the bounds if they are given in reverse.
    pub fn new(lo: Rank, hi: Rank) -> Self {
        if lo <= hi {
            Self { lo, hi }
        } else {
            Self { lo: hi, hi: lo }
        }
    }

    /// Creates the span of `width` ranks starting at `lo`.
    pub fn starting_at(lo: Rank, width: u32) -> Self {
        let width = width.max(1);
        Self::new(lo, lo.saturating_add(width - 1))
    }

    /// Number of ranks covered by the span.
    pub fn width(&self) -> u32 {
        self.hi - self.lo + 1
    }

    /// Whether `rank` falls inside the span.
    pub fn contains(&self, rank: Rank) -> bool {
        (self.lo..=self.hi).contains(&rank)
    }

    /// The span of `width` ranks immediately after this one.
    pub fn next(&self, width: u32) -> Self {
        Self::starting_at(self.hi.saturating_add(1), width)
    }

    /// The span of `width` ranks immediately before this one, clamped at rank 1.
    ///
    /// Returns `None` when this span already starts at rank 1.
    pub fn previous(&self, width: u32) -> Option<Self> {
        if self.lo <= 1 {
            return None;
        }
        let hi = self.lo - 1;
        let lo = self.lo.saturating_sub(width.max(1)).max(1);
        Some(Self::new(lo, hi))
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{}]", self.lo, self.hi)
    }
}

// --- Response types ---

/// A person's self-reported recognition of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Response {
    /// Category 1: the word is not known at all.
    Unknown,
    /// Category 2: the word is recognized but cannot be defined.
    Recognized,
    /// Category 3: the word is known.
    Known,
}

impl Response {
    /// Parses the numeric category `1`, `2` or `3`.
    pub fn from_category(category: u8) -> Option<Self> {
        match category {
            1 => Some(Response::Unknown),
            2 => Some(Response::Recognized),
            3 => Some(Response::Known),
            _ => None,
        }
    }

    /// Parses a line of user input holding a single category digit.
    pub fn parse(input: &str) -> Option<Self> {
        let category: u8 = input.trim().parse().ok()?;
        Self::from_category(category)
    }

    /// The numeric category of this response.
    pub fn category(&self) -> u8 {
        match self {
            Response::Unknown => 1,
            Response::Recognized => 2,
            Response::Known => 3,
        }
    }

    /// Score of the response.
    ///
    /// A recognized-but-undefinable word keeps a non-zero storage strength
    /// with zero retrieval strength. The 0.3 value is what the falloff
    /// thresholds are calibrated against and must not change.
    pub fn score(&self) -> f64 {
        match self {
            Response::Unknown => 0.0,
            Response::Recognized => 0.3,
            Response::Known => 1.0,
        }
    }
}

// --- Score types ---

/// A single scored observation at a rank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Rank of the tested word.
    pub rank: Rank,
    /// Score of the response, one of 0.0, 0.3 or 1.0.
    pub score: f64,
}

impl ScoreRecord {
    /// Creates a record from a rank and the response given for it.
    pub fn new(rank: Rank, response: Response) -> Self {
        Self {
            rank,
            score: response.score(),
        }
    }
}

/// Arithmetic mean of a batch of scores, `0.0` when the batch is empty.
pub fn batch_mean(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}
