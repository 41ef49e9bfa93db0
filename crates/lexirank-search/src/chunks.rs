use lexirank_core::Span;
use serde::{Deserialize, Serialize};

/// Mean score of one sampled span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChunkScore {
    /// The sampled span.
    pub span: Span,
    /// Mean score of the span's batch, `0.0` for an empty batch.
    pub mean: f64,
    /// Number of words asked about in the batch.
    pub sampled: usize,
}

/// Append-only, insertion-ordered record of span means.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChunkScoreTable {
    entries: Vec<ChunkScore>,
}

impl ChunkScoreTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the mean of a newly scored span.
    pub fn push(&mut self, chunk: ChunkScore) {
        self.entries.push(chunk);
    }

    /// Most recently scored span.
    pub fn last(&self) -> Option<&ChunkScore> {
        self.entries.last()
    }

    /// Number of scored spans.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no span has been scored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ChunkScore> {
        self.entries.iter()
    }

    /// Index and entry whose mean is closest to `target`.
    ///
    /// Ties go to the earliest inserted entry.
    pub fn closest_to(&self, target: f64) -> Option<(usize, &ChunkScore)> {
        let mut best: Option<(usize, &ChunkScore)> = None;
        for (idx, chunk) in self.entries.iter().enumerate() {
            let distance = (chunk.mean - target).abs();
            match best {
                Some((_, current)) if (current.mean - target).abs() <= distance => {}
                _ => best = Some((idx, chunk)),
            }
        }
        best
    }
}
