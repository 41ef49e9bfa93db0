use crate::{LexirankError, LexirankResult, Rank};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use tracing::debug;

/// A dense, 1-based, rank-ordered vocabulary.
///
/// Rank 1 is the most frequent word. Every rank in `1..=len()` has exactly
/// one word and every word has exactly one rank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedVocabulary {
    words: Vec<String>,
    ranks: HashMap<String, Rank>,
}

impl RankedVocabulary {
    /// Builds a vocabulary from words listed in rank order.
    pub fn from_words<I, S>(words: I) -> LexirankResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vocabulary = Self::default();
        for word in words {
            let word = word.into();
            let rank = vocabulary.words.len() as Rank + 1;
            if let Some(existing) = vocabulary.ranks.insert(word.clone(), rank) {
                return Err(LexirankError::Vocabulary(format!(
                    "Word '{word}' appears at rank {existing} and rank {rank}"
                )));
            }
            vocabulary.words.push(word);
        }
        Ok(vocabulary)
    }

    /// Builds a vocabulary from a word→rank map.
    ///
    /// Ranks must be exactly `1..=N` with no gaps or duplicates. Use
    /// [`normalize_ranks`] first for hand-edited lists.
    pub fn from_word_ranks(ranks: HashMap<String, Rank>) -> LexirankResult<Self> {
        let len = ranks.len();
        let mut slots: Vec<Option<String>> = vec![None; len];
        for (word, rank) in ranks {
            let Some(idx) = (rank as usize).checked_sub(1).filter(|i| *i < len) else {
                return Err(LexirankError::Vocabulary(format!(
                    "Rank {rank} of '{word}' is outside 1..={len}; run `lexirank normalize` first"
                )));
            };
            if let Some(other) = &slots[idx] {
                return Err(LexirankError::Vocabulary(format!(
                    "Rank {rank} is shared by '{other}' and '{word}'"
                )));
            }
            slots[idx] = Some(word);
        }
        let words = slots
            .into_iter()
            .enumerate()
            .map(|(i, w)| w.ok_or(LexirankError::MissingRank(i as Rank + 1)))
            .collect::<LexirankResult<Vec<_>>>()?;
        Self::from_words(words)
    }

    /// Parses a vocabulary from JSON.
    ///
    /// Accepts an object `{"word": rank, ...}`, a frequency list
    /// `[["word", frequency], ...]` sorted by descending frequency, or a
    /// plain array of words in rank order.
    pub fn from_json_str(json: &str) -> LexirankResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        match value {
            serde_json::Value::Object(_) => {
                let ranks: HashMap<String, Rank> = serde_json::from_value(value)?;
                Self::from_word_ranks(ranks)
            }
            serde_json::Value::Array(entries) => {
                let words = entries
                    .into_iter()
                    .enumerate()
                    .map(|(i, entry)| match entry {
                        serde_json::Value::Array(pair) => match pair.into_iter().next() {
                            Some(serde_json::Value::String(word)) => Ok(word),
                            _ => Err(LexirankError::Vocabulary(format!(
                                "Entry {} does not start with a word",
                                i + 1
                            ))),
                        },
                        serde_json::Value::String(word) => Ok(word),
                        _ => Err(LexirankError::Vocabulary(format!(
                            "Entry {} is neither a word nor a [word, frequency] pair",
                            i + 1
                        ))),
                    })
                    .collect::<LexirankResult<Vec<_>>>()?;
                let vocabulary = Self::from_words(words)?;
                debug!(words = vocabulary.len(), "Loaded frequency list");
                Ok(vocabulary)
            }
            _ => Err(LexirankError::Vocabulary(
                "Expected a JSON object or array".to_string(),
            )),
        }
    }

    /// Word at `rank`, or `None` outside `1..=len()`.
    pub fn word_at(&self, rank: Rank) -> Option<&str> {
        let idx = (rank as usize).checked_sub(1)?;
        self.words.get(idx).map(String::as_str)
    }

    /// Rank of `word`, if it is in the vocabulary.
    pub fn rank_of(&self, word: &str) -> Option<Rank> {
        self.ranks.get(word).copied()
    }

    /// Highest rank, equal to the number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the vocabulary holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterates `(rank, word)` pairs in rank order.
    pub fn iter(&self) -> impl Iterator<Item = (Rank, &str)> {
        self.words
            .iter()
            .enumerate()
            .map(|(i, w)| (i as Rank + 1, w.as_str()))
    }
}

/// Serializes as a `{"word": rank}` object in rank order.
impl Serialize for RankedVocabulary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.words.len()))?;
        for (rank, word) in self.iter() {
            map.serialize_entry(word, &rank)?;
        }
        map.end()
    }
}

/// Reassigns ranks `1..=N` to a word→rank map, keeping the existing rank order.
///
/// Used after words have been removed by hand from a ranked list. Words that
/// share a rank are ordered alphabetically.
pub fn normalize_ranks(ranks: HashMap<String, Rank>) -> RankedVocabulary {
    let mut entries: Vec<(String, Rank)> = ranks.into_iter().collect();
    entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

    let mut vocabulary = RankedVocabulary::default();
    for (word, _) in entries {
        let rank = vocabulary.words.len() as Rank + 1;
        vocabulary.ranks.insert(word.clone(), rank);
        vocabulary.words.push(word);
    }
    vocabulary
}
