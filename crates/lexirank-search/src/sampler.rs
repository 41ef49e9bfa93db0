use lexirank_core::{LexirankError, LexirankResult, Rank, RankedVocabulary, Span};
use lexirank_session::TestedWordSet;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A word picked for testing, with its rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampledWord {
    /// Rank of the word in the vocabulary.
    pub rank: Rank,
    /// The word itself.
    pub word: String,
}

/// Pick untested words roughly every `interval` ranks inside `span`.
///
/// Candidates are `lo`, `lo + interval`, ... up to `hi`. A candidate whose
/// word was already tested is replaced by the next untested rank after it.
/// When that forward walk runs past `hi` or past the end of the vocabulary the
/// whole scan stops, so the result may be short or empty.
pub fn sample_span(
    vocabulary: &RankedVocabulary,
    tested: &TestedWordSet,
    span: Span,
    interval: u32,
) -> LexirankResult<Vec<SampledWord>> {
    let interval = interval.max(1);
    let lo = span.lo.max(1);
    let last = span
        .hi
        .min(Rank::try_from(vocabulary.len()).unwrap_or(Rank::MAX));

    let mut picked = Vec::new();
    let mut picked_ranks = HashSet::new();
    let mut candidate = lo;

    'scan: while candidate <= span.hi {
        let mut rank = candidate;
        loop {
            if rank > last {
                break 'scan;
            }
            let word = vocabulary
                .word_at(rank)
                .ok_or(LexirankError::MissingRank(rank))?;
            if !tested.contains(word) && !picked_ranks.contains(&rank) {
                picked_ranks.insert(rank);
                picked.push(SampledWord {
                    rank,
                    word: word.to_string(),
                });
                break;
            }
            rank += 1;
        }
        candidate = match candidate.checked_add(interval) {
            Some(next) => next,
            None => break,
        };
    }

    Ok(picked)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn vocab(n: u32) -> RankedVocabulary {
        let words = (1..=n).map(|r| format!("w{r}"));
        RankedVocabulary::from_words(words).unwrap()
    }

    fn ranks(words: &[SampledWord]) -> Vec<Rank> {
        words.iter().map(|w| w.rank).collect()
    }

    #[test]
    fn test_evenly_spaced_candidates() {
        let v = vocab(3000);
        let tested = TestedWordSet::new();
        let picked = sample_span(&v, &tested, Span::new(1, 1000), 100).unwrap();
        let expected: Vec<Rank> = (0..10).map(|i| 1 + 100 * i).collect();
        assert_eq!(ranks(&picked), expected);
        assert_eq!(picked[1].word, "w101");
    }

    #[test]
    fn test_tested_word_steps_forward() {
        let v = vocab(3000);
        let mut tested = TestedWordSet::new();
        tested.insert("w101");
        tested.insert("w102");
        let picked = sample_span(&v, &tested, Span::new(1, 300), 100).unwrap();
        assert_eq!(ranks(&picked), vec![1, 103, 201]);
    }

    #[test]
    fn test_walk_past_hi_ends_scan() {
        let v = vocab(3000);
        let mut tested = TestedWordSet::new();
        for r in 191..=200 {
            tested.insert(format!("w{r}"));
        }
        let picked = sample_span(&v, &tested, Span::new(1, 200), 10).unwrap();
        // Candidate 191 walks through 200 and stops the scan.
        assert_eq!(picked.len(), 19);
        assert_eq!(picked.last().unwrap().rank, 181);
    }

    #[test]
    fn test_walk_ends_whole_scan_not_just_candidate() {
        let v = vocab(100);
        let mut tested = TestedWordSet::new();
        for r in 11..=20 {
            tested.insert(format!("w{r}"));
        }
        // Candidate 11 would walk to 21 > hi = 20; nothing after it is scanned.
        let picked = sample_span(&v, &tested, Span::new(1, 20), 10).unwrap();
        assert_eq!(ranks(&picked), vec![1]);
    }

    #[test]
    fn test_span_beyond_vocabulary_is_empty() {
        let v = vocab(500);
        let tested = TestedWordSet::new();
        let picked = sample_span(&v, &tested, Span::new(1001, 2000), 100).unwrap();
        assert!(picked.is_empty());
        let partial = sample_span(&v, &tested, Span::new(1, 1000), 100).unwrap();
        assert_eq!(partial.len(), 5);
    }

    #[test]
    fn test_fully_tested_span_is_empty() {
        let v = vocab(50);
        let mut tested = TestedWordSet::new();
        for r in 1..=50 {
            tested.insert(format!("w{r}"));
        }
        let picked = sample_span(&v, &tested, Span::new(1, 50), 1).unwrap();
        assert!(picked.is_empty());
    }

    #[test]
    fn test_zero_interval_and_zero_lo_are_coerced() {
        let v = vocab(10);
        let tested = TestedWordSet::new();
        let picked = sample_span(&v, &tested, Span::new(0, 3), 0).unwrap();
        assert_eq!(ranks(&picked), vec![1, 2, 3]);
    }

    #[test]
    fn test_never_returns_tested_or_duplicate_words() {
        let v = vocab(2000);
        let mut tested = TestedWordSet::new();
        for r in (1..=2000).filter(|r| r % 3 != 0) {
            tested.insert(format!("w{r}"));
        }
        for interval in [1, 2, 7, 28, 100, 333] {
            let picked = sample_span(&v, &tested, Span::new(1, 2000), interval).unwrap();
            let mut seen = HashSet::new();
            for w in &picked {
                assert!(!tested.contains(&w.word), "{} was already tested", w.word);
                assert!(seen.insert(w.rank), "rank {} picked twice", w.rank);
            }
        }
    }
}
