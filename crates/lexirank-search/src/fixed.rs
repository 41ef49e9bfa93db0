use crate::batch::test_words;
use crate::sampler::SampledWord;
use lexirank_core::{AnswerCollector, LexirankError, LexirankResult, Rank, RankedVocabulary};
use lexirank_session::SearchSession;
use tracing::info;

/// Words at ranks `interval`, `2 * interval`, ... for `count` steps.
///
/// Stops early at the end of the vocabulary.
pub fn fixed_interval_words(
    vocabulary: &RankedVocabulary,
    interval: u32,
    count: u32,
) -> Vec<SampledWord> {
    let interval = interval.max(1);
    (1..=count)
        .map_while(|i| i.checked_mul(interval))
        .map_while(|rank: Rank| {
            vocabulary.word_at(rank).map(|word| SampledWord {
                rank,
                word: word.to_string(),
            })
        })
        .collect()
}

/// Manual test mode: ask about every `interval`-th word, `count` times.
///
/// Fails when `count` is zero or when not even rank `interval` exists.
pub async fn run_fixed_interval(
    vocabulary: &RankedVocabulary,
    collector: &dyn AnswerCollector,
    interval: u32,
    count: u32,
) -> LexirankResult<SearchSession> {
    if count == 0 {
        return Err(LexirankError::Config("count must be at least 1".into()));
    }
    let words = fixed_interval_words(vocabulary, interval, count);
    if words.is_empty() {
        return Err(LexirankError::Vocabulary(format!(
            "No word at rank {interval}; the vocabulary has {} words",
            vocabulary.len()
        )));
    }
    let mut session = SearchSession::new();
    let mean = test_words(&words, collector, &mut session).await?;
    info!(
        session = %session.id,
        interval,
        asked = words.len(),
        mean,
        "Fixed-interval test finished"
    );
    Ok(session)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::respondent::SimulatedRespondent;
    use std::sync::Arc;

    fn vocab(n: u32) -> Arc<RankedVocabulary> {
        let words = (1..=n).map(|r| format!("w{r}"));
        Arc::new(RankedVocabulary::from_words(words).unwrap())
    }

    #[test]
    fn test_fixed_interval_ranks() {
        let v = vocab(1000);
        let words = fixed_interval_words(&v, 250, 10);
        let ranks: Vec<Rank> = words.iter().map(|w| w.rank).collect();
        assert_eq!(ranks, vec![250, 500, 750, 1000]);
        assert_eq!(words[0].word, "w250");
    }

    #[tokio::test]
    async fn test_run_fixed_interval_records_scores() {
        let v = vocab(1000);
        let respondent = SimulatedRespondent::threshold(v.clone(), 300, 600);
        let session = run_fixed_interval(&v, &respondent, 100, 8).await.unwrap();
        assert_eq!(session.answer_count(), 8);
        assert_eq!(session.scores.get(300), Some(1.0));
        assert_eq!(session.scores.get(600), Some(0.3));
        assert_eq!(session.scores.get(700), Some(0.0));
    }

    #[tokio::test]
    async fn test_interval_past_vocabulary_is_an_error() {
        let v = vocab(10);
        let respondent = SimulatedRespondent::threshold(v.clone(), 5, 5);
        let result = run_fixed_interval(&v, &respondent, 50, 3).await;
        let err = result.unwrap_err();
        assert!(err.to_string().contains("rank 50"));
    }

    #[tokio::test]
    async fn test_zero_count_blames_the_count() {
        let v = vocab(1000);
        let respondent = SimulatedRespondent::threshold(v.clone(), 300, 600);
        let result = run_fixed_interval(&v, &respondent, 100, 0).await;
        let err = result.unwrap_err();
        assert!(matches!(err, LexirankError::Config(_)));
        assert!(err.to_string().contains("count"));
        assert_eq!(respondent.prompts(), 0);
    }
}
