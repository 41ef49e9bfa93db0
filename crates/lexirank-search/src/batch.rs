use crate::sampler::SampledWord;
use lexirank_core::{batch_mean, AnswerCollector, LexirankResult};
use lexirank_session::SearchSession;
use tracing::debug;

/// Ask about each word in order, record the scores and return the batch mean.
///
/// Every answer overwrites the score at its rank and marks the word as
/// tested. An empty batch returns `0.0`.
pub async fn test_words(
    words: &[SampledWord],
    collector: &dyn AnswerCollector,
    session: &mut SearchSession,
) -> LexirankResult<f64> {
    let mut scores = Vec::with_capacity(words.len());
    for sampled in words {
        let response = collector.collect(&sampled.word).await?;
        let score = session.record_answer(sampled.rank, &sampled.word, response);
        debug!(
            session = %session.id,
            rank = sampled.rank,
            word = %sampled.word,
            score,
            "Recorded answer"
        );
        scores.push(score);
    }
    Ok(batch_mean(&scores))
}
