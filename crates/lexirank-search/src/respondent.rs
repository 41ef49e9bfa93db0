use async_trait::async_trait;
use lexirank_core::{AnswerCollector, LexirankResult, Rank, RankedVocabulary, Response};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

type AnswerRule = Box<dyn Fn(Rank) -> Response + Send + Sync>;

/// An [`AnswerCollector`] that answers from a rule over the word's rank.
///
/// Words missing from the vocabulary are answered as [`Response::Unknown`].
pub struct SimulatedRespondent {
    vocabulary: Arc<RankedVocabulary>,
    rule: AnswerRule,
    prompts: AtomicUsize,
}

impl SimulatedRespondent {
    /// Respondent answering with an arbitrary rule.
    pub fn from_fn<F>(vocabulary: Arc<RankedVocabulary>, rule: F) -> Self
    where
        F: Fn(Rank) -> Response + Send + Sync + 'static,
    {
        Self {
            vocabulary,
            rule: Box::new(rule),
            prompts: AtomicUsize::new(0),
        }
    }

    /// Knows every word up to `known_up_to`, recognizes words up to
    /// `partial_up_to`, and knows nothing beyond.
    pub fn threshold(
        vocabulary: Arc<RankedVocabulary>,
        known_up_to: Rank,
        partial_up_to: Rank,
    ) -> Self {
        Self::from_fn(vocabulary, move |rank| {
            if rank <= known_up_to {
                Response::Known
            } else if rank <= partial_up_to {
                Response::Recognized
            } else {
                Response::Unknown
            }
        })
    }

    /// Number of words asked so far.
    pub fn prompts(&self) -> usize {
        self.prompts.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for SimulatedRespondent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulatedRespondent")
            .field("vocabulary", &self.vocabulary.len())
            .field("prompts", &self.prompts())
            .finish()
    }
}

#[async_trait]
impl AnswerCollector for SimulatedRespondent {
    async fn collect(&self, word: &str) -> LexirankResult<Response> {
        self.prompts.fetch_add(1, Ordering::Relaxed);
        Ok(match self.vocabulary.rank_of(word) {
            Some(rank) => (self.rule)(rank),
            None => Response::Unknown,
        })
    }
}
