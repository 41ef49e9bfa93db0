use crate::batch::test_words;
use crate::chunks::{ChunkScore, ChunkScoreTable};
use crate::config::SearchConfig;
use crate::sampler::sample_span;
use lexirank_core::{AnswerCollector, LexirankError, LexirankResult, RankedVocabulary, Span};
use lexirank_session::SearchSession;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// States of the adaptive search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    /// Sample the first span at coarse density.
    CoarseScan,
    /// Keep sampling following spans while the person still knows words.
    Expand,
    /// Sample one more span past the drop.
    Overshoot,
    /// Pick the span whose mean is closest to the median target.
    SelectMedian,
    /// Densely resample the median span and its neighbours.
    Refine,
    /// Nothing left to ask.
    Done,
}

impl fmt::Display for SearchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchPhase::CoarseScan => write!(f, "coarse_scan"),
            SearchPhase::Expand => write!(f, "expand"),
            SearchPhase::Overshoot => write!(f, "overshoot"),
            SearchPhase::SelectMedian => write!(f, "select_median"),
            SearchPhase::Refine => write!(f, "refine"),
            SearchPhase::Done => write!(f, "done"),
        }
    }
}

/// Everything a finished search hands back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// The session holding every recorded score.
    pub session: SearchSession,
    /// Span means from the coarse scan, expansion and overshoot.
    pub chunks: ChunkScoreTable,
    /// The span chosen as median, if any span was scored.
    pub median: Option<Span>,
    /// Span means of the refinement pass, in the order they were sampled.
    pub refinements: Vec<ChunkScore>,
}

/// Coarse-to-fine controller over rank space.
///
/// 1. `CoarseScan` samples `[1, span_width]`.
/// 2. `Expand` samples the following span while the latest mean stays at or
///    above `continue_threshold`, at a density picked from that mean.
/// 3. `Overshoot` samples one more span at baseline density.
/// 4. `SelectMedian` picks the span whose mean is closest to `median_target`.
/// 5. `Refine` resamples the median and its neighbours at `refine_divisor`.
///
/// The tested-word set keeps refinement from repeating earlier prompts.
pub struct AdaptiveSearch<'a> {
    config: SearchConfig,
    vocabulary: &'a RankedVocabulary,
    collector: &'a dyn AnswerCollector,
    session: SearchSession,
    chunks: ChunkScoreTable,
    phase: SearchPhase,
    median: Option<Span>,
    refine_plan: Vec<Span>,
    refinements: Vec<ChunkScore>,
}

impl<'a> AdaptiveSearch<'a> {
    /// Create a search with a fresh session.
    pub fn new(
        config: SearchConfig,
        vocabulary: &'a RankedVocabulary,
        collector: &'a dyn AnswerCollector,
    ) -> LexirankResult<Self> {
        Self::with_session(config, vocabulary, collector, SearchSession::new())
    }

    /// Create a search that records into an existing session.
    pub fn with_session(
        config: SearchConfig,
        vocabulary: &'a RankedVocabulary,
        collector: &'a dyn AnswerCollector,
        session: SearchSession,
    ) -> LexirankResult<Self> {
        config.validate()?;
        if vocabulary.is_empty() {
            return Err(LexirankError::Vocabulary("Vocabulary is empty".into()));
        }
        Ok(Self {
            config,
            vocabulary,
            collector,
            session,
            chunks: ChunkScoreTable::new(),
            phase: SearchPhase::CoarseScan,
            median: None,
            refine_plan: Vec::new(),
            refinements: Vec::new(),
        })
    }

    /// Phase the next `step` will run.
    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// Answers collected so far.
    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    /// Expansion span means scored so far.
    pub fn chunks(&self) -> &ChunkScoreTable {
        &self.chunks
    }

    /// Spans the refinement pass will sample, once the median is selected.
    pub fn refine_plan(&self) -> &[Span] {
        &self.refine_plan
    }

    /// Run every phase to completion.
    pub async fn run(mut self) -> LexirankResult<SearchOutcome> {
        info!(
            session = %self.session.id,
            vocabulary = self.vocabulary.len(),
            span_width = self.config.span_width,
            "Starting adaptive search"
        );
        while self.phase != SearchPhase::Done {
            self.step().await?;
        }
        info!(
            session = %self.session.id,
            answers = self.session.answer_count(),
            spans = self.chunks.len(),
            "Adaptive search finished"
        );
        Ok(SearchOutcome {
            session: self.session,
            chunks: self.chunks,
            median: self.median,
            refinements: self.refinements,
        })
    }

    /// Perform the work of the current phase and move to the next one.
    pub async fn step(&mut self) -> LexirankResult<SearchPhase> {
        let width = self.config.span_width;
        let next = match self.phase {
            SearchPhase::CoarseScan => {
                let span = Span::starting_at(1, width);
                let interval = self.config.interval_for(self.config.coarse_divisor);
                let chunk = self.score_span(span, interval).await?;
                self.chunks.push(chunk);
                SearchPhase::Expand
            }
            SearchPhase::Expand => {
                let last = *self.last_chunk()?;
                if last.mean >= self.config.continue_threshold {
                    let span = last.span.next(width);
                    let interval = self.config.interval_after(last.mean);
                    let chunk = self.score_span(span, interval).await?;
                    self.chunks.push(chunk);
                    SearchPhase::Expand
                } else {
                    SearchPhase::Overshoot
                }
            }
            SearchPhase::Overshoot => {
                let span = self.last_chunk()?.span.next(width);
                let interval = self.config.interval_for(self.config.baseline_divisor);
                let chunk = self.score_span(span, interval).await?;
                self.chunks.push(chunk);
                SearchPhase::SelectMedian
            }
            SearchPhase::SelectMedian => {
                self.plan_refinement()?;
                SearchPhase::Refine
            }
            SearchPhase::Refine => {
                let idx = self.refinements.len();
                match self.refine_plan.get(idx).copied() {
                    Some(span) => {
                        let interval = self.config.interval_for(self.config.refine_divisor);
                        let chunk = self.score_span(span, interval).await?;
                        self.refinements.push(chunk);
                        SearchPhase::Refine
                    }
                    None => SearchPhase::Done,
                }
            }
            SearchPhase::Done => SearchPhase::Done,
        };
        if next != self.phase {
            debug!(session = %self.session.id, from = %self.phase, to = %next, "Phase transition");
        }
        self.phase = next;
        Ok(next)
    }

    fn last_chunk(&self) -> LexirankResult<&ChunkScore> {
        self.chunks.last().ok_or_else(|| {
            LexirankError::Search(format!("No span scored before phase {}", self.phase))
        })
    }

    async fn score_span(&mut self, span: Span, interval: u32) -> LexirankResult<ChunkScore> {
        let words = sample_span(self.vocabulary, &self.session.tested, span, interval)?;
        let mean = test_words(&words, self.collector, &mut self.session).await?;
        info!(
            session = %self.session.id,
            phase = %self.phase,
            span = %span,
            interval,
            sampled = words.len(),
            mean,
            "Scored span"
        );
        Ok(ChunkScore {
            span,
            mean,
            sampled: words.len(),
        })
    }

    fn plan_refinement(&mut self) -> LexirankResult<()> {
        let width = self.config.span_width;
        let (idx, median) = self
            .chunks
            .closest_to(self.config.median_target)
            .map(|(idx, chunk)| (idx, chunk.span))
            .ok_or_else(|| LexirankError::Search("No scored span to pick a median from".into()))?;
        let is_first = idx == 0;
        let is_last = idx + 1 == self.chunks.len();

        let mut plan = Vec::with_capacity(3);
        if !is_first {
            if let Some(left) = median.previous(width) {
                plan.push(left);
            }
        }
        plan.push(median);
        if !is_last || is_first {
            plan.push(median.next(width));
        }

        info!(
            session = %self.session.id,
            median = %median,
            refine_spans = plan.len(),
            "Selected median span"
        );
        self.median = Some(median);
        self.refine_plan = plan;
        Ok(())
    }
}
