#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for lexirank-search.
//!
//! Covers termination of the expansion under adversarial respondents,
//! duplicate-prompt prevention, refinement placement and custom configs.

use std::sync::Arc;

use lexirank_core::{RankedVocabulary, Response, Span};
use lexirank_search::{AdaptiveSearch, SearchConfig, SearchPhase, SimulatedRespondent};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn vocab(n: u32) -> Arc<RankedVocabulary> {
    let words = (1..=n).map(|r| format!("word{r}"));
    Arc::new(RankedVocabulary::from_words(words).unwrap())
}

// ---------------------------------------------------------------------------
// 1. Termination
// ---------------------------------------------------------------------------

#[tokio::test]
async fn always_known_respondent_stops_at_vocabulary_end() {
    for size in [1, 999, 1000, 1001, 7500] {
        let v = vocab(size);
        let respondent = SimulatedRespondent::from_fn(v.clone(), |_| Response::Known);
        let outcome = AdaptiveSearch::new(SearchConfig::default(), &v, &respondent)
            .unwrap()
            .run()
            .await
            .unwrap();

        let spans_to_cover = size.div_ceil(1000) as usize;
        // One empty span ends the expansion, the overshoot adds another.
        assert_eq!(outcome.chunks.len(), spans_to_cover + 2, "size {size}");
        let mut newest_first = outcome.chunks.iter().rev();
        assert_eq!(newest_first.next().map(|c| c.mean), Some(0.0));
        assert_eq!(newest_first.next().map(|c| c.mean), Some(0.0));
        assert!(outcome.session.scores.highest_rank().unwrap() <= size);
    }
}

#[tokio::test]
async fn partial_recognition_keeps_expanding() {
    // 0.3 everywhere stays above the 0.25 continuation threshold.
    let v = vocab(4000);
    let respondent = SimulatedRespondent::from_fn(v.clone(), |_| Response::Recognized);
    let outcome = AdaptiveSearch::new(SearchConfig::default(), &v, &respondent)
        .unwrap()
        .run()
        .await
        .unwrap();
    assert_eq!(outcome.chunks.len(), 6);
    assert!(outcome.chunks.iter().take(4).all(|c| (c.mean - 0.3).abs() < 1e-12));
}

#[tokio::test]
async fn knows_nothing_stops_after_first_span() {
    let v = vocab(5000);
    let respondent = SimulatedRespondent::from_fn(v.clone(), |_| Response::Unknown);
    let outcome = AdaptiveSearch::new(SearchConfig::default(), &v, &respondent)
        .unwrap()
        .run()
        .await
        .unwrap();
    // Coarse scan plus overshoot; the first span is the earliest tie for the median.
    assert_eq!(outcome.chunks.len(), 2);
    // The overshoot ignores the weak-tier density and samples every 100th rank.
    let overshoot = outcome.chunks.iter().nth(1).unwrap();
    assert_eq!(overshoot.span, Span::new(1001, 2000));
    assert_eq!(overshoot.sampled, 10);
    assert_eq!(outcome.median, Some(Span::new(1, 1000)));
    let refined: Vec<Span> = outcome.refinements.iter().map(|c| c.span).collect();
    assert_eq!(refined, vec![Span::new(1, 1000), Span::new(1001, 2000)]);
}

// ---------------------------------------------------------------------------
// 2. No word is asked twice
// ---------------------------------------------------------------------------

#[tokio::test]
async fn every_prompt_is_a_new_word() {
    let v = vocab(6000);
    let respondent = SimulatedRespondent::threshold(v.clone(), 2400, 3100);
    let outcome = AdaptiveSearch::new(SearchConfig::default(), &v, &respondent)
        .unwrap()
        .run()
        .await
        .unwrap();
    assert_eq!(respondent.prompts(), outcome.session.tested.len());
    assert_eq!(respondent.prompts(), outcome.session.scores.len());
}

// ---------------------------------------------------------------------------
// 3. Refinement placement
// ---------------------------------------------------------------------------

#[tokio::test]
async fn densest_window_straddles_the_drop() {
    let v = vocab(3000);
    let respondent = SimulatedRespondent::threshold(v.clone(), 1500, 1500);
    let outcome = AdaptiveSearch::new(SearchConfig::default(), &v, &respondent)
        .unwrap()
        .run()
        .await
        .unwrap();

    let median = outcome.median.unwrap();
    assert!(median.contains(1500));

    // The refined window runs from the left neighbour to the right neighbour.
    let first = outcome.refinements.first().unwrap().span;
    let last = outcome.refinements.last().unwrap().span;
    assert!(first.lo < 1500 && 1500 < last.hi);
    assert!(outcome.refinements.iter().all(|c| c.sampled >= 35));

    // Around the drop the only samples are the refinement's, every 28 ranks.
    let scores = &outcome.session.scores;
    assert_eq!(scores.count_between(1401, 1600), 7);
    let expansion_near_drop = outcome
        .chunks
        .iter()
        .find(|c| c.span == median)
        .map(|c| c.sampled)
        .unwrap();
    assert_eq!(expansion_near_drop, 4);
}

// ---------------------------------------------------------------------------
// 4. Custom configuration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn narrower_spans_follow_config() {
    let v = vocab(2000);
    let respondent = SimulatedRespondent::threshold(v.clone(), 700, 700);
    let config = SearchConfig {
        span_width: 500,
        ..SearchConfig::default()
    };
    let mut search = AdaptiveSearch::new(config, &v, &respondent).unwrap();
    search.step().await.unwrap();
    let first = search.chunks().last().copied().unwrap();
    assert_eq!(first.span, Span::new(1, 500));
    assert_eq!(first.sampled, 10);

    while search.phase() != SearchPhase::Done {
        search.step().await.unwrap();
    }
    for span in search.refine_plan() {
        assert_eq!(span.width(), 500);
    }
    assert!(search.refine_plan().iter().any(|s| s.contains(700)));
}
