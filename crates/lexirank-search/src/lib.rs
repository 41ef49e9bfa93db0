//! Adaptive vocabulary sampling.
//!
//! The [`AdaptiveSearch`] controller walks rank space in fixed-width spans,
//! choosing each span's sampling density from the previous span's mean score,
//! then densifies around the span whose mean is closest to 50%.
//!
//! # Main types
//!
//! - [`SearchConfig`]: Span width, continuation threshold and density tiers.
//! - [`AdaptiveSearch`]: The coarse-to-fine state machine.
//! - [`SearchPhase`]: States of the controller.
//! - [`ChunkScoreTable`]: Insertion-ordered span→mean record.
//! - [`SimulatedRespondent`]: Rule-driven [`lexirank_core::AnswerCollector`] for dry runs.

/// Batch testing of sampled words.
pub mod batch;
/// Span→mean bookkeeping.
pub mod chunks;
/// Search parameters.
pub mod config;
/// The adaptive search state machine.
pub mod engine;
/// Fixed-interval sampling for the manual test mode.
pub mod fixed;
/// Simulated respondents.
pub mod respondent;
/// Untested-word selection within a span.
pub mod sampler;

pub use batch::test_words;
pub use chunks::{ChunkScore, ChunkScoreTable};
pub use config::SearchConfig;
pub use engine::{AdaptiveSearch, SearchOutcome, SearchPhase};
pub use fixed::{fixed_interval_words, run_fixed_interval};
pub use respondent::SimulatedRespondent;
pub use sampler::{sample_span, SampledWord};
