//! Session state for one vocabulary test run.
//!
//! A [`SearchSession`] owns the [`ScoreStore`] and the [`TestedWordSet`].
//! It is created at the start of a run, mutated only by the search that owns
//! it, and consumed when the estimate is computed.

/// The session value owning all per-run state.
pub mod session;
/// Rank→score accumulator and the set of already-asked words.
pub mod store;

pub use session::SearchSession;
pub use store::{ScoreStore, TestedWordSet};
