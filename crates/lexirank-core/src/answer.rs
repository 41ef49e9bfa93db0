//! Answer collection for word recognition prompts.
//!
//! The search only ever sees a valid [`Response`]. Validation and re-prompting
//! of raw input belong to the collector, bounded or not by its [`RetryPolicy`].

use crate::{LexirankError, LexirankResult, Response};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::warn;

/// Capability that asks a person whether they know a word.
///
/// Implementations can be terminal prompts, scripted respondents in tests,
/// or any other front end. A call blocks until a valid response exists.
#[async_trait]
pub trait AnswerCollector: Send + Sync {
    /// Returns the person's response for `word`.
    async fn collect(&self, word: &str) -> LexirankResult<Response>;
}

/// How many times an invalid raw answer is re-prompted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Maximum number of prompts per word. `None` retries forever.
    #[serde(default)]
    pub max_attempts: Option<u32>,
}

impl RetryPolicy {
    /// Policy that re-prompts until a valid answer arrives.
    pub fn unbounded() -> Self {
        Self { max_attempts: None }
    }

    /// Policy that gives up after `max_attempts` prompts.
    pub fn bounded(max_attempts: u32) -> Self {
        Self {
            max_attempts: Some(max_attempts.max(1)),
        }
    }

    /// Rejects a bounded policy that would never prompt.
    pub fn validate(&self) -> LexirankResult<()> {
        if self.max_attempts == Some(0) {
            return Err(LexirankError::Config(
                "max_attempts must be at least 1; omit it to re-prompt forever".into(),
            ));
        }
        Ok(())
    }

    /// Whether a further prompt is allowed after `attempts_made` prompts.
    pub fn allows(&self, attempts_made: u32) -> bool {
        match self.max_attempts {
            Some(max) => attempts_made < max,
            None => true,
        }
    }
}

/// Reads raw answers through `read` until one parses as a [`Response`].
///
/// `read` receives the zero-based attempt number. Errors from `read` are
/// returned as-is; running out of attempts is an [`LexirankError::Answer`].
pub async fn prompt_until_valid<F, Fut>(
    word: &str,
    policy: &RetryPolicy,
    mut read: F,
) -> LexirankResult<Response>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = LexirankResult<String>>,
{
    let mut attempt = 0;
    while policy.allows(attempt) {
        let raw = read(attempt).await?;
        if let Some(response) = Response::parse(&raw) {
            return Ok(response);
        }
        warn!(word, attempt, input = %raw.trim(), "Rejected answer, expected 1, 2 or 3");
        attempt += 1;
    }
    Err(LexirankError::Answer(format!(
        "No valid answer for '{word}' after {attempt} attempt(s)"
    )))
}
