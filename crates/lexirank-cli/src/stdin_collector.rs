use async_trait::async_trait;
use lexirank_core::{
    prompt_until_valid, AnswerCollector, LexirankError, LexirankResult, Response, RetryPolicy,
};
use std::io::BufRead;

/// Terminal answer collector.
///
/// Prints each word to stderr (keeping stdout free for reports) and reads
/// the answer from stdin, re-prompting on invalid input per its policy.
pub struct StdinCollector {
    policy: RetryPolicy,
}

impl StdinCollector {
    /// Collector that re-prompts according to `policy`.
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }
}

/// Prompt shown for `word`. Retries carry a reminder of the valid answers.
pub fn format_prompt(word: &str, attempt: u32) -> String {
    let mut prompt = String::new();
    if attempt > 0 {
        prompt.push_str("  \x1b[33mPlease answer 1, 2 or 3.\x1b[0m\n");
    } else {
        prompt.push_str(&format!("\n  \x1b[1;37m{word}\x1b[0m\n"));
    }
    prompt.push_str("  1 = don't know, 2 = recognize, 3 = know: ");
    prompt
}

fn read_answer_line() -> LexirankResult<String> {
    let mut line = String::new();
    let read = std::io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        return Err(LexirankError::Answer("stdin closed before an answer".into()));
    }
    Ok(line)
}

#[async_trait]
impl AnswerCollector for StdinCollector {
    async fn collect(&self, word: &str) -> LexirankResult<Response> {
        prompt_until_valid(word, &self.policy, |attempt| {
            eprint!("{}", format_prompt(word, attempt));
            async {
                tokio::task::spawn_blocking(read_answer_line)
                    .await
                    .map_err(|e| LexirankError::Answer(format!("stdin reader failed: {e}")))?
            }
        })
        .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_first_prompt_shows_word() {
        let prompt = format_prompt("lantern", 0);
        assert!(prompt.contains("lantern"));
        assert!(prompt.contains("1 = don't know"));
        assert!(!prompt.contains("Please answer"));
    }

    #[test]
    fn test_retry_prompt_reminds_of_choices() {
        let prompt = format_prompt("lantern", 2);
        assert!(prompt.contains("Please answer 1, 2 or 3."));
        assert!(prompt.contains("33")); // Yellow ANSI code
        assert!(!prompt.contains("lantern"));
    }

    #[test]
    fn test_collector_is_object_safe() {
        let collector: Box<dyn AnswerCollector> =
            Box::new(StdinCollector::new(RetryPolicy::bounded(1)));
        drop(collector);
    }
}
