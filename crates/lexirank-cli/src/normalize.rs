use lexirank_core::{normalize_ranks, Rank};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Rewrite a `{word: rank}` file with gaps as a dense `1..=N` ranking.
///
/// Returns the number of words written.
pub async fn normalize_file(input: &Path, output: &Path) -> anyhow::Result<usize> {
    let text = tokio::fs::read_to_string(input).await.map_err(|e| {
        anyhow::anyhow!("Failed to read '{}': {}", input.display(), e)
    })?;
    let ranks: HashMap<String, Rank> = serde_json::from_str(&text)?;
    let vocabulary = normalize_ranks(ranks);
    tokio::fs::write(output, serde_json::to_string_pretty(&vocabulary)?).await?;
    info!(
        input = %input.display(),
        output = %output.display(),
        words = vocabulary.len(),
        "Vocabulary normalized"
    );
    Ok(vocabulary.len())
}
