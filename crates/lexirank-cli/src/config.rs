use lexirank_core::{RankedVocabulary, RetryPolicy};
use lexirank_curve::CurveConfig;
use lexirank_search::SearchConfig;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Contents of `lexirank.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LexirankConfig {
    /// Path of the `{word: rank}` vocabulary JSON.
    #[serde(default = "default_vocabulary")]
    pub vocabulary: PathBuf,
    /// Adaptive search tuning.
    #[serde(default)]
    pub search: SearchConfig,
    /// Smoothing and falloff tuning.
    #[serde(default)]
    pub curve: CurveConfig,
    /// Re-prompting of invalid answers in interactive mode.
    #[serde(default)]
    pub input: RetryPolicy,
}

fn default_vocabulary() -> PathBuf {
    PathBuf::from("word_to_index.json")
}

impl Default for LexirankConfig {
    fn default() -> Self {
        Self {
            vocabulary: default_vocabulary(),
            search: SearchConfig::default(),
            curve: CurveConfig::default(),
            input: RetryPolicy::default(),
        }
    }
}

impl LexirankConfig {
    /// Parse and validate TOML text.
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.search.validate()?;
        config.curve.validate()?;
        config.input.validate()?;
        Ok(config)
    }
}

/// Load the config file, falling back to defaults when it does not exist.
pub async fn load_config(path: &Path) -> anyhow::Result<LexirankConfig> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => LexirankConfig::from_toml(&text)
            .map_err(|e| anyhow::anyhow!("Invalid config file '{}': {}", path.display(), e)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "No config file, using defaults");
            Ok(LexirankConfig::default())
        }
        Err(e) => Err(anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)),
    }
}

/// Read a vocabulary JSON file in any supported shape.
pub async fn load_vocabulary(path: &Path) -> anyhow::Result<RankedVocabulary> {
    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        anyhow::anyhow!("Failed to read vocabulary '{}': {}", path.display(), e)
    })?;
    let vocabulary = RankedVocabulary::from_json_str(&text)?;
    debug!(path = %path.display(), words = vocabulary.len(), "Vocabulary loaded");
    Ok(vocabulary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_toml_is_default() {
        let config = LexirankConfig::from_toml("").unwrap();
        assert_eq!(config, LexirankConfig::default());
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = LexirankConfig::from_toml(
            r#"
            vocabulary = "lists/fr.json"

            [search]
            span_width = 500

            [curve]
            frac = 0.3

            [input]
            max_attempts = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.vocabulary, PathBuf::from("lists/fr.json"));
        assert_eq!(config.search.span_width, 500);
        assert_eq!(config.search.refine_divisor, 35);
        assert_eq!(config.curve.frac, 0.3);
        assert_eq!(config.curve.iterations, 3);
        assert_eq!(config.input, RetryPolicy::bounded(3));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(LexirankConfig::from_toml("[search]\ncontinue_threshold = 0.0").is_err());
        assert!(LexirankConfig::from_toml("[curve]\nfrac = 2.0").is_err());
    }

    #[test]
    fn test_zero_max_attempts_is_rejected() {
        let err = LexirankConfig::from_toml("[input]\nmax_attempts = 0").unwrap_err();
        assert!(err.to_string().contains("max_attempts"));
        let config = LexirankConfig::from_toml("[input]\nmax_attempts = 1").unwrap();
        assert_eq!(config.input, RetryPolicy::bounded(1));
    }

    #[tokio::test]
    async fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).await.unwrap();
        assert_eq!(config, LexirankConfig::default());
    }

    #[tokio::test]
    async fn test_load_config_and_vocabulary_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let vocab_path = dir.path().join("vocab.json");
        std::fs::write(&vocab_path, r#"{"the": 1, "of": 2, "and": 3}"#).unwrap();

        let mut file = tempfile::NamedTempFile::new_in(dir.path()).unwrap();
        writeln!(file, "vocabulary = {:?}", vocab_path.display().to_string()).unwrap();
        let config = load_config(file.path()).await.unwrap();

        let vocabulary = load_vocabulary(&config.vocabulary).await.unwrap();
        assert_eq!(vocabulary.len(), 3);
        assert_eq!(vocabulary.word_at(2), Some("of"));
    }

    #[tokio::test]
    async fn test_malformed_config_names_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[search\nspan_width = ").unwrap();
        let err = load_config(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
    }
}
