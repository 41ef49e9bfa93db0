use lexirank_core::{LexirankError, LexirankResult};
use serde::{Deserialize, Serialize};

/// Parameters of the curve fit and falloff detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveConfig {
    /// Fraction of all points used in each local fit.
    #[serde(default = "default_frac")]
    pub frac: f64,
    /// Robustifying iterations after the initial fit.
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Fitted score at or above which a rank still counts as known.
    #[serde(default = "default_falloff_threshold")]
    pub falloff_threshold: f64,
}

fn default_frac() -> f64 {
    0.4
}
fn default_iterations() -> u32 {
    3
}
fn default_falloff_threshold() -> f64 {
    0.5
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            frac: default_frac(),
            iterations: default_iterations(),
            falloff_threshold: default_falloff_threshold(),
        }
    }
}

impl CurveConfig {
    /// Rejects a fraction outside (0, 1] or a threshold outside [0, 1].
    pub fn validate(&self) -> LexirankResult<()> {
        if !(self.frac > 0.0 && self.frac <= 1.0) {
            return Err(LexirankError::Config(format!(
                "frac must be in (0, 1], got {}",
                self.frac
            )));
        }
        if !(0.0..=1.0).contains(&self.falloff_threshold) {
            return Err(LexirankError::Config(format!(
                "falloff_threshold must be in [0, 1], got {}",
                self.falloff_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CurveConfig::default();
        assert_eq!(config.frac, 0.4);
        assert_eq!(config.iterations, 3);
        assert_eq!(config.falloff_threshold, 0.5);
        config.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_bad_frac() {
        for frac in [0.0, -0.1, 1.5, f64::NAN] {
            let config = CurveConfig {
                frac,
                ..CurveConfig::default()
            };
            assert!(config.validate().is_err(), "frac {frac} accepted");
        }
    }

    #[test]
    fn test_partial_toml() {
        let config: CurveConfig = toml::from_str("iterations = 0").unwrap();
        assert_eq!(config.iterations, 0);
        assert_eq!(config.frac, 0.4);
    }
}
