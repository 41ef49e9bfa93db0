use lexirank_core::{LexirankError, LexirankResult};
use serde::{Deserialize, Serialize};

/// Parameters of the adaptive search.
///
/// Sampling intervals are expressed as divisors of the span width, so a
/// divisor of 10 on a 1000-rank span asks about every 100th word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Width of every span in ranks.
    #[serde(default = "default_span_width")]
    pub span_width: u32,
    /// Expansion continues while the latest span mean is at least this.
    #[serde(default = "default_continue_threshold")]
    pub continue_threshold: f64,
    /// Divisor for the first span.
    #[serde(default = "default_baseline_divisor")]
    pub coarse_divisor: u32,
    /// Divisor when the previous mean falls in no tier, and for the overshoot span.
    #[serde(default = "default_baseline_divisor")]
    pub baseline_divisor: u32,
    /// Previous mean at or above which vocabulary counts as mastered.
    #[serde(default = "default_mastered_mean")]
    pub mastered_mean: f64,
    /// Divisor after a mastered span.
    #[serde(default = "default_mastered_divisor")]
    pub mastered_divisor: u32,
    /// Previous mean at or above which vocabulary counts as strong.
    #[serde(default = "default_strong_mean")]
    pub strong_mean: f64,
    /// Divisor after a strong span.
    #[serde(default = "default_strong_divisor")]
    pub strong_divisor: u32,
    /// Previous mean at or below which the region counts as uncertain.
    #[serde(default = "default_weak_mean")]
    pub weak_mean: f64,
    /// Divisor after an uncertain span.
    #[serde(default = "default_weak_divisor")]
    pub weak_divisor: u32,
    /// Divisor for the refinement spans around the median.
    #[serde(default = "default_refine_divisor")]
    pub refine_divisor: u32,
    /// Mean the median span is chosen to be closest to.
    #[serde(default = "default_median_target")]
    pub median_target: f64,
}

fn default_span_width() -> u32 {
    1000
}
fn default_continue_threshold() -> f64 {
    0.25
}
fn default_baseline_divisor() -> u32 {
    10
}
fn default_mastered_mean() -> f64 {
    0.95
}
fn default_mastered_divisor() -> u32 {
    3
}
fn default_strong_mean() -> f64 {
    0.80
}
fn default_strong_divisor() -> u32 {
    5
}
fn default_weak_mean() -> f64 {
    0.40
}
fn default_weak_divisor() -> u32 {
    15
}
fn default_refine_divisor() -> u32 {
    35
}
fn default_median_target() -> f64 {
    0.5
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            span_width: default_span_width(),
            continue_threshold: default_continue_threshold(),
            coarse_divisor: default_baseline_divisor(),
            baseline_divisor: default_baseline_divisor(),
            mastered_mean: default_mastered_mean(),
            mastered_divisor: default_mastered_divisor(),
            strong_mean: default_strong_mean(),
            strong_divisor: default_strong_divisor(),
            weak_mean: default_weak_mean(),
            weak_divisor: default_weak_divisor(),
            refine_divisor: default_refine_divisor(),
            median_target: default_median_target(),
        }
    }
}

impl SearchConfig {
    /// Sampling interval in ranks for a width divisor, never below 1.
    pub fn interval_for(&self, divisor: u32) -> u32 {
        (self.span_width / divisor.max(1)).max(1)
    }

    /// Width divisor for the next span given the previous span's mean.
    ///
    /// Clearly mastered regions are crossed quickly and the uncertain
    /// region below `weak_mean` is sampled densely.
    pub fn divisor_after(&self, previous_mean: f64) -> u32 {
        if previous_mean >= self.mastered_mean {
            self.mastered_divisor
        } else if previous_mean >= self.strong_mean {
            self.strong_divisor
        } else if previous_mean <= self.weak_mean {
            self.weak_divisor
        } else {
            self.baseline_divisor
        }
    }

    /// Sampling interval for the next span given the previous span's mean.
    pub fn interval_after(&self, previous_mean: f64) -> u32 {
        self.interval_for(self.divisor_after(previous_mean))
    }

    /// Reject settings under which the expansion could not terminate.
    pub fn validate(&self) -> LexirankResult<()> {
        if self.span_width == 0 {
            return Err(LexirankError::Config("span_width must be at least 1".into()));
        }
        if !(self.continue_threshold > 0.0 && self.continue_threshold <= 1.0) {
            return Err(LexirankError::Config(format!(
                "continue_threshold must be in (0, 1], got {}",
                self.continue_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.median_target) {
            return Err(LexirankError::Config(format!(
                "median_target must be in [0, 1], got {}",
                self.median_target
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
    fn test_density_tiers() {
        let config = SearchConfig::default();
        assert_eq!(config.interval_after(1.0), 333);
        assert_eq!(config.interval_after(0.95), 333);
        assert_eq!(config.interval_after(0.94), 200);
        assert_eq!(config.interval_after(0.80), 200);
        assert_eq!(config.interval_after(0.79), 100);
        assert_eq!(config.interval_after(0.41), 100);
        assert_eq!(config.interval_after(0.40), 66);
        assert_eq!(config.interval_after(0.0), 66);
    }

    #[test]
    fn test_interval_never_below_one() {
        let config = SearchConfig {
            span_width: 20,
            ..SearchConfig::default()
        };
        assert_eq!(config.interval_for(35), 1);
        assert_eq!(config.interval_for(0), 20);
        assert_eq!(SearchConfig::default().interval_for(35), 28);
    }

    #[test]
    fn test_validate() {
        SearchConfig::default().validate().unwrap();
        let stuck = SearchConfig {
            continue_threshold: 0.0,
            ..SearchConfig::default()
        };
        assert!(stuck.validate().is_err());
        let empty = SearchConfig {
            span_width: 0,
            ..SearchConfig::default()
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: SearchConfig = toml::from_str("span_width = 500\nrefine_divisor = 50").unwrap();
        assert_eq!(config.span_width, 500);
        assert_eq!(config.refine_divisor, 50);
        assert_eq!(config.continue_threshold, 0.25);
        assert_eq!(config.interval_for(config.refine_divisor), 10);
    }
}
