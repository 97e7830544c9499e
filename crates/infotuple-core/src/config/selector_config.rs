use serde::{Deserialize, Serialize};

use super::defaults;

/// Body selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectorStrategy {
    /// Pick the candidate with maximal estimated information gain.
    #[default]
    InformationGain,
    /// Uniform random baseline.
    Random,
}

/// Which information-gain estimator to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EstimatorKind {
    /// Loop over orderings one at a time.
    #[default]
    Reference,
    /// Whole ordering batch per sample.
    Batched,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub strategy: SelectorStrategy,
    pub estimator: EstimatorKind,
    /// Fraction of candidates evaluated, in (0, 1].
    pub downsample_rate: f64,
    /// Monte-Carlo samples are `max(1, N / samples_divisor)`.
    pub samples_divisor: usize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            strategy: SelectorStrategy::default(),
            estimator: EstimatorKind::default(),
            downsample_rate: defaults::DEFAULT_DOWNSAMPLE_RATE,
            samples_divisor: defaults::DEFAULT_SAMPLES_DIVISOR,
        }
    }
}
