use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Loss used to pick the best iterate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectionLoss {
    /// Fraction of violated triplets.
    #[default]
    Empirical,
    /// Mean negative log response probability.
    Log,
}

/// Metric learner (probabilistic MDS) settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnerConfig {
    pub mu: f64,
    pub iterations: usize,
    pub learning_rate: f64,
    pub momentum: f64,
    pub selection_loss: SelectionLoss,
    /// Soft budget for refits of the shared embedding.
    pub aggregate_time_budget_ms: u64,
    /// Soft budget for refits of a participant's embedding.
    pub participant_time_budget_ms: u64,
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self {
            mu: defaults::DEFAULT_LEARNER_MU,
            iterations: defaults::DEFAULT_LEARNER_ITERATIONS,
            learning_rate: defaults::DEFAULT_LEARNING_RATE,
            momentum: defaults::DEFAULT_MOMENTUM,
            selection_loss: SelectionLoss::default(),
            aggregate_time_budget_ms: defaults::DEFAULT_AGGREGATE_TIME_BUDGET_MS,
            participant_time_budget_ms: defaults::DEFAULT_PARTICIPANT_TIME_BUDGET_MS,
        }
    }
}

impl LearnerConfig {
    pub fn aggregate_time_budget(&self) -> Duration {
        Duration::from_millis(self.aggregate_time_budget_ms)
    }

    pub fn participant_time_budget(&self) -> Duration {
        Duration::from_millis(self.participant_time_budget_ms)
    }
}
