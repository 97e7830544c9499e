use serde::{Deserialize, Serialize};

use super::defaults;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OracleKind {
    #[default]
    Deterministic,
    PlackettLuce,
}

/// Simulated oracle settings, used by the offline driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub kind: OracleKind,
    /// Probability that the closest item is not drawn first.
    pub failure_probability: f64,
    /// Seed of the oracle's private stream.
    pub seed: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            kind: OracleKind::default(),
            failure_probability: defaults::DEFAULT_FAILURE_PROBABILITY,
            seed: defaults::DEFAULT_ORACLE_SEED,
        }
    }
}
