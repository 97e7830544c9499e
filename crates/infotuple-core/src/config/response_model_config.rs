use serde::{Deserialize, Serialize};

use super::defaults;

/// Response model used during query selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseModelConfig {
    /// Noise regularizer; smaller is closer to deterministic judgments.
    pub mu: f64,
}

impl Default for ResponseModelConfig {
    fn default() -> Self {
        Self {
            mu: defaults::DEFAULT_SELECTION_MU,
        }
    }
}
