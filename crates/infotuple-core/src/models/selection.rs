use serde::{Deserialize, Serialize};

use super::Tuple;

/// Result of a body selection.
///
/// `gains` and `probabilities` are indexed like the evaluated candidates and
/// exist for diagnostics only; nothing downstream reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub tuple: Tuple,
    pub gains: Vec<f64>,
    pub probabilities: Vec<f64>,
}
