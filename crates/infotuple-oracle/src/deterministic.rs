use infotuple_core::errors::OracleResult;
use infotuple_core::models::{Embedding, Response, Tuple};
use infotuple_core::traits::IOracle;

use crate::check_tuple;

/// Noiseless judge: ranks the body by ascending true distance to the head.
///
/// The sort is stable, so equidistant items keep their presentation order.
#[derive(Debug, Clone)]
pub struct DeterministicOracle {
    ground_truth: Embedding,
}

impl DeterministicOracle {
    pub fn new(ground_truth: Embedding) -> Self {
        Self { ground_truth }
    }

    pub fn ground_truth(&self) -> &Embedding {
        &self.ground_truth
    }
}

impl IOracle for DeterministicOracle {
    fn respond(&mut self, tuple: &Tuple) -> OracleResult<Response> {
        check_tuple(&self.ground_truth, tuple)?;
        let head = tuple.head();
        let mut ranked: Vec<(usize, f64)> = tuple
            .body()
            .iter()
            .map(|&b| (b, self.ground_truth.distance(head, b)))
            .collect();
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
        Ok(Response::new(head, ranked.into_iter().map(|(b, _)| b).collect())?)
    }
}
