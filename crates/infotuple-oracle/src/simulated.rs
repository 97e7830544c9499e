use infotuple_core::config::{OracleConfig, OracleKind};
use infotuple_core::errors::OracleResult;
use infotuple_core::models::{Embedding, Response, Tuple};
use infotuple_core::traits::IOracle;

use crate::{DeterministicOracle, PlackettLuceOracle};

/// The closed set of simulated judges, chosen at construction.
#[derive(Debug, Clone)]
pub enum SimulatedOracle {
    Deterministic(DeterministicOracle),
    PlackettLuce(PlackettLuceOracle),
}

impl SimulatedOracle {
    pub fn from_config(config: &OracleConfig, ground_truth: Embedding) -> OracleResult<Self> {
        Ok(match config.kind {
            OracleKind::Deterministic => Self::Deterministic(DeterministicOracle::new(ground_truth)),
            OracleKind::PlackettLuce => Self::PlackettLuce(PlackettLuceOracle::new(
                ground_truth,
                config.failure_probability,
                config.seed,
            )?),
        })
    }

    pub fn ground_truth(&self) -> &Embedding {
        match self {
            Self::Deterministic(o) => o.ground_truth(),
            Self::PlackettLuce(o) => o.ground_truth(),
        }
    }
}

impl IOracle for SimulatedOracle {
    fn respond(&mut self, tuple: &Tuple) -> OracleResult<Response> {
        match self {
            Self::Deterministic(o) => o.respond(tuple),
            Self::PlackettLuce(o) => o.respond(tuple),
        }
    }
}

impl From<DeterministicOracle> for SimulatedOracle {
    fn from(oracle: DeterministicOracle) -> Self {
        Self::Deterministic(oracle)
    }
}

impl From<PlackettLuceOracle> for SimulatedOracle {
    fn from(oracle: PlackettLuceOracle) -> Self {
        Self::PlackettLuce(oracle)
    }
}
