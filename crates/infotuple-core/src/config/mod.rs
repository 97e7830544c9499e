//! Configuration system for InfoTuple.
//! TOML-based: compiled defaults < config file < `INFOTUPLE_*` environment.

pub mod defaults;
pub mod experiment_config;
pub mod infotuple_config;
pub mod learner_config;
pub mod oracle_config;
pub mod response_model_config;
pub mod selector_config;

pub use experiment_config::ExperimentConfig;
pub use infotuple_config::InfoTupleConfig;
pub use learner_config::{LearnerConfig, SelectionLoss};
pub use oracle_config::{OracleConfig, OracleKind};
pub use response_model_config::ResponseModelConfig;
pub use selector_config::{EstimatorKind, SelectorConfig, SelectorStrategy};
