//! Error handling for InfoTuple.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod infotuple_error;
pub mod learner_error;
pub mod model_error;
pub mod oracle_error;
pub mod rng_state_error;
pub mod selector_error;
pub mod session_error;

pub use config_error::ConfigError;
pub use infotuple_error::{InfoTupleError, InfoTupleResult};
pub use learner_error::{LearnerError, LearnerResult};
pub use model_error::{ModelError, ModelResult};
pub use oracle_error::{OracleError, OracleResult};
pub use rng_state_error::RngStateError;
pub use selector_error::{SelectorError, SelectorResult};
pub use session_error::{SessionError, SessionResult};
