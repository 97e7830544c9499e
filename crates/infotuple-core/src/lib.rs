//! # infotuple-core
//!
//! Foundation crate for the InfoTuple active ordinal embedding engine.
//! Defines the data model, traits, errors, config, and tracing setup.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod models;
pub mod permutations;
pub mod traits;
pub mod tracing_setup;

// Re-export the most commonly used types at the crate root.
pub use config::InfoTupleConfig;
pub use errors::{InfoTupleError, InfoTupleResult};
pub use models::{
    Embedding, FitBudget, FitOutcome, FitStatus, Response, RngState, Selection, Triplet, Tuple,
};
