//! # infotuple-session
//!
//! The online experiment engine. Participants are served one query at a
//! time and answer asynchronously; every answer feeds both the
//! participant's own embedding and the shared aggregate embedding.
//!
//! [`steps`] holds the state transitions as free functions over explicit
//! state; [`Experiment`] wraps them with a concurrent participant registry,
//! the shared aggregate, and the query RNG checkpoint.

pub mod aggregate;
pub mod experiment;
pub mod participant;
pub mod steps;

pub use aggregate::{AggregateState, ModelSnapshot, SharedAggregate};
pub use experiment::Experiment;
pub use participant::ParticipantState;
pub use steps::{
    next_query, record_response, QueryOutcome, RecordOutcome, RefitReport, StepContext,
};
