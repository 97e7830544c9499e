//! Capability interfaces at the seams between components.

pub mod body_selector;
pub mod metric_learner;
pub mod oracle;

pub use body_selector::IBodySelector;
pub use metric_learner::IMetricLearner;
pub use oracle::IOracle;
