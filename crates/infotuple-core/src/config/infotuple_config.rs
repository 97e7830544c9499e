//! Top-level configuration aggregating all sub-configs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ExperimentConfig, LearnerConfig, OracleConfig, ResponseModelConfig, SelectorConfig};
use crate::errors::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InfoTupleConfig {
    pub experiment: ExperimentConfig,
    pub response_model: ResponseModelConfig,
    pub selector: SelectorConfig,
    pub oracle: OracleConfig,
    pub learner: LearnerConfig,
}

impl InfoTupleConfig {
    /// Load from a TOML file, apply environment overrides, then validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let mut config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.apply_env_overrides();
        config.validate()?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Parse a TOML string. Missing keys take defaults; no validation.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply environment variable overrides.
    /// Unparseable values are ignored.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup (environment in
    /// production, a map in tests).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        fn parsed<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
        ) -> Option<T> {
            lookup(key).and_then(|v| v.trim().parse().ok())
        }

        if let Some(v) = parsed(&lookup, "INFOTUPLE_SEED") {
            self.experiment.seed = v;
        }
        if let Some(v) = parsed(&lookup, "INFOTUPLE_BURN_IN") {
            self.experiment.burn_in = v;
        }
        if let Some(v) = parsed(&lookup, "INFOTUPLE_ITERATIONS") {
            self.experiment.iterations = v;
        }
        if let Some(v) = parsed(&lookup, "INFOTUPLE_MU") {
            self.response_model.mu = v;
        }
        if let Some(v) = parsed(&lookup, "INFOTUPLE_DOWNSAMPLE_RATE") {
            self.selector.downsample_rate = v;
        }
        if let Some(v) = parsed(&lookup, "INFOTUPLE_LEARNER_ITERATIONS") {
            self.learner.iterations = v;
        }
        if let Some(v) = parsed(&lookup, "INFOTUPLE_LEARNING_RATE") {
            self.learner.learning_rate = v;
        }
        if let Some(v) = parsed(&lookup, "INFOTUPLE_AGGREGATE_TIME_BUDGET_MS") {
            self.learner.aggregate_time_budget_ms = v;
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |field: &str, message: &str| {
            Err(ConfigError::ValidationFailed {
                field: field.to_string(),
                message: message.to_string(),
            })
        };

        let exp = &self.experiment;
        if exp.body_size < 2 {
            return fail("experiment.body_size", "must be at least 2");
        }
        if exp.n_items <= exp.body_size {
            return fail("experiment.n_items", "must exceed experiment.body_size");
        }
        if exp.dims == 0 {
            return fail("experiment.dims", "must be greater than 0");
        }
        if exp.iterations < exp.burn_in {
            return fail("experiment.iterations", "must be at least experiment.burn_in");
        }
        if !(self.response_model.mu.is_finite() && self.response_model.mu >= 0.0) {
            return fail("response_model.mu", "must be finite and non-negative");
        }
        let rate = self.selector.downsample_rate;
        if !(rate > 0.0 && rate <= 1.0) {
            return fail("selector.downsample_rate", "must lie in (0, 1]");
        }
        if self.selector.samples_divisor == 0 {
            return fail("selector.samples_divisor", "must be greater than 0");
        }
        let p = self.oracle.failure_probability;
        if !(p > 0.0 && p < 1.0) {
            return fail("oracle.failure_probability", "must lie in (0, 1)");
        }
        if !(self.learner.mu.is_finite() && self.learner.mu >= 0.0) {
            return fail("learner.mu", "must be finite and non-negative");
        }
        if !(self.learner.learning_rate.is_finite() && self.learner.learning_rate > 0.0) {
            return fail("learner.learning_rate", "must be finite and positive");
        }
        if !self.learner.momentum.is_finite() {
            return fail("learner.momentum", "must be finite");
        }
        Ok(())
    }
}
