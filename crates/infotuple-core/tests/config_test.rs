use std::collections::HashMap;

use infotuple_core::config::*;
use infotuple_core::errors::ConfigError;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = InfoTupleConfig::from_toml("").unwrap();

    assert_eq!(config.experiment.n_items, 10);
    assert_eq!(config.experiment.dims, 2);
    assert_eq!(config.experiment.body_size, 2);
    assert_eq!(config.experiment.burn_in, 1);

    assert_eq!(config.response_model.mu, 0.05);

    assert_eq!(config.selector.strategy, SelectorStrategy::InformationGain);
    assert_eq!(config.selector.estimator, EstimatorKind::Reference);
    assert_eq!(config.selector.downsample_rate, 1.0);
    assert_eq!(config.selector.samples_divisor, 10);

    assert_eq!(config.oracle.kind, OracleKind::Deterministic);
    assert_eq!(config.oracle.failure_probability, 0.05);

    assert_eq!(config.learner.mu, 0.5);
    assert_eq!(config.learner.iterations, 5_000);
    assert_eq!(config.learner.selection_loss, SelectionLoss::Empirical);
    assert_eq!(config.learner.aggregate_time_budget_ms, 30_000);

    assert!(config.validate().is_ok());
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[experiment]
n_items = 25
body_size = 3

[selector]
strategy = "random"
estimator = "batched"
downsample_rate = 0.25

[oracle]
kind = "plackett_luce"

[learner]
selection_loss = "log"
"#;
    let config = InfoTupleConfig::from_toml(toml).unwrap();
    assert_eq!(config.experiment.n_items, 25);
    assert_eq!(config.experiment.body_size, 3);
    assert_eq!(config.experiment.dims, 2);
    assert_eq!(config.selector.strategy, SelectorStrategy::Random);
    assert_eq!(config.selector.estimator, EstimatorKind::Batched);
    assert_eq!(config.selector.downsample_rate, 0.25);
    assert_eq!(config.oracle.kind, OracleKind::PlackettLuce);
    assert_eq!(config.learner.selection_loss, SelectionLoss::Log);
    assert!(config.validate().is_ok());
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let err = InfoTupleConfig::from_toml("[experiment\nn_items = ").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn toml_round_trip_preserves_values() {
    let mut config = InfoTupleConfig::default();
    config.experiment.seed = 1234;
    config.learner.momentum = 0.25;
    let text = config.to_toml().unwrap();
    let back = InfoTupleConfig::from_toml(&text).unwrap();
    assert_eq!(back, config);
}

#[test]
fn overrides_apply_and_ignore_garbage() {
    let vars: HashMap<&str, &str> = [
        ("INFOTUPLE_SEED", "99"),
        ("INFOTUPLE_MU", "0.3"),
        ("INFOTUPLE_DOWNSAMPLE_RATE", "not-a-number"),
        ("INFOTUPLE_LEARNER_ITERATIONS", " 250 "),
    ]
    .into_iter()
    .collect();

    let mut config = InfoTupleConfig::default();
    config.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));

    assert_eq!(config.experiment.seed, 99);
    assert_eq!(config.response_model.mu, 0.3);
    assert_eq!(config.selector.downsample_rate, 1.0);
    assert_eq!(config.learner.iterations, 250);
}

fn field_of(err: ConfigError) -> String {
    match err {
        ConfigError::ValidationFailed { field, .. } => field,
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn validation_rejects_out_of_range_values() {
    let mut c = InfoTupleConfig::default();
    c.selector.downsample_rate = 0.0;
    assert_eq!(field_of(c.validate().unwrap_err()), "selector.downsample_rate");

    let mut c = InfoTupleConfig::default();
    c.selector.downsample_rate = 1.5;
    assert_eq!(field_of(c.validate().unwrap_err()), "selector.downsample_rate");

    let mut c = InfoTupleConfig::default();
    c.experiment.body_size = 1;
    assert_eq!(field_of(c.validate().unwrap_err()), "experiment.body_size");

    let mut c = InfoTupleConfig::default();
    c.experiment.n_items = 2;
    assert_eq!(field_of(c.validate().unwrap_err()), "experiment.n_items");

    let mut c = InfoTupleConfig::default();
    c.oracle.failure_probability = 1.0;
    assert_eq!(field_of(c.validate().unwrap_err()), "oracle.failure_probability");

    let mut c = InfoTupleConfig::default();
    c.response_model.mu = -0.1;
    assert_eq!(field_of(c.validate().unwrap_err()), "response_model.mu");
}

#[test]
fn load_reports_missing_file() {
    let err = InfoTupleConfig::load(std::path::Path::new("/definitely/not/here.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}
