//! Property tests for participant bookkeeping.

use infotuple_core::config::InfoTupleConfig;
use infotuple_core::traits::IOracle;
use infotuple_oracle::DeterministicOracle;
use infotuple_session::Experiment;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn head_and_iteration_track_answer_count(
        n_items in 3usize..7,
        answers in 1usize..15,
        seed in any::<u64>(),
    ) {
        let mut config = InfoTupleConfig::default();
        config.experiment.n_items = n_items;
        config.experiment.body_size = 2;
        config.experiment.burn_in = 1;
        config.experiment.iterations = 2;
        config.experiment.seed = seed;
        config.learner.iterations = 5;

        let experiment = Experiment::new(config).unwrap();
        let mut oracle = DeterministicOracle::new(test_fixtures::random_ground_truth(n_items, 2, seed));
        for _ in 0..answers {
            let tuple = experiment.next_query("p").unwrap();
            prop_assert!(!tuple.body().contains(&tuple.head()));
            let response = oracle.respond(&tuple).unwrap();
            experiment.record_response("p", &response).unwrap();
        }

        let p = experiment.participant_snapshot("p").unwrap();
        prop_assert_eq!(p.iteration * n_items + p.head, answers);
        prop_assert!(p.head < n_items);
        prop_assert_eq!(p.triplets.len(), answers);
        prop_assert_eq!(experiment.model_snapshot().unwrap().num_reported_answers, answers as u64);
    }
}
