//! Property tests for body selection.

use infotuple_core::config::EstimatorKind;
use infotuple_core::models::{Embedding, RngState};
use infotuple_selection::{candidate_tuples, random_tuple, select_body, GainSettings};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn selection_is_reproducible_from_a_restored_state(
        seed in any::<u64>(),
        head in 0usize..6,
        rate in 0.1f64..=1.0,
        batched in any::<bool>(),
    ) {
        let mut setup = RngState::from_seed(seed).restore().unwrap();
        let embedding = Embedding::random_uniform(6, 2, &mut setup);
        let state = RngState::capture(&setup);
        let settings = GainSettings {
            mu: 0.05,
            downsample_rate: rate,
            samples_divisor: 2,
            estimator: if batched { EstimatorKind::Batched } else { EstimatorKind::Reference },
        };

        let mut a = state.restore().unwrap();
        let mut b = state.restore().unwrap();
        let first = select_body(&embedding, candidate_tuples(6, head, 2).unwrap(), &settings, &mut a).unwrap();
        let second = select_body(&embedding, candidate_tuples(6, head, 2).unwrap(), &settings, &mut b).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(RngState::capture(&a), RngState::capture(&b));
    }

    #[test]
    fn selected_tuple_is_a_candidate(seed in any::<u64>(), head in 0usize..6) {
        let mut rng = RngState::from_seed(seed).restore().unwrap();
        let embedding = Embedding::random_uniform(6, 3, &mut rng);
        let candidates = candidate_tuples(6, head, 3).unwrap();
        let settings = GainSettings {
            mu: 0.05,
            downsample_rate: 0.2,
            samples_divisor: 3,
            estimator: EstimatorKind::Batched,
        };
        let selection = select_body(&embedding, candidates.clone(), &settings, &mut rng).unwrap();
        prop_assert!(candidates.contains(&selection.tuple));
        prop_assert_eq!(selection.tuple.head(), head);
    }

    #[test]
    fn random_bodies_are_distinct_and_exclude_head(
        seed in any::<u64>(),
        n in 3usize..12,
        head_seed in any::<usize>(),
    ) {
        let head = head_seed % n;
        let body_size = 2.min(n - 1);
        let mut rng = RngState::from_seed(seed).restore().unwrap();
        let tuple = random_tuple(n, head, body_size, &mut rng).unwrap();
        prop_assert!(!tuple.body().contains(&head));
        prop_assert!(tuple.body().iter().all(|&b| b < n));
    }
}
