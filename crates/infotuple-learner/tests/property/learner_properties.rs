//! Property tests for the probabilistic MDS learner.

use infotuple_core::models::{Embedding, FitBudget, Triplet};
use infotuple_learner::{empirical_loss, ProbabilisticMds};
use proptest::prelude::*;
use rand::seq::index::sample;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn random_triplets(n_items: usize, count: usize, seed: u64) -> Vec<Triplet> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let picked = sample(&mut rng, n_items, 3);
            Triplet::new(picked.index(0), picked.index(1), picked.index(2))
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn iterates_have_unit_norm_and_best_never_regresses(
        n_items in 4usize..9,
        dims in 1usize..4,
        count in 1usize..20,
        seed in any::<u64>(),
    ) {
        let initial = test_fixtures::random_ground_truth(n_items, dims, seed);
        let triplets = random_triplets(n_items, count, seed ^ 0x5eed);
        let learner = ProbabilisticMds::default().with_iterations(15);

        let outcome = learner
            .fit_triplets(&initial, &triplets, None, &FitBudget::unlimited())
            .unwrap();

        for report in &outcome.trajectory {
            prop_assert!((report.frobenius_norm - 1.0).abs() < 1e-9);
        }
        let start = empirical_loss(&initial, &triplets).unwrap();
        prop_assert!(outcome.best_loss <= start);
        prop_assert_eq!(outcome.embedding.dims(), dims);
    }

    #[test]
    fn empirical_loss_is_a_fraction(
        coords in prop::collection::vec(-1.0f64..1.0, 12),
        seed in any::<u64>(),
    ) {
        let embedding = Embedding::new(6, 2, coords).unwrap();
        let loss = empirical_loss(&embedding, &random_triplets(6, 10, seed)).unwrap();
        prop_assert!((0.0..=1.0).contains(&loss));
    }
}
