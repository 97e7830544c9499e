//! Property tests for the response model and the information gain estimators.

use infotuple_core::permutations::permutations;
use infotuple_response::{
    distance_spread, information_gain, information_gain_batched, normalize_in_place,
    pair_probability, tuple_probability,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

proptest! {
    #[test]
    fn pair_probability_is_a_probability(
        b in 0.0f64..10.0,
        c in 0.0f64..10.0,
        mu in 0.001f64..5.0,
    ) {
        let p = pair_probability(b, c, mu).unwrap();
        prop_assert!(p > 0.0 && p < 1.0, "p = {}", p);
    }

    #[test]
    fn swapping_a_pair_gives_the_complement(
        b in 0.0f64..10.0,
        c in 0.0f64..10.0,
        mu in 0.001f64..5.0,
    ) {
        let forward = pair_probability(b, c, mu).unwrap();
        let backward = pair_probability(c, b, mu).unwrap();
        prop_assert!((forward + backward - 1.0).abs() < 1e-12);
    }

    #[test]
    fn farther_second_item_raises_probability(
        b in 0.0f64..5.0,
        c in 0.0f64..5.0,
        delta in 0.01f64..5.0,
        mu in 0.001f64..5.0,
    ) {
        let base = pair_probability(b, c, mu).unwrap();
        prop_assert!(pair_probability(b, c + delta, mu).unwrap() > base);
        prop_assert!(pair_probability(b + delta, c, mu).unwrap() < base);
    }

    #[test]
    fn normalized_orderings_sum_to_one(
        distances in prop::collection::vec(0.0f64..4.0, 2..5),
        mu in 0.01f64..2.0,
    ) {
        let positions: Vec<usize> = (0..distances.len()).collect();
        let mut weights: Vec<f64> = permutations(&positions)
            .iter()
            .map(|ordering| {
                let ranked: Vec<f64> = ordering.iter().map(|&i| distances[i]).collect();
                tuple_probability(&ranked, mu).unwrap()
            })
            .collect();
        normalize_in_place(&mut weights).unwrap();
        let total: f64 = weights.iter().sum();
        prop_assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn gain_is_non_negative_and_estimators_agree(
        coords in prop::collection::vec(-2.0f64..2.0, 10),
        seed in any::<u64>(),
        samples in 1usize..6,
    ) {
        let rows: Vec<Vec<f64>> = coords.chunks(2).map(<[f64]>::to_vec).collect();
        let embedding = infotuple_core::Embedding::from_rows(&rows).unwrap();
        let spread = distance_spread(&embedding).unwrap();

        let mut a = ChaCha8Rng::seed_from_u64(seed);
        let mut b = ChaCha8Rng::seed_from_u64(seed);
        let reference = information_gain(&embedding, 0, &[1, 2, 3], samples, spread, 0.05, &mut a).unwrap();
        let batched = information_gain_batched(&embedding, 0, &[1, 2, 3], samples, spread, 0.05, &mut b).unwrap();

        prop_assert!(reference >= -1e-12, "gain = {}", reference);
        prop_assert!((reference - batched).abs() < 1e-12);
    }
}
