use infotuple_core::models::{Embedding, Response, RngState};
use proptest::prelude::*;
use rand::Rng;

proptest! {
    #[test]
    fn decomposition_yields_len_minus_two_triplets(body in proptest::sample::subsequence((1usize..40).collect::<Vec<_>>(), 2..8)) {
        let response = Response::new(0, body).unwrap();
        let triplets = response.decompose();
        prop_assert_eq!(triplets.len(), response.len() - 2);
        prop_assert!(triplets.iter().all(|t| t.head == 0));
    }

    #[test]
    fn rng_state_round_trip_reproduces_draws(seed in any::<u64>(), skip in 0usize..200, n in 1usize..64) {
        let mut rng = RngState::from_seed(seed).restore().unwrap();
        for _ in 0..skip {
            let _: u32 = rng.gen();
        }
        let json = serde_json::to_string(&RngState::capture(&rng)).unwrap();
        let expected: Vec<u64> = (0..n).map(|_| rng.gen()).collect();

        let state: RngState = serde_json::from_str(&json).unwrap();
        let mut restored = state.restore().unwrap();
        let actual: Vec<u64> = (0..n).map(|_| restored.gen()).collect();
        prop_assert_eq!(expected, actual);
    }

    #[test]
    fn normalized_embedding_has_unit_norm(coords in proptest::collection::vec(-10.0f64..10.0, 12)) {
        let mut e = Embedding::new(4, 3, coords).unwrap();
        if e.normalize() {
            prop_assert!((e.frobenius_norm() - 1.0).abs() < 1e-9);
        }
    }
}
