//! Shared fixtures for InfoTuple tests and benchmarks.
//!
//! Geometric builders for small ground-truth embeddings, plus typed loaders
//! for the JSON golden scenarios under `golden/`.

use std::path::PathBuf;

use infotuple_core::models::{Embedding, Triplet};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::de::DeserializeOwned;
use serde::Deserialize;

fn golden_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("golden")
}

/// Deserialize the golden scenario `golden/<name>`, panicking with the path
/// when it is missing or malformed.
pub fn load_fixture<T: DeserializeOwned>(name: &str) -> T {
    let path = golden_dir().join(name);
    let raw = std::fs::read(&path)
        .unwrap_or_else(|e| panic!("golden scenario {} unreadable: {e}", path.display()));
    serde_json::from_slice(&raw)
        .unwrap_or_else(|e| panic!("golden scenario {} malformed: {e}", path.display()))
}

/// One oracle query and the ranking a noiseless judge must return.
#[derive(Debug, Clone, Deserialize)]
pub struct OracleCase {
    pub tuple: Vec<usize>,
    pub expected: Vec<usize>,
}

/// `golden/unit_square.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct OracleScenario {
    pub description: String,
    pub points: Vec<Vec<f64>>,
    pub mu: f64,
    pub queries: Vec<OracleCase>,
}

impl OracleScenario {
    pub fn embedding(&self) -> Embedding {
        Embedding::from_rows(&self.points).expect("fixture points are rectangular")
    }
}

/// `golden/line_triplets.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct TripletScenario {
    pub description: String,
    pub points: Vec<Vec<f64>>,
    pub triplets: Vec<[usize; 3]>,
}

impl TripletScenario {
    pub fn embedding(&self) -> Embedding {
        Embedding::from_rows(&self.points).expect("fixture points are rectangular")
    }

    pub fn triplets(&self) -> Vec<Triplet> {
        self.triplets
            .iter()
            .map(|&[h, c, f]| Triplet::new(h, c, f))
            .collect()
    }
}

pub fn unit_square_scenario() -> OracleScenario {
    load_fixture("unit_square.json")
}

pub fn line_scenario() -> TripletScenario {
    load_fixture("line_triplets.json")
}

/// Corners `(0,0), (1,0), (0,1), (1,1)`.
pub fn unit_square() -> Embedding {
    Embedding::from_rows(&[
        vec![0.0, 0.0],
        vec![1.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 1.0],
    ])
    .expect("static rows")
}

/// Uniform `[0, 1)^dims` points from a fixed seed.
pub fn random_ground_truth(n_items: usize, dims: usize, seed: u64) -> Embedding {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Embedding::random_uniform(n_items, dims, &mut rng)
}

/// Two well-separated clusters of `per_cluster` points each, jittered
/// around `(0, 0)` and `(10, 10)`.
pub fn two_clusters(per_cluster: usize, seed: u64) -> Embedding {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut rows = Vec::with_capacity(per_cluster * 2);
    for center in [0.0, 10.0] {
        for _ in 0..per_cluster {
            rows.push(vec![
                center + rng.gen_range(-0.5..0.5),
                center + rng.gen_range(-0.5..0.5),
            ]);
        }
    }
    Embedding::from_rows(&rows).expect("rows share a width")
}
