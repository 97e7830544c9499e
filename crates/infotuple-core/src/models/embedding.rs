use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::{ModelError, ModelResult};

/// An N×d matrix of item coordinates, stored row-major.
///
/// The dimensionality is fixed for the lifetime of the value; fits replace
/// the whole embedding rather than resizing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEmbedding")]
pub struct Embedding {
    n_items: usize,
    dims: usize,
    coords: Vec<f64>,
}

#[derive(Deserialize)]
struct RawEmbedding {
    n_items: usize,
    dims: usize,
    coords: Vec<f64>,
}

impl TryFrom<RawEmbedding> for Embedding {
    type Error = ModelError;

    fn try_from(raw: RawEmbedding) -> ModelResult<Self> {
        Self::new(raw.n_items, raw.dims, raw.coords)
    }
}

impl Embedding {
    /// Build an embedding from row-major coordinates.
    pub fn new(n_items: usize, dims: usize, coords: Vec<f64>) -> ModelResult<Self> {
        let expected = n_items * dims;
        if coords.len() != expected {
            return Err(ModelError::ShapeMismatch {
                expected,
                actual: coords.len(),
            });
        }
        Ok(Self {
            n_items,
            dims,
            coords,
        })
    }

    /// All-zero embedding.
    pub fn zeros(n_items: usize, dims: usize) -> Self {
        Self {
            n_items,
            dims,
            coords: vec![0.0; n_items * dims],
        }
    }

    /// Build from a slice of rows. Every row must have the same length.
    pub fn from_rows(rows: &[Vec<f64>]) -> ModelResult<Self> {
        let dims = rows.first().map_or(0, Vec::len);
        let mut coords = Vec::with_capacity(rows.len() * dims);
        for row in rows {
            if row.len() != dims {
                return Err(ModelError::ShapeMismatch {
                    expected: dims,
                    actual: row.len(),
                });
            }
            coords.extend_from_slice(row);
        }
        Self::new(rows.len(), dims, coords)
    }

    /// Uniform `[0, 1)` random embedding drawn row by row.
    pub fn random_uniform<R: Rng + ?Sized>(n_items: usize, dims: usize, rng: &mut R) -> Self {
        let coords = (0..n_items * dims).map(|_| rng.gen::<f64>()).collect();
        Self {
            n_items,
            dims,
            coords,
        }
    }

    pub fn n_items(&self) -> usize {
        self.n_items
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Coordinates of item `i`.
    ///
    /// # Panics
    /// Panics if `i >= n_items`.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.coords[i * self.dims..(i + 1) * self.dims]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        &mut self.coords[i * self.dims..(i + 1) * self.dims]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.coords
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.coords
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.coords.chunks(self.dims.max(1)).map(<[f64]>::to_vec).collect()
    }

    /// Returns an error if `index` is not a row of this embedding.
    pub fn check_index(&self, index: usize) -> ModelResult<()> {
        if index < self.n_items {
            Ok(())
        } else {
            Err(ModelError::ItemOutOfRange {
                index,
                n_items: self.n_items,
            })
        }
    }

    /// Squared Euclidean distance between items `i` and `j`.
    pub fn squared_distance(&self, i: usize, j: usize) -> f64 {
        self.row(i)
            .iter()
            .zip(self.row(j))
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }

    /// Euclidean distance between items `i` and `j`.
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.squared_distance(i, j).sqrt()
    }

    /// Condensed pairwise distances: `(0,1), (0,2), ..., (1,2), ...`.
    pub fn pairwise_distances(&self) -> Vec<f64> {
        let n = self.n_items;
        let mut out = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                out.push(self.distance(i, j));
            }
        }
        out
    }

    pub fn frobenius_norm(&self) -> f64 {
        self.coords.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    /// Scale the whole matrix to unit Frobenius norm.
    ///
    /// Returns `false` and leaves the coordinates untouched when the norm is
    /// zero or not finite.
    pub fn normalize(&mut self) -> bool {
        let norm = self.frobenius_norm();
        if !norm.is_finite() || norm <= f64::EPSILON {
            return false;
        }
        for x in &mut self.coords {
            *x /= norm;
        }
        true
    }
}
