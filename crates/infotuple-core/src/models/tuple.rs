use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::{ModelError, ModelResult};

/// Checks that a `(head, b_1, ..., b_k)` sequence has k >= 2 distinct entries.
fn validate_items(items: &[usize]) -> ModelResult<()> {
    if items.len() < 3 {
        return Err(ModelError::InvalidTuple {
            reason: format!("need a head and at least 2 body items, got {} items", items.len()),
        });
    }
    let mut seen = HashSet::with_capacity(items.len());
    for &item in items {
        if !seen.insert(item) {
            return Err(ModelError::InvalidTuple {
                reason: format!("item {item} appears more than once"),
            });
        }
    }
    Ok(())
}

/// A query: a head item plus an ordered body of candidates to be ranked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Tuple {
    items: Vec<usize>,
}

impl Tuple {
    pub fn new(head: usize, body: Vec<usize>) -> ModelResult<Self> {
        let mut items = Vec::with_capacity(body.len() + 1);
        items.push(head);
        items.extend(body);
        Self::from_items(items)
    }

    /// Build from a full `(head, body...)` sequence.
    pub fn from_items(items: Vec<usize>) -> ModelResult<Self> {
        validate_items(&items)?;
        Ok(Self { items })
    }

    pub fn head(&self) -> usize {
        self.items[0]
    }

    pub fn body(&self) -> &[usize] {
        &self.items[1..]
    }

    pub fn items(&self) -> &[usize] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Largest item index referenced by this tuple.
    pub fn max_index(&self) -> usize {
        self.items.iter().copied().max().unwrap_or(0)
    }
}

impl TryFrom<Vec<usize>> for Tuple {
    type Error = ModelError;

    fn try_from(items: Vec<usize>) -> ModelResult<Self> {
        Self::from_items(items)
    }
}

impl From<Tuple> for Vec<usize> {
    fn from(tuple: Tuple) -> Self {
        tuple.items
    }
}

/// An oracle's ranking: body items ordered from closest to farthest from
/// the head.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Response {
    items: Vec<usize>,
}

impl Response {
    pub fn new(head: usize, ranked_body: Vec<usize>) -> ModelResult<Self> {
        let mut items = Vec::with_capacity(ranked_body.len() + 1);
        items.push(head);
        items.extend(ranked_body);
        Self::from_items(items)
    }

    pub fn from_items(items: Vec<usize>) -> ModelResult<Self> {
        validate_items(&items)?;
        Ok(Self { items })
    }

    pub fn head(&self) -> usize {
        self.items[0]
    }

    pub fn ranked_body(&self) -> &[usize] {
        &self.items[1..]
    }

    pub fn items(&self) -> &[usize] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether this ranking is a reordering of `tuple`'s body under the
    /// same head.
    pub fn answers(&self, tuple: &Tuple) -> bool {
        if self.head() != tuple.head() || self.len() != tuple.len() {
            return false;
        }
        let mut ours = self.ranked_body().to_vec();
        let mut theirs = tuple.body().to_vec();
        ours.sort_unstable();
        theirs.sort_unstable();
        ours == theirs
    }

    /// Adjacent-pair constraints: `len - 2` triplets sharing this head.
    pub fn decompose(&self) -> Vec<Triplet> {
        let head = self.head();
        self.ranked_body()
            .windows(2)
            .map(|w| Triplet {
                head,
                closer: w[0],
                farther: w[1],
            })
            .collect()
    }
}

impl TryFrom<Vec<usize>> for Response {
    type Error = ModelError;

    fn try_from(items: Vec<usize>) -> ModelResult<Self> {
        Self::from_items(items)
    }
}

impl From<Response> for Vec<usize> {
    fn from(response: Response) -> Self {
        response.items
    }
}

impl From<Triplet> for Response {
    fn from(t: Triplet) -> Self {
        Self {
            items: vec![t.head, t.closer, t.farther],
        }
    }
}

/// A decomposed ordinal constraint: `closer` is nearer to `head` than
/// `farther`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triplet {
    pub head: usize,
    pub closer: usize,
    pub farther: usize,
}

impl Triplet {
    pub fn new(head: usize, closer: usize, farther: usize) -> Self {
        Self {
            head,
            closer,
            farther,
        }
    }

    pub fn max_index(&self) -> usize {
        self.head.max(self.closer).max(self.farther)
    }
}

/// Decompose every response in order.
pub fn decompose_all(responses: &[Response]) -> Vec<Triplet> {
    responses.iter().flat_map(Response::decompose).collect()
}
