use infotuple_core::errors::{ModelError, ModelResult, SelectorError, SelectorResult};
use infotuple_core::models::Tuple;
use infotuple_core::permutations::{k_permutations, permutation_count};
use rand::seq::index::sample;
use rand::Rng;

fn check_shape(n_items: usize, head: usize, body_size: usize) -> ModelResult<()> {
    if head >= n_items {
        return Err(ModelError::ItemOutOfRange {
            index: head,
            n_items,
        });
    }
    if body_size + 1 > n_items {
        return Err(ModelError::InsufficientItems {
            required: body_size + 1,
            actual: n_items,
        });
    }
    Ok(())
}

/// Every ordered body of `body_size` items other than `head`, each
/// prefixed by `head`. Bodies come in lexicographic position order.
pub fn candidate_tuples(
    n_items: usize,
    head: usize,
    body_size: usize,
) -> SelectorResult<Vec<Tuple>> {
    check_shape(n_items, head, body_size)?;
    if permutation_count(n_items - 1, body_size).is_none() {
        return Err(SelectorError::TooManyCandidates { n_items, body_size });
    }
    let pool: Vec<usize> = (0..n_items).filter(|&i| i != head).collect();
    let tuples = k_permutations(&pool, body_size)
        .into_iter()
        .map(|body| Tuple::new(head, body))
        .collect::<ModelResult<Vec<_>>>()?;
    Ok(tuples)
}

/// A uniformly random body of `body_size` distinct items other than `head`.
pub fn random_tuple<R: Rng + ?Sized>(
    n_items: usize,
    head: usize,
    body_size: usize,
    rng: &mut R,
) -> ModelResult<Tuple> {
    check_shape(n_items, head, body_size)?;
    let body = sample(rng, n_items - 1, body_size)
        .into_iter()
        .map(|i| if i >= head { i + 1 } else { i })
        .collect();
    Tuple::new(head, body)
}
