//! Ordered selections without replacement.

/// Number of ordered selections of `k` items out of `n`: `n! / (n - k)!`.
/// `None` when the count does not fit in `usize`.
pub fn permutation_count(n: usize, k: usize) -> Option<usize> {
    if k > n {
        return Some(0);
    }
    ((n - k + 1)..=n).try_fold(1usize, |acc, f| acc.checked_mul(f))
}

/// Every ordered selection of `k` elements from `pool`, in lexicographic
/// order of pool positions (`[a, b]`, `[a, c]`, ..., `[b, a]`, ...).
pub fn k_permutations<T: Copy>(pool: &[T], k: usize) -> Vec<Vec<T>> {
    let mut out = Vec::with_capacity(permutation_count(pool.len(), k).unwrap_or(0));
    if k > pool.len() {
        return out;
    }
    let mut current = Vec::with_capacity(k);
    let mut used = vec![false; pool.len()];
    extend(pool, k, &mut used, &mut current, &mut out);
    out
}

/// All orderings of `pool`.
pub fn permutations<T: Copy>(pool: &[T]) -> Vec<Vec<T>> {
    k_permutations(pool, pool.len())
}

fn extend<T: Copy>(
    pool: &[T],
    k: usize,
    used: &mut [bool],
    current: &mut Vec<T>,
    out: &mut Vec<Vec<T>>,
) {
    if current.len() == k {
        out.push(current.clone());
        return;
    }
    for i in 0..pool.len() {
        if used[i] {
            continue;
        }
        used[i] = true;
        current.push(pool[i]);
        extend(pool, k, used, current, out);
        current.pop();
        used[i] = false;
    }
}
