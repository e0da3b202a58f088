/// Generate a random `f64` in the range `[low, high)`.
#[inline]
pub(crate) fn f64_range(rng: &mut fastrand::Rng, low: f64, high: f64) -> f64 {
    low + rng.f64() * (high - low)
}

/// Select `count` distinct random indices from `0..n`, all different from `exclude`.
///
/// Callers guarantee that `n - exclude.len() >= count`.
pub(crate) fn distinct_indices(
    rng: &mut fastrand::Rng,
    n: usize,
    count: usize,
    exclude: &[usize],
) -> Vec<usize> {
    debug_assert!(n.saturating_sub(exclude.len()) >= count);
    let mut selected = Vec::with_capacity(count);
    while selected.len() < count {
        let idx = rng.usize(0..n);
        if !exclude.contains(&idx) && !selected.contains(&idx) {
            selected.push(idx);
        }
    }
    selected
}

/// Choose `count` members of `pool` uniformly without replacement.
pub(crate) fn choose_without_replacement(
    rng: &mut fastrand::Rng,
    pool: &[usize],
    count: usize,
) -> Vec<usize> {
    let mut shuffled = pool.to_vec();
    // Partial Fisher-Yates: only the first `count` slots are needed.
    let take = count.min(shuffled.len());
    for i in 0..take {
        let j = rng.usize(i..shuffled.len());
        shuffled.swap(i, j);
    }
    shuffled.truncate(take);
    shuffled
}
