//! Environmental (survival) selection.
//!
//! Given a merged pool of parents and offspring, [`survive`] ranks the pool
//! with non-dominated sorting and admits whole fronts in rank order. The
//! first front that would overflow the target size is cut down by the
//! configured [`Truncation`] policy.
//!
//! ```
//! use moea::selection::{Survival, Truncation, survive};
//!
//! let pool = vec![
//!     vec![1.0, 4.0],
//!     vec![4.0, 1.0],
//!     vec![2.0, 2.0],
//!     vec![5.0, 5.0],
//! ];
//! let mut rng = fastrand::Rng::with_seed(1);
//! let survival = survive(&pool, &[], 3, Truncation::Random, &mut rng);
//! let mut kept = survival.indices().to_vec();
//! kept.sort_unstable();
//! assert_eq!(kept, vec![0, 1, 2]);
//! assert!(matches!(survival, Survival::Filled(_)));
//! ```

use crate::pareto::{self, SortMode};
use crate::rng_util;

/// How to pick members from the front that overflows the target size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Truncation {
    /// Uniformly at random without replacement.
    #[default]
    Random,
    /// Largest crowding distance first; ties keep front order.
    ///
    /// This is the classic NSGA-II rule and changes which members survive
    /// compared to [`Truncation::Random`].
    CrowdingDistance,
}

/// Outcome of survival selection: indices into the pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Survival {
    /// Exactly the requested number of members was selected.
    Filled(Vec<usize>),
    /// The pool was smaller than the target; every member is returned.
    Underfilled(Vec<usize>),
}

impl Survival {
    /// The selected indices.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        match self {
            Survival::Filled(idx) | Survival::Underfilled(idx) => idx,
        }
    }

    /// Consume the outcome, returning the selected indices.
    #[must_use]
    pub fn into_indices(self) -> Vec<usize> {
        match self {
            Survival::Filled(idx) | Survival::Underfilled(idx) => idx,
        }
    }

    /// Returns `true` if the pool could not fill the target size.
    #[must_use]
    pub fn is_underfilled(&self) -> bool {
        matches!(self, Survival::Underfilled(_))
    }
}

/// Select `pop_size` survivors from `values`.
///
/// `violations` is either empty or holds one constraint violation per pool
/// member. The result never contains an index twice, never exceeds
/// `pop_size`, and is exactly `pop_size` long whenever the pool is at least
/// that large.
pub fn survive(
    values: &[Vec<f64>],
    violations: &[f64],
    pop_size: usize,
    truncation: Truncation,
    rng: &mut fastrand::Rng,
) -> Survival {
    let fronts = pareto::non_dominated_sort_with(values, violations, SortMode::Full);

    if values.len() < pop_size {
        return Survival::Underfilled(fronts.into_iter().flatten().collect());
    }

    let mut selected: Vec<usize> = Vec::with_capacity(pop_size);
    for front in &fronts {
        if selected.len() + front.len() <= pop_size {
            selected.extend_from_slice(front);
            if selected.len() == pop_size {
                break;
            }
        } else {
            let remaining = pop_size - selected.len();
            selected.extend(truncate_front(front, values, remaining, truncation, rng));
            break;
        }
    }

    Survival::Filled(selected)
}

fn truncate_front(
    front: &[usize],
    values: &[Vec<f64>],
    remaining: usize,
    truncation: Truncation,
    rng: &mut fastrand::Rng,
) -> Vec<usize> {
    match truncation {
        Truncation::Random => rng_util::choose_without_replacement(rng, front, remaining),
        Truncation::CrowdingDistance => {
            let cd = pareto::crowding_distance_indexed(front, values);
            let mut order: Vec<usize> = (0..front.len()).collect();
            // Stable sort keeps front order among equal distances.
            order.sort_by(|&a, &b| cd[b].total_cmp(&cd[a]));
            order.into_iter().take(remaining).map(|pos| front[pos]).collect()
        }
    }
}
