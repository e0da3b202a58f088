//! Dominance relations and non-dominated sorting.
//!
//! All objectives are minimized. A solution **dominates** another if it is
//! no worse in every objective and strictly better in at least one. Equal
//! vectors never dominate each other.
//!
//! | Function | Purpose |
//! |---|---|
//! | [`dominates`] | Pareto dominance between two objective vectors |
//! | [`constrained_dominates`] | Dominance that first compares constraint violation |
//! | [`non_dominated_sort`] | Rank solutions into successive fronts (front 0, 1, …) |
//! | [`non_dominated_sort_with`] | Same, with constraints and a [`SortMode`] |
//! | [`pareto_front_indices`] | Only the non-dominated solutions |
//! | [`crowding_distance`] | Spread of solutions within a single front |
//!
//! # Non-finite objectives
//!
//! A vector containing NaN or an infinity is treated as dominated by every
//! finite vector and dominates nothing. Two non-finite vectors are mutually
//! non-dominated. A single bad evaluation therefore sinks to the last front
//! instead of aborting the run or poisoning comparisons.
//!
//! # Example
//!
//! ```
//! use moea::pareto::{crowding_distance, non_dominated_sort, pareto_front_indices};
//!
//! let solutions = vec![
//!     vec![1.0, 5.0], // Pareto-optimal
//!     vec![5.0, 1.0], // Pareto-optimal
//!     vec![3.0, 3.0], // Pareto-optimal
//!     vec![4.0, 4.0], // Dominated by (3, 3)
//! ];
//!
//! let fronts = non_dominated_sort(&solutions);
//! assert_eq!(fronts.len(), 2);
//!
//! let mut front = pareto_front_indices(&solutions);
//! front.sort();
//! assert_eq!(front, vec![0, 1, 2]);
//!
//! let front_values: Vec<_> = front.iter().map(|&i| solutions[i].clone()).collect();
//! let cd = crowding_distance(&front_values);
//! assert!(cd[0].is_infinite()); // boundary solution
//! ```

/// How much of the ranking [`non_dominated_sort_with`] computes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortMode {
    /// Every front, until all solutions are ranked.
    #[default]
    Full,
    /// Only front 0. Skips building the domination sets used for peeling.
    FirstFront,
}

fn all_finite(v: &[f64]) -> bool {
    v.iter().all(|x| x.is_finite())
}

/// Returns `true` if objective vector `a` Pareto-dominates `b`.
///
/// See the [module docs](self) for the treatment of non-finite values.
#[must_use]
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    debug_assert_eq!(a.len(), b.len());

    match (all_finite(a), all_finite(b)) {
        (true, false) => return true,
        (false, _) => return false,
        (true, true) => {}
    }

    let mut strictly_better = false;
    for (&av, &bv) in a.iter().zip(b) {
        if av > bv {
            return false;
        }
        if av < bv {
            strictly_better = true;
        }
    }
    strictly_better
}

/// Constrained dominance: feasible beats infeasible, among infeasible
/// prefer lower total constraint violation, among feasible use Pareto dominance.
///
/// Violations are the summed positive constraint values; `<= 0.0` is feasible.
#[must_use]
pub fn constrained_dominates(a: &[f64], b: &[f64], a_violation: f64, b_violation: f64) -> bool {
    let a_feasible = a_violation <= 0.0;
    let b_feasible = b_violation <= 0.0;

    match (a_feasible, b_feasible) {
        (true, false) => true,
        (false, true) => false,
        (false, false) => a_violation < b_violation,
        (true, true) => dominates(a, b),
    }
}

fn pair_dominates(values: &[Vec<f64>], violations: &[f64], i: usize, j: usize) -> bool {
    if violations.is_empty() {
        dominates(&values[i], &values[j])
    } else {
        constrained_dominates(&values[i], &values[j], violations[i], violations[j])
    }
}

/// Fast non-dominated sorting (Deb et al., 2002).
///
/// Returns `Vec<Vec<usize>>` where `fronts[0]` is the Pareto front and
/// each inner vec contains indices into `values`. Every index appears in
/// exactly one front.
///
/// Complexity: O(M * N^2) where M = objectives, N = solutions.
#[must_use]
pub fn non_dominated_sort(values: &[Vec<f64>]) -> Vec<Vec<usize>> {
    non_dominated_sort_with(values, &[], SortMode::Full)
}

/// Non-dominated sorting with constraint support and a [`SortMode`].
///
/// `violations` is either empty (no constraints) or has the same length
/// as `values`, holding each solution's total constraint violation.
#[must_use]
pub fn non_dominated_sort_with(
    values: &[Vec<f64>],
    violations: &[f64],
    mode: SortMode,
) -> Vec<Vec<usize>> {
    debug_assert!(violations.is_empty() || violations.len() == values.len());
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }

    if mode == SortMode::FirstFront {
        return vec![first_front_constrained(values, violations)];
    }

    // S_p: set of solutions dominated by p
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];
    // n_p: domination count for p
    let mut domination_count: Vec<usize> = vec![0; n];

    for i in 0..n {
        for j in (i + 1)..n {
            if pair_dominates(values, violations, i, j) {
                dominated_by[i].push(j);
                domination_count[j] += 1;
            } else if pair_dominates(values, violations, j, i) {
                dominated_by[j].push(i);
                domination_count[i] += 1;
            }
        }
    }

    let mut fronts: Vec<Vec<usize>> = Vec::new();
    let mut current_front: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();

    while !current_front.is_empty() {
        let mut next_front: Vec<usize> = Vec::new();
        for &p in &current_front {
            for &q in &dominated_by[p] {
                domination_count[q] -= 1;
                if domination_count[q] == 0 {
                    next_front.push(q);
                }
            }
        }
        fronts.push(current_front);
        current_front = next_front;
    }

    fronts
}

/// Front 0 only: a solution is kept unless some other solution dominates it.
///
/// The scan for a dominator stops at the first hit, and no domination sets
/// are built.
pub(crate) fn first_front_constrained(values: &[Vec<f64>], violations: &[f64]) -> Vec<usize> {
    let n = values.len();
    (0..n)
        .filter(|&i| !(0..n).any(|j| j != i && pair_dominates(values, violations, j, i)))
        .collect()
}

/// Filter solutions to return only non-dominated (Pareto-optimal) indices.
///
/// Equivalent to `non_dominated_sort(values)[0]` but computed with
/// [`SortMode::FirstFront`], so no further fronts are ranked.
#[must_use]
pub fn pareto_front_indices(values: &[Vec<f64>]) -> Vec<usize> {
    first_front_constrained(values, &[])
}

/// Rank of every solution given its fronts (`rank[i]` = front index of `i`).
pub(crate) fn ranks(fronts: &[Vec<usize>], n: usize) -> Vec<usize> {
    let mut rank = vec![usize::MAX; n];
    for (front_rank, front) in fronts.iter().enumerate() {
        for &idx in front {
            rank[idx] = front_rank;
        }
    }
    rank
}

/// Crowding distance for one front (index-based, internal API).
///
/// Boundary solutions get `f64::INFINITY`. Returns one distance value per
/// solution in the front, in the same order as `front_indices`.
pub(crate) fn crowding_distance_indexed(front_indices: &[usize], values: &[Vec<f64>]) -> Vec<f64> {
    let n = front_indices.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let m = values[front_indices[0]].len(); // number of objectives
    let mut distances = vec![0.0_f64; n];

    let val = |front_pos: usize, obj: usize| -> f64 { values[front_indices[front_pos]][obj] };

    for obj in 0..m {
        let mut sorted: Vec<usize> = (0..n).collect();
        sorted.sort_by(|&a, &b| val(a, obj).total_cmp(&val(b, obj)));

        distances[sorted[0]] = f64::INFINITY;
        distances[sorted[n - 1]] = f64::INFINITY;

        let range = val(sorted[n - 1], obj) - val(sorted[0], obj);
        if range.is_finite() && range > 0.0 {
            for i in 1..(n - 1) {
                let gap = (val(sorted[i + 1], obj) - val(sorted[i - 1], obj)) / range;
                if gap.is_finite() {
                    distances[sorted[i]] += gap;
                }
            }
        }
    }

    distances
}

/// Compute crowding distance for diversity measurement.
///
/// Return one distance value per solution in `front` (same order).
/// Boundary solutions (best/worst in any objective) receive
/// [`f64::INFINITY`]. Interior solutions get a finite non-negative value
/// proportional to the gap between their neighbors in each objective.
#[must_use]
pub fn crowding_distance(front: &[Vec<f64>]) -> Vec<f64> {
    let indices: Vec<usize> = (0..front.len()).collect();
    crowding_distance_indexed(&indices, front)
}
