//! The [`Problem`] trait defines what gets optimized.
//!
//! The engine only needs a problem's contract: how many decision variables
//! and objectives it has, the box bounds of the search space, and a pure
//! `evaluate` function. Every objective is minimized.
//!
//! For quick experiments wrap a closure in [`FnProblem`]:
//!
//! ```
//! use moea::problem::{Bounds, FnProblem, Problem};
//!
//! let bounds = Bounds::uniform(1, 0.0, 1.0).unwrap();
//! let problem = FnProblem::new(bounds, 2, |x: &[f64]| vec![x[0], 1.0 - x[0]]);
//!
//! let eval = problem.evaluate(&[0.25]);
//! assert_eq!(eval.objectives, vec![0.25, 0.75]);
//! ```
//!
//! For anything richer implement [`Problem`] on your own type:
//!
//! ```
//! use moea::problem::{Bounds, Evaluation, Problem};
//!
//! struct Schaffer {
//!     bounds: Bounds,
//! }
//!
//! impl Problem for Schaffer {
//!     fn n_obj(&self) -> usize {
//!         2
//!     }
//!
//!     fn bounds(&self) -> &Bounds {
//!         &self.bounds
//!     }
//!
//!     fn evaluate(&self, x: &[f64]) -> Evaluation {
//!         Evaluation::new(vec![x[0] * x[0], (x[0] - 2.0).powi(2)])
//!     }
//! }
//! ```

use crate::error::{Error, Result};
use crate::rng_util;

/// Per-dimension box bounds `[lower_i, upper_i]` of the decision space.
///
/// Construction validates that both arrays have the same length and that
/// every pair is finite with `lower_i <= upper_i`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl Bounds {
    /// Creates bounds from explicit lower and upper arrays.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BoundsLengthMismatch`] if the arrays differ in
    /// length, or [`Error::InvalidBounds`] for a non-finite or inverted pair.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self> {
        if lower.len() != upper.len() {
            return Err(Error::BoundsLengthMismatch {
                lower: lower.len(),
                upper: upper.len(),
            });
        }
        for (index, (&low, &high)) in lower.iter().zip(&upper).enumerate() {
            if !low.is_finite() || !high.is_finite() || low > high {
                return Err(Error::InvalidBounds { index, low, high });
            }
        }
        Ok(Self { lower, upper })
    }

    /// Creates `n` dimensions sharing the same `[low, high]` interval.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBounds`] if the interval is invalid.
    pub fn uniform(n: usize, low: f64, high: f64) -> Result<Self> {
        Self::new(vec![low; n], vec![high; n])
    }

    /// Lower bounds, one per dimension.
    #[must_use]
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Upper bounds, one per dimension.
    #[must_use]
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Number of dimensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lower.len()
    }

    /// Returns `true` if there are no dimensions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    /// Clamp a single coordinate into dimension `dim`.
    ///
    /// NaN coordinates are mapped to the lower bound so that the clamping
    /// invariant holds even for degenerate arithmetic.
    #[must_use]
    pub fn clamp(&self, dim: usize, value: f64) -> f64 {
        if value.is_nan() {
            return self.lower[dim];
        }
        value.clamp(self.lower[dim], self.upper[dim])
    }

    /// Clamp every coordinate of `x` in place.
    pub fn clamp_all(&self, x: &mut [f64]) {
        debug_assert_eq!(x.len(), self.len());
        for (dim, v) in x.iter_mut().enumerate() {
            *v = self.clamp(dim, *v);
        }
    }

    /// Returns `true` if every coordinate of `x` lies within bounds.
    #[must_use]
    pub fn contains(&self, x: &[f64]) -> bool {
        x.len() == self.len()
            && x.iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(&v, (&lo, &hi))| v >= lo && v <= hi)
    }

    /// Sample a point uniformly at random inside the box.
    pub(crate) fn sample(&self, rng: &mut fastrand::Rng) -> Vec<f64> {
        self.lower
            .iter()
            .zip(&self.upper)
            .map(|(&lo, &hi)| rng_util::f64_range(rng, lo, hi))
            .collect()
    }
}

/// Result of evaluating one decision vector.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evaluation {
    /// Objective values, all minimized.
    pub objectives: Vec<f64>,
    /// Inequality constraint values; `<= 0.0` means satisfied.
    pub constraints: Vec<f64>,
}

impl Evaluation {
    /// An unconstrained evaluation.
    #[must_use]
    pub fn new(objectives: Vec<f64>) -> Self {
        Self {
            objectives,
            constraints: Vec::new(),
        }
    }

    /// An evaluation carrying constraint values.
    #[must_use]
    pub fn with_constraints(objectives: Vec<f64>, constraints: Vec<f64>) -> Self {
        Self {
            objectives,
            constraints,
        }
    }

    /// Total constraint violation: the sum of positive constraint values.
    #[must_use]
    pub fn violation(&self) -> f64 {
        self.constraints.iter().map(|c| c.max(0.0)).sum()
    }
}

impl From<Vec<f64>> for Evaluation {
    fn from(objectives: Vec<f64>) -> Self {
        Self::new(objectives)
    }
}

/// A multi-objective minimization problem over a box-bounded real space.
///
/// `evaluate` must be deterministic and free of side effects for a given
/// input. The trait requires `Sync` so populations can be evaluated in
/// parallel when the `parallel` feature is enabled.
pub trait Problem: Sync {
    /// Number of decision variables. Defaults to the number of bound pairs.
    fn n_var(&self) -> usize {
        self.bounds().len()
    }

    /// Number of objectives.
    fn n_obj(&self) -> usize;

    /// Number of inequality constraints.
    fn n_constr(&self) -> usize {
        0
    }

    /// Box bounds of the decision space.
    fn bounds(&self) -> &Bounds;

    /// Evaluate a decision vector.
    fn evaluate(&self, x: &[f64]) -> Evaluation;
}

impl<P: Problem + ?Sized> Problem for &P {
    fn n_var(&self) -> usize {
        (**self).n_var()
    }

    fn n_obj(&self) -> usize {
        (**self).n_obj()
    }

    fn n_constr(&self) -> usize {
        (**self).n_constr()
    }

    fn bounds(&self) -> &Bounds {
        (**self).bounds()
    }

    fn evaluate(&self, x: &[f64]) -> Evaluation {
        (**self).evaluate(x)
    }
}

/// Check a problem's declared shape before any evaluation happens.
///
/// # Errors
///
/// Returns [`Error::ZeroVariables`], [`Error::ZeroObjectives`], or
/// [`Error::DimensionMismatch`] when `n_var` disagrees with the bounds.
pub fn validate<P: Problem + ?Sized>(problem: &P) -> Result<()> {
    let n_var = problem.n_var();
    if n_var == 0 {
        return Err(Error::ZeroVariables);
    }
    if problem.n_obj() == 0 {
        return Err(Error::ZeroObjectives);
    }
    let n_bounds = problem.bounds().len();
    if n_bounds != n_var {
        return Err(Error::DimensionMismatch {
            expected: n_var,
            got: n_bounds,
        });
    }
    Ok(())
}

/// A [`Problem`] backed by a closure.
///
/// The closure may return anything convertible into an [`Evaluation`],
/// typically a `Vec<f64>` of objective values.
pub struct FnProblem<F> {
    bounds: Bounds,
    n_obj: usize,
    n_constr: usize,
    func: F,
}

impl<F, R> FnProblem<F>
where
    F: Fn(&[f64]) -> R + Sync,
    R: Into<Evaluation>,
{
    /// Wrap an unconstrained objective function.
    pub fn new(bounds: Bounds, n_obj: usize, func: F) -> Self {
        Self {
            bounds,
            n_obj,
            n_constr: 0,
            func,
        }
    }

    /// Declare the number of constraints the closure reports.
    #[must_use]
    pub fn constraints(mut self, n_constr: usize) -> Self {
        self.n_constr = n_constr;
        self
    }
}

impl<F, R> Problem for FnProblem<F>
where
    F: Fn(&[f64]) -> R + Sync,
    R: Into<Evaluation>,
{
    fn n_obj(&self) -> usize {
        self.n_obj
    }

    fn n_constr(&self) -> usize {
        self.n_constr
    }

    fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    fn evaluate(&self, x: &[f64]) -> Evaluation {
        (self.func)(x).into()
    }
}
