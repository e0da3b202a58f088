//! Candidates and populations.
//!
//! A [`Candidate`] pairs a decision vector with the objective values it
//! evaluated to. Candidates are immutable once built: variation operators
//! produce fresh decision vectors, and those are evaluated into new
//! candidates, so an objective cache can never go stale.

use crate::error::{Error, Result};
use crate::pareto;
use crate::problem::Problem;

/// An evaluated solution.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    x: Vec<f64>,
    objectives: Vec<f64>,
    constraints: Vec<f64>,
    violation: f64,
}

impl Candidate {
    /// Evaluate `x` against `problem`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ObjectiveDimensionMismatch`] or
    /// [`Error::ConstraintDimensionMismatch`] if the problem returns a
    /// different number of objectives or constraints than it declares.
    pub fn evaluate<P: Problem + ?Sized>(problem: &P, x: Vec<f64>) -> Result<Self> {
        let eval = problem.evaluate(&x);
        let expected = problem.n_obj();
        if eval.objectives.len() != expected {
            return Err(Error::ObjectiveDimensionMismatch {
                expected,
                got: eval.objectives.len(),
            });
        }
        let expected = problem.n_constr();
        if eval.constraints.len() != expected {
            return Err(Error::ConstraintDimensionMismatch {
                expected,
                got: eval.constraints.len(),
            });
        }
        let violation = eval.violation();
        Ok(Self {
            x,
            objectives: eval.objectives,
            constraints: eval.constraints,
            violation,
        })
    }

    /// The decision vector.
    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// The objective vector.
    #[must_use]
    pub fn objectives(&self) -> &[f64] {
        &self.objectives
    }

    /// Raw constraint values (empty for unconstrained problems).
    #[must_use]
    pub fn constraints(&self) -> &[f64] {
        &self.constraints
    }

    /// Total constraint violation; `0.0` when feasible.
    #[must_use]
    pub fn violation(&self) -> f64 {
        self.violation
    }

    /// Returns `true` if every constraint is satisfied.
    #[must_use]
    pub fn is_feasible(&self) -> bool {
        self.violation <= 0.0
    }

    /// Returns `true` if `self` dominates `other` under constrained dominance.
    #[must_use]
    pub fn dominates(&self, other: &Candidate) -> bool {
        pareto::constrained_dominates(
            &self.objectives,
            &other.objectives,
            self.violation,
            other.violation,
        )
    }
}

/// An ordered collection of candidates.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Population {
    members: Vec<Candidate>,
}

impl Population {
    /// Wrap an existing list of candidates.
    #[must_use]
    pub fn new(members: Vec<Candidate>) -> Self {
        Self { members }
    }

    /// Sample `size` decision vectors uniformly within the problem bounds
    /// and evaluate them.
    ///
    /// # Errors
    ///
    /// Propagates evaluation errors.
    pub fn random<P: Problem + ?Sized>(
        problem: &P,
        size: usize,
        rng: &mut fastrand::Rng,
    ) -> Result<Self> {
        let bounds = problem.bounds();
        let xs: Vec<Vec<f64>> = (0..size).map(|_| bounds.sample(rng)).collect();
        Self::evaluate(problem, xs)
    }

    /// Evaluate a batch of decision vectors, preserving their order.
    ///
    /// With the `parallel` feature the batch is evaluated on the rayon
    /// thread pool; results are still returned in input order.
    ///
    /// # Errors
    ///
    /// Returns the first evaluation error in input order.
    pub fn evaluate<P: Problem + ?Sized>(problem: &P, xs: Vec<Vec<f64>>) -> Result<Self> {
        #[cfg(feature = "parallel")]
        let members: Result<Vec<Candidate>> = {
            use rayon::prelude::*;
            xs.into_par_iter()
                .map(|x| Candidate::evaluate(problem, x))
                .collect()
        };

        #[cfg(not(feature = "parallel"))]
        let members: Result<Vec<Candidate>> = xs
            .into_iter()
            .map(|x| Candidate::evaluate(problem, x))
            .collect();

        members.map(Self::new)
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the population has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The member at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.members.get(index)
    }

    /// All members as a slice.
    #[must_use]
    pub fn members(&self) -> &[Candidate] {
        &self.members
    }

    /// Iterate over members in order.
    pub fn iter(&self) -> core::slice::Iter<'_, Candidate> {
        self.members.iter()
    }

    /// Consume the population, returning its members.
    #[must_use]
    pub fn into_members(self) -> Vec<Candidate> {
        self.members
    }

    /// Objective vectors of every member, in order.
    #[must_use]
    pub fn objective_matrix(&self) -> Vec<Vec<f64>> {
        self.members.iter().map(|c| c.objectives.clone()).collect()
    }

    /// Decision vectors of every member, in order.
    #[must_use]
    pub fn decision_matrix(&self) -> Vec<Vec<f64>> {
        self.members.iter().map(|c| c.x.clone()).collect()
    }

    /// Constraint violation of every member, in order.
    #[must_use]
    pub fn violations(&self) -> Vec<f64> {
        self.members.iter().map(|c| c.violation).collect()
    }

    /// Returns `true` if any member violates a constraint.
    #[must_use]
    pub fn has_violations(&self) -> bool {
        self.members.iter().any(|c| c.violation > 0.0)
    }

    /// Build a new population from the members at `indices`.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of range.
    #[must_use]
    pub fn select(&self, indices: &[usize]) -> Self {
        Self::new(indices.iter().map(|&i| self.members[i].clone()).collect())
    }

    /// Append `other` after the members of `self`.
    #[must_use]
    pub fn merge(mut self, other: Population) -> Self {
        self.members.extend(other.members);
        self
    }

    /// Drop members whose decision vector equals that of an earlier member.
    ///
    /// Returns the number of members removed.
    pub fn remove_duplicates(&mut self) -> usize {
        let before = self.members.len();
        let kept = self.unique_indices();
        *self = self.select(&kept);
        before - self.members.len()
    }

    /// Indices of the first member carrying each distinct decision vector,
    /// in ascending order.
    #[must_use]
    pub fn unique_indices(&self) -> Vec<usize> {
        let mut kept: Vec<usize> = Vec::with_capacity(self.members.len());
        for (i, candidate) in self.members.iter().enumerate() {
            if !kept.iter().any(|&k| self.members[k].x == candidate.x) {
                kept.push(i);
            }
        }
        kept
    }

    /// Indices of the non-dominated members.
    #[must_use]
    pub fn non_dominated_indices(&self) -> Vec<usize> {
        let values = self.objective_matrix();
        let violations = if self.has_violations() {
            self.violations()
        } else {
            Vec::new()
        };
        pareto::first_front_constrained(&values, &violations)
    }

    /// The non-dominated members as a new population.
    #[must_use]
    pub fn non_dominated(&self) -> Self {
        self.select(&self.non_dominated_indices())
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Candidate;
    type IntoIter = core::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl FromIterator<Candidate> for Population {
    fn from_iter<I: IntoIterator<Item = Candidate>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
