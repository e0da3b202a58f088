//! Variation operators that turn a population into offspring.
//!
//! | Operator | Algorithm | Minimum population |
//! |----------|-----------|--------------------|
//! | [`ParticleSwarm`] | Multi-objective particle swarm (personal/global best) | 1 |
//! | [`DifferentialEvolution`] | DE/rand/1 with binomial crossover | 4 |
//! | [`Genetic`] | Tournament + SBX crossover + polynomial mutation | 2 |
//!
//! Every operator produces exactly one offspring decision vector per
//! population member, and every coordinate is clamped into the problem
//! bounds. Offspring never replace parents directly: the
//! [`Driver`](crate::Driver) pools parents and offspring and lets
//! [survival selection](crate::selection) decide.

pub mod de;
pub mod genetic;
pub mod pso;

pub use de::{DifferentialEvolution, DifferentialEvolutionBuilder};
pub use genetic::{Genetic, GeneticBuilder};
pub use pso::{ParticleSwarm, ParticleSwarmBuilder};

use crate::error::Result;
use crate::population::Population;
use crate::problem::Bounds;

/// A strategy producing offspring from the current population.
///
/// All randomness must be drawn from the `rng` argument so that a run is
/// reproducible from its seed.
pub trait Variation {
    /// Short name used in logs and run records.
    fn name(&self) -> &str;

    /// Check operator parameters against the configured population size.
    ///
    /// Called once when the driver is built.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the operator cannot run.
    fn validate(&self, pop_size: usize) -> Result<()>;

    /// Reset operator state from the evaluated initial population.
    fn initialize(&mut self, _population: &Population, _rng: &mut fastrand::Rng) {}

    /// Produce one offspring decision vector per member of `population`.
    fn offspring(
        &mut self,
        population: &Population,
        bounds: &Bounds,
        rng: &mut fastrand::Rng,
    ) -> Vec<Vec<f64>>;

    /// Observe the evaluated offspring, in the order they were produced.
    fn observe(&mut self, _offspring: &Population, _rng: &mut fastrand::Rng) {}

    /// Learn which pool members became the next population.
    ///
    /// The pool is the `n_parents` parents followed by their offspring, so
    /// `survivors[i] < n_parents` means new slot `i` holds parent
    /// `survivors[i]`, and any larger value means it holds the offspring of
    /// parent `survivors[i] - n_parents`. Operators with per-member state
    /// reorder it here.
    fn survived(&mut self, _survivors: &[usize], _n_parents: usize) {}
}

impl<V: Variation + ?Sized> Variation for Box<V> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn validate(&self, pop_size: usize) -> Result<()> {
        (**self).validate(pop_size)
    }

    fn initialize(&mut self, population: &Population, rng: &mut fastrand::Rng) {
        (**self).initialize(population, rng);
    }

    fn offspring(
        &mut self,
        population: &Population,
        bounds: &Bounds,
        rng: &mut fastrand::Rng,
    ) -> Vec<Vec<f64>> {
        (**self).offspring(population, bounds, rng)
    }

    fn observe(&mut self, offspring: &Population, rng: &mut fastrand::Rng) {
        (**self).observe(offspring, rng);
    }

    fn survived(&mut self, survivors: &[usize], n_parents: usize) {
        (**self).survived(survivors, n_parents);
    }
}

/// Reject non-finite scalars and values outside `[min, max]`.
pub(crate) fn check_range(name: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(crate::Error::InvalidParameter {
            name,
            reason: format!("{value} must be finite and within [{min}, {max}]"),
        });
    }
    Ok(())
}
