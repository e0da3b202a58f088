//! Differential Evolution (DE) variation.
//!
//! For every target member *xᵢ*:
//! 1. **Mutation**: draw three distinct donor indices `a, b, c` and build
//!    `v = x_a + F * (x_b - x_c)`.
//! 2. **Crossover**: binomial: one dimension `j` is always taken from
//!    `v`; every other dimension is taken from `v` with probability CR and
//!    from *xᵢ* otherwise.
//! 3. **Clamp** into bounds.
//!
//! Unlike classic DE there is no one-to-one greedy replacement: offspring
//! compete with all parents through pooled non-dominated survival.
//!
//! # Donor selection
//!
//! By default the donors are drawn from the whole population, so the target
//! itself may be one of them. Textbook DE excludes the target; enable that
//! with [`exclude_target`](DifferentialEvolutionBuilder::exclude_target).
//!
//! # Configuration
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `mutation_factor` (F) | 0.8 | Differential amplification |
//! | `crossover_rate` (CR) | 0.9 | Probability of taking a dimension from the mutant |
//! | `exclude_target` | `false` | Never use the target as a donor |
//!
//! # Examples
//!
//! ```
//! use moea::operator::DifferentialEvolution;
//!
//! let de = DifferentialEvolution::builder()
//!     .mutation_factor(0.5)
//!     .crossover_rate(0.7)
//!     .exclude_target(true)
//!     .build();
//! ```

use crate::error::{Error, Result};
use crate::operator::{Variation, check_range};
use crate::population::Population;
use crate::problem::Bounds;
use crate::rng_util;

/// Smallest population DE accepts.
const MIN_POPULATION: usize = 4;

/// Differential Evolution variation (DE/rand/1/bin).
#[derive(Clone, Debug)]
pub struct DifferentialEvolution {
    mutation_factor: f64,
    crossover_rate: f64,
    exclude_target: bool,
}

impl DifferentialEvolution {
    /// Creates a DE operator with default settings.
    #[must_use]
    pub fn new() -> Self {
        DifferentialEvolutionBuilder::new().build()
    }

    /// Creates a builder for configuring a `DifferentialEvolution`.
    #[must_use]
    pub fn builder() -> DifferentialEvolutionBuilder {
        DifferentialEvolutionBuilder::new()
    }

    /// Build the trial vector for `target_idx`.
    fn trial_vector(
        &self,
        xs: &[&[f64]],
        target_idx: usize,
        bounds: &Bounds,
        rng: &mut fastrand::Rng,
    ) -> Vec<f64> {
        let n = xs.len();
        let target = xs[target_idx];
        let target_slot = [target_idx];
        let exclude: &[usize] = if self.exclude_target {
            &target_slot
        } else {
            &[]
        };

        // A population shrunk by duplicate removal may not have enough donors.
        if n < 3 + exclude.len() {
            return target.to_vec();
        }

        let donors = rng_util::distinct_indices(rng, n, 3, exclude);
        let (a, b, c) = (xs[donors[0]], xs[donors[1]], xs[donors[2]]);
        let f = self.mutation_factor;

        let dims = target.len();
        let j_rand = rng.usize(0..dims.max(1));
        (0..dims)
            .map(|k| {
                let use_mutant = k == j_rand || rng.f64() < self.crossover_rate;
                let value = if use_mutant {
                    a[k] + f * (b[k] - c[k])
                } else {
                    target[k]
                };
                bounds.clamp(k, value)
            })
            .collect()
    }
}

impl Default for DifferentialEvolution {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for configuring a [`DifferentialEvolution`] operator.
#[derive(Debug, Clone)]
pub struct DifferentialEvolutionBuilder {
    mutation_factor: f64,
    crossover_rate: f64,
    exclude_target: bool,
}

impl Default for DifferentialEvolutionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DifferentialEvolutionBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mutation_factor: 0.8,
            crossover_rate: 0.9,
            exclude_target: false,
        }
    }

    /// Sets the mutation factor (F).
    ///
    /// Typical values are in `[0.5, 1.0]`. Default: 0.8.
    #[must_use]
    pub fn mutation_factor(mut self, f: f64) -> Self {
        self.mutation_factor = f;
        self
    }

    /// Sets the crossover rate (CR), which must lie in `[0, 1]`. Default: 0.9.
    #[must_use]
    pub fn crossover_rate(mut self, cr: f64) -> Self {
        self.crossover_rate = cr;
        self
    }

    /// Exclude the target member from the donor draw. Default: `false`.
    #[must_use]
    pub fn exclude_target(mut self, exclude: bool) -> Self {
        self.exclude_target = exclude;
        self
    }

    /// Builds the configured [`DifferentialEvolution`].
    #[must_use]
    pub fn build(self) -> DifferentialEvolution {
        DifferentialEvolution {
            mutation_factor: self.mutation_factor,
            crossover_rate: self.crossover_rate,
            exclude_target: self.exclude_target,
        }
    }
}

impl Variation for DifferentialEvolution {
    fn name(&self) -> &str {
        "DE"
    }

    fn validate(&self, pop_size: usize) -> Result<()> {
        if pop_size < MIN_POPULATION {
            return Err(Error::PopulationTooSmall {
                required: MIN_POPULATION,
                got: pop_size,
            });
        }
        check_range("mutation_factor", self.mutation_factor, 0.0, 2.0)?;
        check_range("crossover_rate", self.crossover_rate, 0.0, 1.0)
    }

    fn offspring(
        &mut self,
        population: &Population,
        bounds: &Bounds,
        rng: &mut fastrand::Rng,
    ) -> Vec<Vec<f64>> {
        let xs: Vec<&[f64]> = population.iter().map(|c| c.x()).collect();
        (0..xs.len())
            .map(|i| self.trial_vector(&xs, i, bounds, rng))
            .collect()
    }
}
