//! The generational optimization loop.
//!
//! A [`Driver`] owns the problem, the variation operator, the population,
//! and the single random stream of a run. It moves through the states of
//! [`DriverState`]:
//!
//! ```text
//! Uninitialized --initialize()--> Initialized --step()--> Running --...--> Terminated
//! ```
//!
//! One generation is: variation → evaluate offspring → merge with parents →
//! survival selection → tell the operator which pool members survived →
//! recompute the current optimum. The run terminates
//! once the generation counter reaches `max_generations`.
//!
//! # Examples
//!
//! ```
//! use moea::prelude::*;
//!
//! let problem = FnProblem::new(Bounds::uniform(1, 0.0, 1.0).unwrap(), 2, |x: &[f64]| {
//!     vec![x[0] * x[0], (x[0] - 1.0).powi(2)]
//! });
//!
//! let mut driver = Driver::builder()
//!     .pop_size(16)
//!     .max_generations(20)
//!     .seed(42)
//!     .build(problem, ParticleSwarm::new())
//!     .unwrap();
//!
//! let outcome = driver.run().unwrap();
//! assert_eq!(outcome.generations, 20);
//! assert_eq!(outcome.population.len(), 16);
//! assert!(!outcome.optimum.is_empty());
//! ```

mod builder;

pub use builder::DriverBuilder;

use crate::error::{Error, Result};
use crate::operator::Variation;
use crate::population::Population;
use crate::problem::Problem;
use crate::record::RunRecord;
use crate::selection::{self, Truncation};

/// Run-level settings of a [`Driver`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriverConfig {
    /// Members kept between generations.
    pub pop_size: usize,
    /// Generation count at which the run terminates.
    pub max_generations: usize,
    /// Seed of the random stream; `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Policy for cutting the overflowing front.
    pub truncation: Truncation,
    /// Drop identical decision vectors from the merged pool.
    pub eliminate_duplicates: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            pop_size: 100,
            max_generations: 100,
            seed: None,
            truncation: Truncation::Random,
            eliminate_duplicates: false,
        }
    }
}

/// Lifecycle state of a [`Driver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// No population yet.
    Uninitialized,
    /// Initial population sampled and evaluated.
    Initialized,
    /// At least one generation completed, limit not reached.
    Running,
    /// The generation limit was reached.
    Terminated,
}

/// Summary of one completed generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationReport {
    /// Generation counter after this step (1 for the first generation).
    pub generation: usize,
    /// Offspring evaluated in this generation.
    pub n_evaluated: usize,
    /// Members removed as duplicates before selection.
    pub duplicates_removed: usize,
    /// Size of the population after selection.
    pub population_size: usize,
    /// Size of the non-dominated subset of the new population.
    pub optimum_size: usize,
    /// `true` if the pool was too small to fill the population.
    pub underfilled: bool,
}

/// Final state of a completed run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunOutcome {
    /// The last population.
    pub population: Population,
    /// Non-dominated members of the last population.
    pub optimum: Population,
    /// Generations performed.
    pub generations: usize,
    /// Total objective evaluations, including the initial population.
    pub n_evaluations: usize,
}

impl RunOutcome {
    /// Package the optimum's objective vectors under `algorithm_name`.
    #[must_use]
    pub fn to_record(&self, algorithm_name: impl Into<String>) -> RunRecord {
        RunRecord::new(algorithm_name, self.optimum.objective_matrix())
    }
}

/// Drives an evolutionary multi-objective run.
pub struct Driver<P, V> {
    problem: P,
    variation: V,
    config: DriverConfig,
    rng: fastrand::Rng,
    state: DriverState,
    population: Population,
    optimum: Population,
    generation: usize,
    n_evaluations: usize,
}

impl Driver<(), ()> {
    /// Return a [`DriverBuilder`] for configuring a run.
    #[must_use]
    pub fn builder() -> DriverBuilder {
        DriverBuilder::new()
    }
}

impl<P: Problem, V: Variation> Driver<P, V> {
    pub(crate) fn from_parts(problem: P, variation: V, config: DriverConfig) -> Self {
        let rng = config
            .seed
            .map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        Self {
            problem,
            variation,
            config,
            rng,
            state: DriverState::Uninitialized,
            population: Population::default(),
            optimum: Population::default(),
            generation: 0,
            n_evaluations: 0,
        }
    }

    /// Sample and evaluate the initial population.
    ///
    /// Calling this again on an initialized driver restarts the run from a
    /// fresh population, continuing the same random stream.
    ///
    /// # Errors
    ///
    /// Propagates evaluation errors.
    pub fn initialize(&mut self) -> Result<()> {
        let pop_size = self.config.pop_size;
        self.population = Population::random(&self.problem, pop_size, &mut self.rng)?;
        self.n_evaluations = self.population.len();
        self.optimum = self.population.non_dominated();
        self.variation.initialize(&self.population, &mut self.rng);
        self.generation = 0;
        self.state = DriverState::Initialized;

        trace_info!(
            algorithm = self.variation.name(),
            pop_size,
            optimum_size = self.optimum.len(),
            "driver initialized"
        );
        Ok(())
    }

    /// Perform one generation, initializing first if needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Terminated`] once the generation limit was reached,
    /// and propagates evaluation errors.
    pub fn step(&mut self) -> Result<GenerationReport> {
        match self.state {
            DriverState::Uninitialized => self.initialize()?,
            DriverState::Terminated => return Err(Error::Terminated),
            DriverState::Initialized | DriverState::Running => {}
        }

        let xs = self
            .variation
            .offspring(&self.population, self.problem.bounds(), &mut self.rng);
        let offspring = Population::evaluate(&self.problem, xs)?;
        let n_evaluated = offspring.len();
        self.n_evaluations += n_evaluated;
        self.variation.observe(&offspring, &mut self.rng);

        let n_parents = self.population.len();
        let mut pool = core::mem::take(&mut self.population).merge(offspring);
        // Position of every pool member in the merged parents + offspring order.
        let mut origin: Vec<usize> = (0..pool.len()).collect();
        let mut duplicates_removed = 0;
        if self.config.eliminate_duplicates {
            origin = pool.unique_indices();
            duplicates_removed = pool.len() - origin.len();
            pool = pool.select(&origin);
        }

        let violations = if pool.has_violations() {
            pool.violations()
        } else {
            Vec::new()
        };
        let survival = selection::survive(
            &pool.objective_matrix(),
            &violations,
            self.config.pop_size,
            self.config.truncation,
            &mut self.rng,
        );
        let underfilled = survival.is_underfilled();
        if underfilled {
            trace_info!(
                pool_size = pool.len(),
                "survival pool smaller than population size"
            );
        }

        self.population = pool.select(survival.indices());
        let survivors: Vec<usize> = survival.indices().iter().map(|&i| origin[i]).collect();
        self.variation.survived(&survivors, n_parents);
        self.optimum = self.population.non_dominated();
        self.generation += 1;
        self.state = if self.generation >= self.config.max_generations {
            DriverState::Terminated
        } else {
            DriverState::Running
        };

        let report = GenerationReport {
            generation: self.generation,
            n_evaluated,
            duplicates_removed,
            population_size: self.population.len(),
            optimum_size: self.optimum.len(),
            underfilled,
        };
        trace_debug!(
            generation = report.generation,
            optimum_size = report.optimum_size,
            "generation completed"
        );
        Ok(report)
    }

    /// Run until the generation limit and return the final state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Terminated`] if the driver already finished, and
    /// propagates evaluation errors.
    pub fn run(&mut self) -> Result<RunOutcome> {
        if self.state == DriverState::Terminated {
            return Err(Error::Terminated);
        }
        if self.state == DriverState::Uninitialized {
            self.initialize()?;
        }
        while self.state != DriverState::Terminated {
            self.step()?;
        }

        trace_info!(
            algorithm = self.variation.name(),
            generations = self.generation,
            n_evaluations = self.n_evaluations,
            "run terminated"
        );

        Ok(self.outcome())
    }

    /// Snapshot the current population and optimum.
    #[must_use]
    pub fn outcome(&self) -> RunOutcome {
        RunOutcome {
            population: self.population.clone(),
            optimum: self.optimum.clone(),
            generations: self.generation,
            n_evaluations: self.n_evaluations,
        }
    }

    /// Record the current optimum under the variation operator's name.
    #[must_use]
    pub fn record(&self) -> RunRecord {
        RunRecord::new(self.variation.name(), self.optimum.objective_matrix())
    }

    /// Consume the driver, recording its optimum under `algorithm_name`.
    #[must_use]
    pub fn into_record(self, algorithm_name: impl Into<String>) -> RunRecord {
        RunRecord::new(algorithm_name, self.optimum.objective_matrix())
    }

    /// The current population.
    #[must_use]
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Non-dominated members of the current population.
    #[must_use]
    pub fn optimum(&self) -> &Population {
        &self.optimum
    }

    /// Generations completed so far.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Objective evaluations performed so far.
    #[must_use]
    pub fn n_evaluations(&self) -> usize {
        self.n_evaluations
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// The run configuration.
    #[must_use]
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// The problem being optimized.
    #[must_use]
    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// The variation operator.
    #[must_use]
    pub fn variation(&self) -> &V {
        &self.variation
    }
}
