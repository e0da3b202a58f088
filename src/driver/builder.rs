use crate::error::{Error, Result};
use crate::operator::Variation;
use crate::problem::{self, Problem};
use crate::selection::Truncation;

use super::{Driver, DriverConfig};

/// A builder for constructing [`Driver`] instances with a fluent API.
///
/// Created via [`Driver::builder()`]. All validation happens in
/// [`build`](Self::build), so a misconfigured run fails before the first
/// evaluation.
///
/// # Defaults
///
/// - Population size: 100
/// - Generations: 100
/// - Seed: random
/// - Truncation: [`Truncation::Random`]
/// - Duplicate elimination: off
///
/// # Examples
///
/// ```
/// use moea::prelude::*;
///
/// let problem = FnProblem::new(Bounds::uniform(2, 0.0, 1.0).unwrap(), 2, |x: &[f64]| {
///     vec![x[0], 1.0 - x[0] + x[1]]
/// });
///
/// let driver = Driver::builder()
///     .pop_size(20)
///     .max_generations(10)
///     .seed(7)
///     .truncation(Truncation::CrowdingDistance)
///     .build(problem, DifferentialEvolution::new())
///     .unwrap();
///
/// assert_eq!(driver.config().pop_size, 20);
/// ```
#[derive(Clone, Debug, Default)]
pub struct DriverBuilder {
    config: DriverConfig,
}

impl DriverBuilder {
    /// Create a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    #[must_use]
    pub fn from_config(config: DriverConfig) -> Self {
        Self { config }
    }

    /// Set the number of members kept between generations.
    #[must_use]
    pub fn pop_size(mut self, pop_size: usize) -> Self {
        self.config.pop_size = pop_size;
        self
    }

    /// Set the number of generations after which the run terminates.
    #[must_use]
    pub fn max_generations(mut self, max_generations: usize) -> Self {
        self.config.max_generations = max_generations;
        self
    }

    /// Seed the random stream for a reproducible run.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set how the overflowing front is cut during survival selection.
    #[must_use]
    pub fn truncation(mut self, truncation: Truncation) -> Self {
        self.config.truncation = truncation;
        self
    }

    /// Remove members with identical decision vectors from the merged pool
    /// before survival selection.
    #[must_use]
    pub fn eliminate_duplicates(mut self, enabled: bool) -> Self {
        self.config.eliminate_duplicates = enabled;
        self
    }

    /// Validate the configuration and build the [`Driver`].
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the problem is malformed, the
    /// population is empty, the generation limit is zero, or the variation
    /// operator rejects the population size or its own parameters.
    pub fn build<P: Problem, V: Variation>(self, problem: P, variation: V) -> Result<Driver<P, V>> {
        let config = self.config;
        problem::validate(&problem)?;
        if config.pop_size == 0 {
            return Err(Error::PopulationTooSmall {
                required: 1,
                got: 0,
            });
        }
        if config.max_generations == 0 {
            return Err(Error::ZeroGenerations);
        }
        variation.validate(config.pop_size)?;

        Ok(Driver::from_parts(problem, variation, config))
    }
}
