//! Genetic variation in the NSGA-II style.
//!
//! Parents are picked by binary tournament on (front rank, crowding
//! distance), recombined with simulated binary crossover (SBX), and
//! perturbed with polynomial mutation. Paired with
//! [`Truncation::CrowdingDistance`](crate::selection::Truncation::CrowdingDistance)
//! survival this reproduces the NSGA-II generational loop.
//!
//! # Configuration
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `crossover_prob` | 0.9 | Probability a parent pair is recombined |
//! | `crossover_eta` | 20.0 | SBX distribution index |
//! | `mutation_eta` | 20.0 | Polynomial mutation distribution index |
//! | `mutation_prob` | `1 / n_var` | Per-gene mutation probability |

use crate::error::{Error, Result};
use crate::operator::{Variation, check_range};
use crate::pareto::{self, SortMode};
use crate::population::Population;
use crate::problem::Bounds;
use crate::rng_util;

/// Tournament + SBX + polynomial mutation.
#[derive(Clone, Debug)]
pub struct Genetic {
    crossover_prob: f64,
    crossover_eta: f64,
    mutation_eta: f64,
    mutation_prob: Option<f64>,
}

impl Genetic {
    /// Creates a genetic operator with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a builder for configuring a `Genetic` operator.
    #[must_use]
    pub fn builder() -> GeneticBuilder {
        GeneticBuilder::default()
    }
}

impl Default for Genetic {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`Genetic`].
#[derive(Debug, Clone, Default)]
pub struct GeneticBuilder {
    crossover_prob: Option<f64>,
    crossover_eta: Option<f64>,
    mutation_eta: Option<f64>,
    mutation_prob: Option<f64>,
}

impl GeneticBuilder {
    /// Sets the crossover probability. Default: 0.9.
    #[must_use]
    pub fn crossover_prob(mut self, prob: f64) -> Self {
        self.crossover_prob = Some(prob);
        self
    }

    /// Sets the SBX distribution index. Default: 20.0.
    #[must_use]
    pub fn crossover_eta(mut self, eta: f64) -> Self {
        self.crossover_eta = Some(eta);
        self
    }

    /// Sets the polynomial mutation distribution index. Default: 20.0.
    #[must_use]
    pub fn mutation_eta(mut self, eta: f64) -> Self {
        self.mutation_eta = Some(eta);
        self
    }

    /// Sets the per-gene mutation probability. Default: `1 / n_var`.
    #[must_use]
    pub fn mutation_prob(mut self, prob: f64) -> Self {
        self.mutation_prob = Some(prob);
        self
    }

    /// Builds the configured [`Genetic`] operator.
    #[must_use]
    pub fn build(self) -> Genetic {
        Genetic {
            crossover_prob: self.crossover_prob.unwrap_or(0.9),
            crossover_eta: self.crossover_eta.unwrap_or(20.0),
            mutation_eta: self.mutation_eta.unwrap_or(20.0),
            mutation_prob: self.mutation_prob,
        }
    }
}

impl Variation for Genetic {
    fn name(&self) -> &str {
        "GA"
    }

    fn validate(&self, pop_size: usize) -> Result<()> {
        if pop_size < 2 {
            return Err(Error::PopulationTooSmall {
                required: 2,
                got: pop_size,
            });
        }
        check_range("crossover_prob", self.crossover_prob, 0.0, 1.0)?;
        check_range("crossover_eta", self.crossover_eta, 0.0, f64::MAX)?;
        check_range("mutation_eta", self.mutation_eta, 0.0, f64::MAX)?;
        if let Some(prob) = self.mutation_prob {
            check_range("mutation_prob", prob, 0.0, 1.0)?;
        }
        Ok(())
    }

    #[allow(clippy::cast_precision_loss)]
    fn offspring(
        &mut self,
        population: &Population,
        bounds: &Bounds,
        rng: &mut fastrand::Rng,
    ) -> Vec<Vec<f64>> {
        let n = population.len();
        if n == 0 {
            return Vec::new();
        }

        let values = population.objective_matrix();
        let violations = if population.has_violations() {
            population.violations()
        } else {
            Vec::new()
        };
        let fronts = pareto::non_dominated_sort_with(&values, &violations, SortMode::Full);
        let rank = pareto::ranks(&fronts, n);
        let mut crowding = vec![0.0_f64; n];
        for front in &fronts {
            let cd = pareto::crowding_distance_indexed(front, &values);
            for (pos, &idx) in front.iter().enumerate() {
                crowding[idx] = cd[pos];
            }
        }

        let mutation_prob = self
            .mutation_prob
            .unwrap_or_else(|| 1.0 / bounds.len().max(1) as f64);

        let mut offspring = Vec::with_capacity(n);
        while offspring.len() < n {
            let p1 = binary_tournament(rng, &rank, &crowding);
            let p2 = binary_tournament(rng, &rank, &crowding);

            let (child1, child2) = crossover(
                rng,
                population.members()[p1].x(),
                population.members()[p2].x(),
                self.crossover_prob,
                self.crossover_eta,
            );
            for mut child in [child1, child2] {
                if offspring.len() == n {
                    break;
                }
                mutate(rng, &mut child, bounds, mutation_prob, self.mutation_eta);
                bounds.clamp_all(&mut child);
                offspring.push(child);
            }
        }

        offspring
    }
}

/// Binary tournament on (front rank, crowding distance).
fn binary_tournament(rng: &mut fastrand::Rng, ranks: &[usize], crowding: &[f64]) -> usize {
    let (a, b) = (rng.usize(0..ranks.len()), rng.usize(0..ranks.len()));
    let order = ranks[a]
        .cmp(&ranks[b])
        .then_with(|| crowding[b].total_cmp(&crowding[a]));
    if order.is_le() { a } else { b }
}

/// Recombine a parent pair with SBX. Children are left unclamped.
fn crossover(
    rng: &mut fastrand::Rng,
    parent1: &[f64],
    parent2: &[f64],
    crossover_prob: f64,
    eta: f64,
) -> (Vec<f64>, Vec<f64>) {
    if rng.f64() > crossover_prob {
        return (parent1.to_vec(), parent2.to_vec());
    }

    parent1
        .iter()
        .zip(parent2)
        .map(|(&p1, &p2)| {
            if (p1 - p2).abs() < 1e-14 {
                return (p1, p2);
            }
            let beta = sbx_spread(rng.f64(), eta);
            let mid = 0.5 * (p1 + p2);
            let half_gap = 0.5 * beta * (p1 - p2);
            (mid + half_gap, mid - half_gap)
        })
        .unzip()
}

/// SBX spread factor for a uniform draw `u` in `[0, 1)`.
///
/// `u = 0.5` gives 1.0, which reproduces the parents.
fn sbx_spread(u: f64, eta: f64) -> f64 {
    let exponent = 1.0 / (eta + 1.0);
    if u <= 0.5 {
        (2.0 * u).powf(exponent)
    } else {
        (0.5 / (1.0 - u)).powf(exponent)
    }
}

/// Apply polynomial mutation gene by gene with probability `mutation_prob`.
/// The result is left unclamped.
fn mutate(
    rng: &mut fastrand::Rng,
    individual: &mut [f64],
    bounds: &Bounds,
    mutation_prob: f64,
    eta: f64,
) {
    let ranges = bounds.lower().iter().zip(bounds.upper());
    for (value, (&low, &high)) in individual.iter_mut().zip(ranges) {
        if rng.f64() >= mutation_prob || high <= low {
            continue;
        }
        let u = rng_util::f64_range(rng, 0.0, 1.0);
        *value += polynomial_shift(u, (*value - low) / (high - low), eta) * (high - low);
    }
}

/// Polynomial mutation step, as a fraction of the dimension's range.
///
/// `position` is the gene's normalized location in `[0, 1]`; the step never
/// pushes it outside that interval.
fn polynomial_shift(u: f64, position: f64, eta: f64) -> f64 {
    let power = eta + 1.0;
    if u < 0.5 {
        let base = 2.0 * u + (1.0 - 2.0 * u) * (1.0 - position).powf(power);
        base.powf(1.0 / power) - 1.0
    } else {
        let base = 2.0 * (1.0 - u) + 2.0 * (u - 0.5) * position.powf(power);
        1.0 - base.powf(1.0 / power)
    }
}
