//! Multi-objective particle swarm optimization (MOPSO).
//!
//! Each population member is a particle with a velocity and a personal
//! best. One global best is shared by the swarm. Per generation:
//!
//! 1. The global best is drawn uniformly at random from the non-dominated
//!    set of all personal bests. The draw is repeated every generation, so
//!    the swarm is pulled toward different parts of the front over time
//!    instead of collapsing onto a single corner.
//! 2. `v = w*v + c1*r1*(pbest - x) + c2*r2*(gbest - x)` with `r1, r2`
//!    drawn per coordinate from `[0, 1)`.
//! 3. The new position `x + v` is clamped into the bounds.
//!
//! After evaluation a particle's personal best moves to its offspring only
//! if the offspring strictly dominates it, so personal bests never regress.
//! Survival may keep a particle's old position, its new one, both or
//! neither; every surviving member carries the velocity and personal best
//! of the particle it came from.
//!
//! # Configuration
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `inertia` (w) | 0.7 | Fraction of the previous velocity kept |
//! | `cognitive` (c1) | 1.5 | Pull toward the particle's personal best |
//! | `social` (c2) | 1.5 | Pull toward the swarm's global best |
//!
//! # Examples
//!
//! ```
//! use moea::operator::ParticleSwarm;
//!
//! let pso = ParticleSwarm::builder()
//!     .inertia(0.5)
//!     .cognitive(1.0)
//!     .social(2.0)
//!     .build();
//! ```

use crate::error::Result;
use crate::operator::{Variation, check_range};
use crate::population::{Candidate, Population};
use crate::problem::Bounds;

/// Multi-objective particle swarm variation.
#[derive(Clone, Debug)]
pub struct ParticleSwarm {
    inertia: f64,
    cognitive: f64,
    social: f64,
    velocities: Vec<Vec<f64>>,
    personal_best: Vec<Candidate>,
    global_best: Option<Candidate>,
}

impl ParticleSwarm {
    /// Creates a swarm with default coefficients.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a builder for configuring a `ParticleSwarm`.
    #[must_use]
    pub fn builder() -> ParticleSwarmBuilder {
        ParticleSwarmBuilder::default()
    }

    /// Personal best of every particle, indexed like the population.
    #[must_use]
    pub fn personal_bests(&self) -> &[Candidate] {
        &self.personal_best
    }

    /// Global best drawn for the most recent generation.
    #[must_use]
    pub fn global_best(&self) -> Option<&Candidate> {
        self.global_best.as_ref()
    }

    /// Current velocity of every particle.
    #[must_use]
    pub fn velocities(&self) -> &[Vec<f64>] {
        &self.velocities
    }

    /// Keep per-particle state aligned with the population size.
    ///
    /// New particles start at rest with themselves as personal best.
    fn sync_swarm(&mut self, population: &Population) {
        let n = population.len();
        self.personal_best.truncate(n);
        self.velocities.truncate(n);
        for i in self.personal_best.len()..n {
            self.personal_best.push(population.members()[i].clone());
        }
        for i in self.velocities.len()..n {
            self.velocities
                .push(vec![0.0; population.members()[i].x().len()]);
        }
    }

    fn reselect_global_best(&mut self, rng: &mut fastrand::Rng) {
        let bests = Population::new(self.personal_best.clone());
        let front = bests.non_dominated_indices();
        self.global_best = if front.is_empty() {
            None
        } else {
            Some(self.personal_best[front[rng.usize(0..front.len())]].clone())
        };
    }
}

impl Default for ParticleSwarm {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`ParticleSwarm`].
#[derive(Debug, Clone, Default)]
pub struct ParticleSwarmBuilder {
    inertia: Option<f64>,
    cognitive: Option<f64>,
    social: Option<f64>,
}

impl ParticleSwarmBuilder {
    /// Sets the inertia weight `w`. Default: 0.7.
    #[must_use]
    pub fn inertia(mut self, w: f64) -> Self {
        self.inertia = Some(w);
        self
    }

    /// Sets the cognitive coefficient `c1`. Default: 1.5.
    #[must_use]
    pub fn cognitive(mut self, c1: f64) -> Self {
        self.cognitive = Some(c1);
        self
    }

    /// Sets the social coefficient `c2`. Default: 1.5.
    #[must_use]
    pub fn social(mut self, c2: f64) -> Self {
        self.social = Some(c2);
        self
    }

    /// Builds the configured [`ParticleSwarm`].
    #[must_use]
    pub fn build(self) -> ParticleSwarm {
        ParticleSwarm {
            inertia: self.inertia.unwrap_or(0.7),
            cognitive: self.cognitive.unwrap_or(1.5),
            social: self.social.unwrap_or(1.5),
            velocities: Vec::new(),
            personal_best: Vec::new(),
            global_best: None,
        }
    }
}

impl Variation for ParticleSwarm {
    fn name(&self) -> &str {
        "MOPSO"
    }

    fn validate(&self, pop_size: usize) -> Result<()> {
        if pop_size < 1 {
            return Err(crate::Error::PopulationTooSmall {
                required: 1,
                got: pop_size,
            });
        }
        check_range("inertia", self.inertia, f64::MIN, f64::MAX)?;
        check_range("cognitive", self.cognitive, 0.0, f64::MAX)?;
        check_range("social", self.social, 0.0, f64::MAX)
    }

    fn initialize(&mut self, population: &Population, _rng: &mut fastrand::Rng) {
        self.personal_best = population.members().to_vec();
        self.velocities = population
            .iter()
            .map(|c| vec![0.0; c.x().len()])
            .collect();
        self.global_best = None;
    }

    fn offspring(
        &mut self,
        population: &Population,
        bounds: &Bounds,
        rng: &mut fastrand::Rng,
    ) -> Vec<Vec<f64>> {
        self.sync_swarm(population);
        self.reselect_global_best(rng);
        let Some(global_best) = self.global_best.as_ref() else {
            return Vec::new();
        };

        let (w, c1, c2) = (self.inertia, self.cognitive, self.social);
        let mut offspring = Vec::with_capacity(population.len());

        for (i, member) in population.iter().enumerate() {
            let x = member.x();
            let pbest = self.personal_best[i].x();
            let gbest = global_best.x();
            let velocity = &mut self.velocities[i];

            let mut next = Vec::with_capacity(x.len());
            for d in 0..x.len() {
                let r1 = rng.f64();
                let r2 = rng.f64();
                velocity[d] =
                    w * velocity[d] + c1 * r1 * (pbest[d] - x[d]) + c2 * r2 * (gbest[d] - x[d]);
                next.push(bounds.clamp(d, x[d] + velocity[d]));
            }
            offspring.push(next);
        }

        offspring
    }

    fn observe(&mut self, offspring: &Population, _rng: &mut fastrand::Rng) {
        for (best, candidate) in self.personal_best.iter_mut().zip(offspring) {
            if candidate.dominates(best) {
                *best = candidate.clone();
            }
        }
    }

    fn survived(&mut self, survivors: &[usize], n_parents: usize) {
        if n_parents == 0 || self.personal_best.len() != n_parents {
            return;
        }
        // A parent and its offspring are the same particle at two positions.
        let particles: Vec<usize> = survivors.iter().map(|&p| p % n_parents).collect();
        self.personal_best = particles
            .iter()
            .map(|&k| self.personal_best[k].clone())
            .collect();
        self.velocities = particles
            .iter()
            .map(|&k| self.velocities[k].clone())
            .collect();
    }
}
