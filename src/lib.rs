#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Evolutionary multi-objective optimization over continuous box-bounded
//! decision spaces. A [`Driver`] evolves a population with a pluggable
//! variation operator (particle swarm, differential evolution or a genetic
//! operator), ranks parents and offspring by Pareto dominance, and keeps the
//! best fronts. Every run is reproducible from a single seed.
//!
//! # Getting Started
//!
//! ```
//! use moea::prelude::*;
//!
//! // Schaffer N.1: the Pareto set is x in [0, 2].
//! let problem = FnProblem::new(Bounds::uniform(1, -10.0, 10.0).unwrap(), 2, |x: &[f64]| {
//!     vec![x[0] * x[0], (x[0] - 2.0).powi(2)]
//! });
//!
//! let mut driver = Driver::builder()
//!     .pop_size(20)
//!     .max_generations(30)
//!     .seed(42)
//!     .build(problem, DifferentialEvolution::new())
//!     .unwrap();
//!
//! let outcome = driver.run().unwrap();
//! for candidate in &outcome.optimum {
//!     println!("x = {:.3}, f = {:?}", candidate.x()[0], candidate.objectives());
//! }
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`Problem`] | Decision-space bounds and the objective (and constraint) function. |
//! | [`Population`] | Ordered, evaluated [`Candidate`]s. |
//! | [`Variation`](operator::Variation) | Turns a population into offspring decision vectors. |
//! | [`survive`](selection::survive) | Non-dominated survival selection over parents plus offspring. |
//! | [`Driver`] | The generational loop, its state machine and its random stream. |
//! | [`RunLog`] | Objective matrices of finished runs, exportable as CSV. |
//!
//! # Operators
//!
//! | Operator | Algorithm | Minimum population |
//! |----------|-----------|--------------------|
//! | [`ParticleSwarm`](operator::ParticleSwarm) | MOPSO | 1 |
//! | [`DifferentialEvolution`](operator::DifferentialEvolution) | DE/rand/1/bin | 4 |
//! | [`Genetic`](operator::Genetic) | NSGA-II style SBX + polynomial mutation | 2 |
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `parallel` | Evaluate offspring batches on the rayon thread pool | off |
//! | `serde` | `Serialize`/`Deserialize` on configuration and result types | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) at key points of a run | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

pub mod driver;
mod error;
pub mod operator;
pub mod pareto;
pub mod population;
pub mod problem;
pub mod record;
mod rng_util;
pub mod selection;

pub use driver::{
    Driver, DriverBuilder, DriverConfig, DriverState, GenerationReport, RunOutcome,
};
pub use error::{Error, Result};
pub use population::{Candidate, Population};
pub use problem::{Bounds, Evaluation, FnProblem, Problem};
pub use record::{RunLog, RunRecord};
pub use selection::{Survival, Truncation};

/// Convenient wildcard import for the most common types.
///
/// ```
/// use moea::prelude::*;
/// ```
pub mod prelude {
    pub use crate::driver::{
        Driver, DriverBuilder, DriverConfig, DriverState, GenerationReport, RunOutcome,
    };
    pub use crate::error::{Error, Result};
    pub use crate::operator::{
        DifferentialEvolution, Genetic, ParticleSwarm, Variation,
    };
    pub use crate::pareto::{SortMode, dominates, non_dominated_sort};
    pub use crate::population::{Candidate, Population};
    pub use crate::problem::{Bounds, Evaluation, FnProblem, Problem};
    pub use crate::record::{RunLog, RunRecord};
    pub use crate::selection::{Survival, Truncation};
}
