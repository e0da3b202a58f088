#![allow(clippy::cast_precision_loss)]

#[path = "../../benches/test_problems.rs"]
#[allow(dead_code)]
mod test_problems;

mod differential_evolution;
mod genetic;
mod particle_swarm;

use moea::Problem;
use moea::operator::Variation;
use moea::population::Population;

/// Distance-to-front term of ZDT1; 1.0 exactly on the Pareto set.
fn zdt1_g(x: &[f64]) -> f64 {
    1.0 + 9.0 * x[1..].iter().sum::<f64>() / (x.len() - 1) as f64
}

/// Run `generations` rounds of offspring → evaluate → observe without
/// survival selection, checking every offspring against the bounds.
fn drive_raw<P: Problem, V: Variation>(
    problem: &P,
    variation: &mut V,
    pop_size: usize,
    generations: usize,
    seed: u64,
) -> Population {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut population = Population::random(problem, pop_size, &mut rng).unwrap();
    variation.initialize(&population, &mut rng);
    for _ in 0..generations {
        let xs = variation.offspring(&population, problem.bounds(), &mut rng);
        assert_eq!(xs.len(), population.len());
        for x in &xs {
            assert!(problem.bounds().contains(x), "{x:?} escaped bounds");
        }
        let offspring = Population::evaluate(problem, xs).unwrap();
        variation.observe(&offspring, &mut rng);
        population = offspring;
    }
    population
}
