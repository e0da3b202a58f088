use moea::operator::{Genetic, Variation};
use moea::prelude::*;

use crate::{drive_raw, zdt1_g};
use crate::test_problems::{BinhKorn, Zdt1};

#[test]
fn offspring_stay_in_bounds() {
    let mut ga = Genetic::builder().mutation_prob(1.0).mutation_eta(1.0).build();
    drive_raw(&Zdt1::new(6), &mut ga, 11, 5, 1);
}

#[test]
fn constrained_offspring_stay_in_bounds() {
    let mut ga = Genetic::new();
    drive_raw(&BinhKorn::new(), &mut ga, 10, 5, 2);
}

#[test]
fn no_crossover_no_mutation_copies_parents() {
    let problem = Zdt1::new(3);
    let mut rng = fastrand::Rng::with_seed(3);
    let pop = Population::random(&problem, 9, &mut rng).unwrap();
    let mut ga = Genetic::builder()
        .crossover_prob(0.0)
        .mutation_prob(0.0)
        .build();
    let parents = pop.decision_matrix();
    for child in ga.offspring(&pop, problem.bounds(), &mut rng) {
        assert!(parents.contains(&child));
    }
}

#[test]
fn invalid_parameters() {
    assert!(Genetic::builder().crossover_prob(-0.1).build().validate(10).is_err());
    assert!(Genetic::builder().crossover_eta(-1.0).build().validate(10).is_err());
    assert!(Genetic::new().validate(1).is_err());
}

#[test]
fn nsga2_configuration_improves_zdt1() {
    let outcome = Driver::builder()
        .pop_size(40)
        .max_generations(50)
        .seed(7)
        .truncation(Truncation::CrowdingDistance)
        .build(Zdt1::new(5), Genetic::new())
        .unwrap()
        .run()
        .unwrap();
    let mean_g = outcome.optimum.iter().map(|c| zdt1_g(c.x())).sum::<f64>()
        / outcome.optimum.len() as f64;
    assert!(mean_g < 3.0, "mean g of optimum = {mean_g}");
}
