use moea::operator::{DifferentialEvolution, Variation};
use moea::prelude::*;

use crate::{drive_raw, zdt1_g};
use crate::test_problems::{Dtlz2, Zdt1};

#[test]
fn offspring_stay_in_bounds_for_extreme_factors() {
    let problem = Zdt1::new(5);
    for f in [0.0, 0.5, 2.0] {
        let mut de = DifferentialEvolution::builder().mutation_factor(f).build();
        drive_raw(&problem, &mut de, 10, 5, 1);
    }
}

#[test]
fn exclude_target_still_bounded() {
    let problem = Dtlz2::new(6, 3);
    let mut de = DifferentialEvolution::builder().exclude_target(true).build();
    drive_raw(&problem, &mut de, 4, 10, 2);
}

#[test]
fn full_crossover_differs_from_target() {
    let problem = Zdt1::new(4);
    let mut rng = fastrand::Rng::with_seed(3);
    let pop = Population::random(&problem, 8, &mut rng).unwrap();
    let mut de = DifferentialEvolution::builder()
        .crossover_rate(1.0)
        .exclude_target(true)
        .build();
    let xs = de.offspring(&pop, problem.bounds(), &mut rng);
    let changed = xs
        .iter()
        .zip(&pop)
        .filter(|(child, parent)| child.as_slice() != parent.x())
        .count();
    assert!(changed > 0);
}

#[test]
fn validation_errors() {
    assert!(DifferentialEvolution::new().validate(4).is_ok());
    assert!(matches!(
        DifferentialEvolution::new().validate(2),
        Err(Error::PopulationTooSmall { required: 4, got: 2 })
    ));
    assert!(matches!(
        DifferentialEvolution::builder()
            .mutation_factor(f64::NAN)
            .build()
            .validate(10),
        Err(Error::InvalidParameter {
            name: "mutation_factor",
            ..
        })
    ));
}

#[test]
fn de_improves_zdt1() {
    let outcome = Driver::builder()
        .pop_size(40)
        .max_generations(50)
        .seed(6)
        .build(Zdt1::new(5), DifferentialEvolution::new())
        .unwrap()
        .run()
        .unwrap();
    let mean_g = outcome.optimum.iter().map(|c| zdt1_g(c.x())).sum::<f64>()
        / outcome.optimum.len() as f64;
    assert!(mean_g < 3.0, "mean g of optimum = {mean_g}");
}
