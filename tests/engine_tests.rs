#![allow(clippy::cast_precision_loss)]


use moea::operator::{DifferentialEvolution, Genetic, ParticleSwarm, Variation};
use moea::pareto::{self, SortMode};
use moea::prelude::*;
use moea::selection::survive;
use test_problems::{BinhKorn, Dtlz2, Zdt1};

fn random_matrix(rng: &mut fastrand::Rng, n: usize, m: usize) -> Vec<Vec<f64>> {
    // Coarse grid values produce plenty of ties and duplicates.
    (0..n)
        .map(|_| (0..m).map(|_| f64::from(rng.u8(0..5))).collect())
        .collect()
}

fn line_problem() -> FnProblem<impl Fn(&[f64]) -> Vec<f64> + Sync> {
    FnProblem::new(Bounds::uniform(1, 0.0, 1.0).unwrap(), 2, |x: &[f64]| {
        vec![x[0], 1.0 - x[0]]
    })
}

// ---------------------------------------------------------------------------
// Sorting and selection properties
// ---------------------------------------------------------------------------

#[test]
fn dominance_is_antisymmetric() {
    let mut rng = fastrand::Rng::with_seed(1);
    let values = random_matrix(&mut rng, 40, 3);
    for a in &values {
        for b in &values {
            if a != b && pareto::dominates(a, b) {
                assert!(!pareto::dominates(b, a), "{a:?} and {b:?}");
            }
        }
    }
}

#[test]
fn sorting_partitions_every_index_once() {
    let mut rng = fastrand::Rng::with_seed(2);
    for _ in 0..20 {
        let values = random_matrix(&mut rng, 30, 2);
        let fronts = pareto::non_dominated_sort(&values);
        let mut all: Vec<usize> = fronts.iter().flatten().copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..30).collect::<Vec<_>>());
    }
}

#[test]
fn fronts_respect_dominance() {
    let mut rng = fastrand::Rng::with_seed(3);
    let values = random_matrix(&mut rng, 50, 3);
    let fronts = pareto::non_dominated_sort(&values);

    for &i in &fronts[0] {
        assert!(values.iter().all(|v| !pareto::dominates(v, &values[i])));
    }
    for (rank, front) in fronts.iter().enumerate().skip(1) {
        for &i in front {
            let dominated_earlier = fronts[..rank]
                .iter()
                .flatten()
                .any(|&j| pareto::dominates(&values[j], &values[i]));
            assert!(dominated_earlier, "index {i} in front {rank} has no dominator");
        }
    }
}

#[test]
fn first_front_mode_matches_full_sort() {
    let mut rng = fastrand::Rng::with_seed(4);
    let values = random_matrix(&mut rng, 25, 2);
    let full = pareto::non_dominated_sort(&values);
    let first = pareto::non_dominated_sort_with(&values, &[], SortMode::FirstFront);
    assert_eq!(first.len(), 1);
    let mut a = full[0].clone();
    let mut b = first[0].clone();
    a.sort_unstable();
    b.sort_unstable();
    assert_eq!(a, b);
}

#[test]
fn survival_size_contract() {
    let mut rng = fastrand::Rng::with_seed(5);
    for pool_size in [1, 3, 8, 16] {
        let values = random_matrix(&mut rng, pool_size, 2);
        for pop_size in [1, 4, 8, 12] {
            for truncation in [Truncation::Random, Truncation::CrowdingDistance] {
                let survival = survive(&values, &[], pop_size, truncation, &mut rng);
                let idx = survival.indices();
                assert!(idx.len() <= pop_size);
                if pool_size >= pop_size {
                    assert_eq!(idx.len(), pop_size);
                    assert!(!survival.is_underfilled());
                } else {
                    assert!(survival.is_underfilled());
                }
                let mut unique = idx.to_vec();
                unique.sort_unstable();
                unique.dedup();
                assert_eq!(unique.len(), idx.len());
            }
        }
    }
}

#[test]
fn collinear_front_is_single_front() {
    let problem = line_problem();
    let pop = Population::evaluate(&problem, vec![vec![0.1], vec![0.4], vec![0.7], vec![0.9]])
        .unwrap();
    let fronts = pareto::non_dominated_sort(&pop.objective_matrix());
    assert_eq!(fronts.len(), 1);
    assert_eq!(fronts[0].len(), 4);
}

#[test]
fn six_candidate_pool_keeps_front_zero() {
    // 0..3 are mutually non-dominated; 3..6 are each dominated by one of them.
    let pool = vec![
        vec![1.0, 5.0],
        vec![3.0, 3.0],
        vec![5.0, 1.0],
        vec![2.0, 6.0],
        vec![4.0, 4.0],
        vec![6.0, 2.0],
    ];
    let mut rng = fastrand::Rng::with_seed(6);
    for _ in 0..50 {
        let kept = survive(&pool, &[], 4, Truncation::Random, &mut rng).into_indices();
        assert_eq!(kept.len(), 4);
        for i in 0..3 {
            assert!(kept.contains(&i));
        }
        assert_eq!(kept.iter().filter(|&&i| i >= 3).count(), 1);
    }
}

// ---------------------------------------------------------------------------
// Driver runs
// ---------------------------------------------------------------------------

fn run_zdt1<V: Variation>(variation: V, seed: u64) -> RunOutcome {
    Driver::builder()
        .pop_size(20)
        .max_generations(15)
        .seed(seed)
        .build(Zdt1::new(6), variation)
        .unwrap()
        .run()
        .unwrap()
}

#[test]
fn same_seed_same_population() {
    let a = run_zdt1(ParticleSwarm::new(), 99);
    let b = run_zdt1(ParticleSwarm::new(), 99);
    assert_eq!(a.population, b.population);

    let a = run_zdt1(DifferentialEvolution::new(), 99);
    let b = run_zdt1(DifferentialEvolution::new(), 99);
    assert_eq!(a.population, b.population);

    let a = run_zdt1(Genetic::new(), 99);
    let b = run_zdt1(Genetic::new(), 99);
    assert_eq!(a.population, b.population);
}

#[test]
fn different_seeds_diverge() {
    let a = run_zdt1(DifferentialEvolution::new(), 1);
    let b = run_zdt1(DifferentialEvolution::new(), 2);
    assert_ne!(a.population, b.population);
}

#[test]
fn population_stays_in_bounds() {
    let problem = Zdt1::new(4);
    let mut driver = Driver::builder()
        .pop_size(12)
        .max_generations(10)
        .seed(7)
        .build(
            &problem,
            DifferentialEvolution::builder().mutation_factor(2.0).build(),
        )
        .unwrap();
    while driver.state() != DriverState::Terminated {
        driver.step().unwrap();
        for c in driver.population() {
            assert!(problem.bounds().contains(c.x()));
        }
    }
}

#[test]
fn personal_bests_never_regress() {
    let mut driver = Driver::builder()
        .pop_size(10)
        .max_generations(12)
        .seed(8)
        .build(Zdt1::new(3), ParticleSwarm::new())
        .unwrap();
    driver.initialize().unwrap();
    let mut previous = driver.variation().personal_bests().to_vec();

    while driver.state() != DriverState::Terminated {
        driver.step().unwrap();
        let current = driver.variation().personal_bests();
        assert_eq!(current.len(), driver.population().len());
        // Survivors inherit a particle's best, possibly improved this generation.
        for new in current {
            assert!(previous.iter().any(|old| new == old || new.dominates(old)));
        }
        previous = current.to_vec();
    }
}

#[test]
fn non_finite_objectives_do_not_abort() {
    let problem = FnProblem::new(Bounds::uniform(1, 0.0, 1.0).unwrap(), 2, |x: &[f64]| {
        if x[0] > 0.5 {
            vec![f64::NAN, f64::INFINITY]
        } else {
            vec![x[0], 1.0 - x[0]]
        }
    });
    let outcome = Driver::builder()
        .pop_size(10)
        .max_generations(5)
        .seed(9)
        .build(problem, Genetic::new())
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(outcome.population.len(), 10);

    let any_finite = outcome
        .population
        .iter()
        .any(|c| c.objectives().iter().all(|v| v.is_finite()));
    if any_finite {
        for c in &outcome.optimum {
            assert!(c.objectives().iter().all(|v| v.is_finite()));
        }
    }
}

#[test]
fn duplicate_elimination_reports_underfill() {
    // A zero-width box makes every decision vector identical.
    let problem = FnProblem::new(
        Bounds::new(vec![0.5, 0.5], vec![0.5, 0.5]).unwrap(),
        2,
        |x: &[f64]| vec![x[0], x[1]],
    );
    let mut driver = Driver::builder()
        .pop_size(6)
        .max_generations(3)
        .seed(10)
        .eliminate_duplicates(true)
        .build(problem, ParticleSwarm::new())
        .unwrap();

    let report = driver.step().unwrap();
    assert!(report.underfilled);
    assert_eq!(report.duplicates_removed, 11);
    assert_eq!(report.population_size, 1);

    // A short population keeps running.
    let report = driver.step().unwrap();
    assert_eq!(report.n_evaluated, 1);
    assert_eq!(report.population_size, 1);
}

#[test]
fn de_rejects_small_population() {
    let err = Driver::builder()
        .pop_size(3)
        .build(Zdt1::new(3), DifferentialEvolution::new())
        .err()
        .unwrap();
    assert!(matches!(err, Error::PopulationTooSmall { required: 4, got: 3 }));
}

#[test]
fn mismatched_objectives_surface_from_evaluation() {
    let problem = FnProblem::new(Bounds::uniform(1, 0.0, 1.0).unwrap(), 3, |x: &[f64]| {
        vec![x[0], 1.0 - x[0]]
    });
    let mut driver = Driver::builder()
        .pop_size(4)
        .build(problem, Genetic::new())
        .unwrap();
    assert!(matches!(
        driver.initialize(),
        Err(Error::ObjectiveDimensionMismatch {
            expected: 3,
            got: 2
        })
    ));
}

#[test]
fn undeclared_constraints_surface_from_evaluation() {
    let problem = FnProblem::new(Bounds::uniform(2, 0.0, 1.0).unwrap(), 2, |x: &[f64]| {
        Evaluation::with_constraints(vec![x[0], x[1]], vec![x[0] + x[1] - 1.0])
    });
    let mut driver = Driver::builder()
        .pop_size(4)
        .build(problem, Genetic::new())
        .unwrap();
    assert!(matches!(
        driver.step(),
        Err(Error::ConstraintDimensionMismatch {
            expected: 0,
            got: 1
        })
    ));
}

#[test]
fn constrained_run_prefers_feasible_members() {
    let outcome = Driver::builder()
        .pop_size(24)
        .max_generations(20)
        .seed(11)
        .truncation(Truncation::CrowdingDistance)
        .build(BinhKorn::new(), Genetic::new())
        .unwrap()
        .run()
        .unwrap();
    assert!(outcome.optimum.iter().all(Candidate::is_feasible));
}

#[test]
fn three_objective_run() {
    let mut driver = Driver::builder()
        .pop_size(30)
        .max_generations(10)
        .seed(12)
        .build(Dtlz2::new(7, 3), DifferentialEvolution::new())
        .unwrap();
    let outcome = driver.run().unwrap();
    assert_eq!(outcome.generations, 10);
    assert_eq!(outcome.n_evaluations, 30 * 11);
    for c in &outcome.optimum {
        assert_eq!(c.objectives().len(), 3);
    }
}

#[test]
fn boxed_operators_share_a_driver_type() {
    let operators: Vec<Box<dyn Variation>> = vec![
        Box::new(ParticleSwarm::new()),
        Box::new(DifferentialEvolution::new()),
        Box::new(Genetic::new()),
    ];
    let mut log = RunLog::new();
    for op in operators {
        let mut driver = Driver::builder()
            .pop_size(8)
            .max_generations(4)
            .seed(13)
            .build(line_problem(), op)
            .unwrap();
        driver.run().unwrap();
        log.push(driver.record());
    }
    let names: Vec<&str> = log.iter().map(|r| r.algorithm_name.as_str()).collect();
    assert_eq!(names, vec!["MOPSO", "DE", "GA"]);
}
