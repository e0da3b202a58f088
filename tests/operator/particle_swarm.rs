use moea::operator::{ParticleSwarm, Variation};
use moea::prelude::*;

use crate::{drive_raw, zdt1_g};
use crate::test_problems::Zdt1;

#[test]
fn personal_bests_track_population_size() {
    let problem = Zdt1::new(4);
    let mut pso = ParticleSwarm::new();
    drive_raw(&problem, &mut pso, 15, 5, 1);
    assert_eq!(pso.personal_bests().len(), 15);
    assert_eq!(pso.velocities().len(), 15);
}

#[test]
fn global_best_is_a_non_dominated_personal_best() {
    let problem = Zdt1::new(4);
    let mut pso = ParticleSwarm::new();
    drive_raw(&problem, &mut pso, 12, 3, 2);

    let mut rng = fastrand::Rng::with_seed(3);
    let pop = Population::random(&problem, 12, &mut rng).unwrap();
    let _ = pso.offspring(&pop, problem.bounds(), &mut rng);

    let gbest = pso.global_best().unwrap();
    let bests = pso.personal_bests();
    assert!(bests.iter().any(|b| b == gbest));
    assert!(bests.iter().all(|b| !b.dominates(gbest)));
}

#[test]
fn members_never_dominate_their_own_personal_best() {
    let mut driver = Driver::builder()
        .pop_size(20)
        .max_generations(30)
        .seed(8)
        .build(Zdt1::new(6), ParticleSwarm::new())
        .unwrap();
    driver.initialize().unwrap();

    while driver.state() != DriverState::Terminated {
        driver.step().unwrap();
        let bests = driver.variation().personal_bests();
        assert_eq!(bests.len(), driver.population().len());
        let misaligned = driver
            .population()
            .iter()
            .zip(bests)
            .filter(|(member, best)| member.dominates(best))
            .count();
        assert_eq!(misaligned, 0, "generation {}", driver.generation());
    }
}

#[test]
fn members_track_personal_best_with_duplicate_elimination() {
    let mut driver = Driver::builder()
        .pop_size(12)
        .max_generations(15)
        .seed(9)
        .eliminate_duplicates(true)
        .truncation(Truncation::CrowdingDistance)
        .build(Zdt1::new(3), ParticleSwarm::new())
        .unwrap();

    while driver.state() != DriverState::Terminated {
        driver.step().unwrap();
        let bests = driver.variation().personal_bests();
        for (member, best) in driver.population().iter().zip(bests) {
            assert!(!member.dominates(best));
        }
    }
}

#[test]
fn zero_coefficients_freeze_particles() {
    let problem = Zdt1::new(3);
    let mut rng = fastrand::Rng::with_seed(4);
    let pop = Population::random(&problem, 6, &mut rng).unwrap();
    let mut pso = ParticleSwarm::builder()
        .inertia(0.0)
        .cognitive(0.0)
        .social(0.0)
        .build();
    pso.initialize(&pop, &mut rng);
    let xs = pso.offspring(&pop, problem.bounds(), &mut rng);
    assert_eq!(xs, pop.decision_matrix());
}

#[test]
fn swarm_converges_toward_front() {
    let outcome = Driver::builder()
        .pop_size(30)
        .max_generations(60)
        .seed(5)
        .build(Zdt1::new(5), ParticleSwarm::new())
        .unwrap()
        .run()
        .unwrap();
    // A uniform random start sits near g = 5.5.
    let best_g = outcome
        .population
        .iter()
        .map(|c| zdt1_g(c.x()))
        .fold(f64::INFINITY, f64::min);
    assert!(best_g < 4.0, "swarm did not improve: g = {best_g}");
}
