use std::sync::atomic::{AtomicUsize, Ordering};

use swarmalg::{
    bounds::Bounds,
    error::{EvaluationStage, OptimizationError},
    objective::ObjectiveFunction,
    rng::RandomNumberGenerator,
    search::{BatSearch, SearchOptions, SearchStrategy},
};

fn default_bat() -> BatSearch {
    BatSearch::new(0.9, 0.9, 0.0, 2.0).unwrap()
}

#[test]
fn test_bat_finds_sphere_minimum() {
    let objective = ObjectiveFunction::Sphere;
    let options = SearchOptions::new(20, 2, 50);
    let strategy = default_bat();

    for seed in 0..50 {
        let mut rng = RandomNumberGenerator::from_seed(seed);
        let result = strategy
            .search(&objective, objective.bounds(), &options, &mut rng)
            .unwrap();

        assert_eq!(result.history.len(), 50);
        assert!(result.history.windows(2).all(|w| w[1] <= w[0]));
        assert_eq!(*result.history.last().unwrap(), result.best_value);
        assert!(result.best_value < 1e-2, "seed {}: {}", seed, result.best_value);
    }
}

#[test]
fn test_bat_contract_on_small_shapes() {
    let strategy = default_bat();
    let mut rng = RandomNumberGenerator::from_seed(8);

    for objective in ObjectiveFunction::ALL {
        let bounds = objective.bounds();
        for (n, d, t) in [(1, 1, 1), (1, 2, 4), (3, 1, 5), (5, 5, 8)] {
            let options = SearchOptions::new(n, d, t);
            let result = strategy.search(&objective, bounds, &options, &mut rng).unwrap();

            assert_eq!(result.history.len(), t);
            assert!(result.history.windows(2).all(|w| w[1] <= w[0]));
            assert_eq!(*result.history.last().unwrap(), result.best_value);
            assert!(bounds.contains_point(&result.best));
            assert_eq!(result.positions_log.len(), t);
            assert!(result
                .positions_log
                .iter()
                .flatten()
                .all(|p| bounds.contains_point(p)));
        }
    }
}

#[test]
fn test_bat_with_wide_frequency_range_stays_in_box() {
    let strategy = BatSearch::new(1.0, 0.1, 0.0, 50.0).unwrap();
    let objective = ObjectiveFunction::Schwefel;
    let bounds = objective.bounds();
    let options = SearchOptions::new(12, 3, 25);
    let mut rng = RandomNumberGenerator::from_seed(17);

    let result = strategy.search(&objective, bounds, &options, &mut rng).unwrap();
    assert!(result
        .positions_log
        .iter()
        .flatten()
        .all(|p| bounds.contains_point(p)));
}

#[test]
fn test_bat_snapshot_cadence() {
    let objective = ObjectiveFunction::Zakharov;
    let options = SearchOptions::builder()
        .population_size(4)
        .dimensions(2)
        .max_iterations(10)
        .save_every(4)
        .save_phase(1)
        .build();
    let mut rng = RandomNumberGenerator::from_seed(1);

    let result = default_bat()
        .search(&objective, objective.bounds(), &options, &mut rng)
        .unwrap();

    // iterations 1, 5 and 9 (the last)
    assert_eq!(result.positions_log.len(), 3);
}

#[test]
fn test_bat_is_reproducible() {
    let objective = ObjectiveFunction::Griewank;
    let options = SearchOptions::new(8, 4, 12);
    let strategy = default_bat();
    let rng = || RandomNumberGenerator::from_seed(77);

    let first = strategy
        .search(&objective, objective.bounds(), &options, &mut rng())
        .unwrap();
    let second = strategy
        .search(&objective, objective.bounds(), &options, &mut rng())
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_bat_aborts_on_nan_mid_run() {
    let calls = AtomicUsize::new(0);
    let objective = |x: &[f64]| {
        if calls.fetch_add(1, Ordering::Relaxed) >= 30 {
            f64::NAN
        } else {
            x.iter().map(|v| v * v).sum()
        }
    };
    let bounds = Bounds::new(-3.0, 3.0).unwrap();
    let options = SearchOptions::new(10, 2, 20);
    let mut rng = RandomNumberGenerator::from_seed(2);

    match default_bat().search(&objective, bounds, &options, &mut rng) {
        Err(OptimizationError::NonFiniteFitness { stage, point, value }) => {
            // 10 evaluations at initialization, 10 per iteration
            assert_eq!(stage, EvaluationStage::Iteration(2));
            assert_eq!(point.len(), 2);
            assert!(value.is_nan());
        }
        other => panic!("expected NonFiniteFitness, got {:?}", other),
    }
}

#[test]
fn test_bat_pulse_growth_toward_one_keeps_contract() {
    let objective = ObjectiveFunction::Rastrigin;
    let bounds = objective.bounds();
    let options = SearchOptions::new(15, 3, 40);
    let strategy = default_bat().with_max_pulse_rate(1.0).unwrap();
    assert!(default_bat().with_max_pulse_rate(1.5).is_err());

    for seed in 0..10 {
        let mut rng = RandomNumberGenerator::from_seed(seed);
        let result = strategy.search(&objective, bounds, &options, &mut rng).unwrap();

        assert_eq!(result.history.len(), 40);
        assert!(result.history.windows(2).all(|w| w[1] <= w[0]));
        assert!(bounds.contains_point(&result.best));
        for snapshot in &result.positions_log {
            assert!(snapshot.iter().all(|p| bounds.contains_point(p)));
        }
    }
}
