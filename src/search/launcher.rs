//! The iteration loop shared by every strategy.
//!
//! A strategy only describes how its population is initialized and how one
//! iteration updates it (the `Swarm` trait). `launch` validates the options,
//! drives the iterations in order, records the convergence history and takes
//! population snapshots.

use tracing::{debug, info, info_span};

use super::{Incumbent, Point, PositionLog, SearchOptions, SearchResult};
use crate::error::Result;
use crate::rng::RandomNumberGenerator;

/// The per-run state of a population-based strategy.
pub(crate) trait Swarm {
    /// Advances the population by one iteration.
    fn step(&mut self, iteration: usize, rng: &mut RandomNumberGenerator) -> Result<()>;

    /// Copies of the current positions, in individual order.
    fn positions(&self) -> Vec<Point>;

    /// The best point seen since initialization.
    fn incumbent(&self) -> &Incumbent;
}

/// Runs a search to completion.
///
/// `init` is called only after the options are validated, so invalid
/// configuration never evaluates the objective.
pub(crate) fn launch<S, F>(
    name: &'static str,
    options: &SearchOptions,
    rng: &mut RandomNumberGenerator,
    init: F,
) -> Result<SearchResult>
where
    S: Swarm,
    F: FnOnce(&mut RandomNumberGenerator) -> Result<S>,
{
    options.validate()?;

    let span = info_span!(
        "search",
        strategy = name,
        population = options.get_population_size(),
        dimensions = options.get_dimensions(),
        iterations = options.get_max_iterations()
    );
    let _guard = span.enter();

    let mut swarm = init(rng)?;
    let mut history = Vec::with_capacity(options.get_max_iterations());
    let mut positions_log: PositionLog = Vec::new();

    for iteration in 0..options.get_max_iterations() {
        swarm.step(iteration, rng)?;

        let best_value = swarm.incumbent().value;
        history.push(best_value);

        if options.snapshot_due(iteration) {
            positions_log.push(swarm.positions());
        }

        debug!(iteration, best_value, "iteration complete");
    }

    let Incumbent { point, value } = swarm.incumbent().clone();
    info!(best_value = value, snapshots = positions_log.len(), "search finished");

    Ok(SearchResult {
        best: point,
        best_value: value,
        history,
        positions_log,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OptimizationError;

    /// A one-individual swarm that halves its position each step.
    struct Halving {
        position: Point,
        best: Incumbent,
        steps: usize,
    }

    impl Swarm for Halving {
        fn step(&mut self, _iteration: usize, _rng: &mut RandomNumberGenerator) -> Result<()> {
            self.position.iter_mut().for_each(|x| *x /= 2.0);
            let value = self.position.iter().map(|x| x * x).sum();
            self.best.offer(&self.position, value);
            self.steps += 1;
            Ok(())
        }

        fn positions(&self) -> Vec<Point> {
            vec![self.position.clone()]
        }

        fn incumbent(&self) -> &Incumbent {
            &self.best
        }
    }

    fn halving(_rng: &mut RandomNumberGenerator) -> Result<Halving> {
        Ok(Halving {
            position: vec![4.0],
            best: Incumbent::new(vec![4.0], 16.0),
            steps: 0,
        })
    }

    #[test]
    fn test_history_and_snapshots() {
        let options = SearchOptions::builder()
            .population_size(1)
            .dimensions(1)
            .max_iterations(5)
            .save_every(2)
            .build();
        let mut rng = RandomNumberGenerator::from_seed(0);

        let result = launch("halving", &options, &mut rng, halving).unwrap();

        assert_eq!(result.history, vec![4.0, 1.0, 0.25, 0.0625, 0.015625]);
        assert_eq!(result.best, vec![0.125]);
        assert_eq!(result.best_value, 0.015625);
        // iterations 0, 2 and 4 (the last one is not logged twice)
        assert_eq!(
            result.positions_log,
            vec![vec![vec![2.0]], vec![vec![0.5]], vec![vec![0.125]]]
        );
    }

    #[test]
    fn test_invalid_options_skip_initialization() {
        let options = SearchOptions::new(0, 1, 5);
        let mut rng = RandomNumberGenerator::from_seed(0);
        let mut initialized = false;

        let result = launch("halving", &options, &mut rng, |rng| {
            initialized = true;
            halving(rng)
        });

        assert!(matches!(result, Err(OptimizationError::Configuration(_))));
        assert!(!initialized);
    }

    #[test]
    fn test_empty_log_when_disabled() {
        let options = SearchOptions::builder()
            .population_size(1)
            .dimensions(1)
            .max_iterations(3)
            .no_snapshots()
            .build();
        let mut rng = RandomNumberGenerator::from_seed(0);

        let result = launch("halving", &options, &mut rng, halving).unwrap();
        assert!(result.positions_log.is_empty());
        assert_eq!(result.history.len(), 3);
    }
}
