//! # Artificial bee colony
//!
//! The colony keeps one food source (a point) per individual together with a
//! trial counter. Each iteration runs three phases over the same source buffer:
//!
//! 1. employed bees try to improve every source once,
//! 2. onlooker bees pick sources by roulette over their quality and try again,
//! 3. scouts abandon every source whose counter reached `limit` and replace it
//!    with a fresh random point.
//!
//! A trial moves one randomly chosen coordinate relative to another random
//! source, `v_j = x_j + φ (x_j - x_kj)` with `φ ~ U(-1, 1)`, and is accepted
//! only if it improves the source.

use tracing::trace;

use super::launcher::{launch, Swarm};
use super::{evaluate, Incumbent, Point, SearchOptions, SearchResult, SearchStrategy};
use crate::bounds::Bounds;
use crate::error::{EvaluationStage, OptimizationError, Result};
use crate::objective::Objective;
use crate::rng::RandomNumberGenerator;
use crate::selection::{RouletteWheelSelection, SelectionStrategy};

/// Bee colony search with abandonment after `limit` failed trials.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone)]
pub struct BeeColony {
    limit: usize,
}

impl BeeColony {
    /// Creates a bee colony search.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `limit` is 0.
    pub fn new(limit: usize) -> Result<Self> {
        if limit < 1 {
            return Err(OptimizationError::Configuration(
                "Abandonment limit must be at least 1".to_string(),
            ));
        }
        Ok(Self { limit })
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl SearchStrategy for BeeColony {
    fn name(&self) -> &'static str {
        "abc"
    }

    fn search(
        &self,
        objective: &dyn Objective,
        bounds: Bounds,
        options: &SearchOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<SearchResult> {
        launch(self.name(), options, rng, |rng| {
            Hive::new(objective, bounds, options, self.limit, rng)
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct FoodSource {
    pub(crate) position: Point,
    pub(crate) value: f64,
    pub(crate) trials: usize,
    /// How many times this slot has been abandoned by a scout.
    pub(crate) abandoned: usize,
}

pub(crate) struct Hive<'a> {
    objective: &'a dyn Objective,
    bounds: Bounds,
    limit: usize,
    pub(crate) sources: Vec<FoodSource>,
    best: Incumbent,
    roulette: RouletteWheelSelection,
}

impl<'a> Hive<'a> {
    pub(crate) fn new(
        objective: &'a dyn Objective,
        bounds: Bounds,
        options: &SearchOptions,
        limit: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Self> {
        let sources = (0..options.get_population_size())
            .map(|_| {
                let position = bounds.random_point(options.get_dimensions(), rng);
                let value = evaluate(objective, &position, EvaluationStage::Initialization)?;
                Ok(FoodSource {
                    position,
                    value,
                    trials: 0,
                    abandoned: 0,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let best = Incumbent::best_of(sources.iter().map(|s| (&s.position, s.value)))?;

        Ok(Self {
            objective,
            bounds,
            limit,
            sources,
            best,
            roulette: RouletteWheelSelection::new(),
        })
    }

    /// One trial on source `i`: greedy acceptance, otherwise the counter grows
    /// up to `limit`.
    fn explore(
        &mut self,
        i: usize,
        iteration: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<()> {
        let n = self.sources.len();
        let dim = self.sources[i].position.len();

        let j = rng.index(dim);
        let k = if n > 1 {
            let k = rng.index(n - 1);
            if k >= i {
                k + 1
            } else {
                k
            }
        } else {
            i
        };
        let phi = rng.uniform(-1.0, 1.0);

        let mut candidate = self.sources[i].position.clone();
        candidate[j] += phi * (candidate[j] - self.sources[k].position[j]);
        candidate[j] = self.bounds.clamp(candidate[j]);

        let value = evaluate(self.objective, &candidate, EvaluationStage::Iteration(iteration))?;

        let source = &mut self.sources[i];
        if value < source.value {
            self.best.offer(&candidate, value);
            source.position = candidate;
            source.value = value;
            source.trials = 0;
        } else {
            source.trials = (source.trials + 1).min(self.limit);
        }
        Ok(())
    }

    fn employed_phase(&mut self, iteration: usize, rng: &mut RandomNumberGenerator) -> Result<()> {
        for i in 0..self.sources.len() {
            self.explore(i, iteration, rng)?;
        }
        Ok(())
    }

    fn onlooker_phase(&mut self, iteration: usize, rng: &mut RandomNumberGenerator) -> Result<()> {
        let values: Vec<f64> = self.sources.iter().map(|s| s.value).collect();
        let chosen = self.roulette.select(&values, self.sources.len(), rng)?;
        for i in chosen {
            self.explore(i, iteration, rng)?;
        }
        Ok(())
    }

    fn scout_phase(&mut self, iteration: usize, rng: &mut RandomNumberGenerator) -> Result<()> {
        for (i, source) in self.sources.iter_mut().enumerate() {
            if source.trials < self.limit {
                continue;
            }
            let position = self.bounds.random_point(source.position.len(), rng);
            let value = evaluate(self.objective, &position, EvaluationStage::Iteration(iteration))?;
            trace!(
                iteration,
                source = i,
                stale_value = source.value,
                value,
                "scout abandoned source"
            );

            self.best.offer(&position, value);
            source.position = position;
            source.value = value;
            source.trials = 0;
            source.abandoned += 1;
        }
        Ok(())
    }
}

impl Swarm for Hive<'_> {
    fn step(&mut self, iteration: usize, rng: &mut RandomNumberGenerator) -> Result<()> {
        self.employed_phase(iteration, rng)?;
        self.onlooker_phase(iteration, rng)?;
        self.scout_phase(iteration, rng)
    }

    fn positions(&self) -> Vec<Point> {
        self.sources.iter().map(|s| s.position.clone()).collect()
    }

    fn incumbent(&self) -> &Incumbent {
        &self.best
    }
}
