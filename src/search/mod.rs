//! # Search strategies
//!
//! The `SearchStrategy` trait is the uniform contract of the three population
//! metaheuristics. Every strategy consumes an objective, the search box, the
//! shared `SearchOptions` and an owned random number generator, and produces a
//! `SearchResult`: the best point, its value, the per-iteration convergence
//! history and a sampled log of full-population positions.
//!
//! ```rust
//! use swarmalg::bounds::Bounds;
//! use swarmalg::objective::ObjectiveFunction;
//! use swarmalg::rng::RandomNumberGenerator;
//! use swarmalg::search::{BeeColony, SearchOptions, SearchStrategy};
//!
//! let strategy = BeeColony::new(20).unwrap();
//! let options = SearchOptions::new(10, 2, 30);
//! let mut rng = RandomNumberGenerator::from_seed(1);
//!
//! let result = strategy
//!     .search(&ObjectiveFunction::Sphere, ObjectiveFunction::Sphere.bounds(), &options, &mut rng)
//!     .unwrap();
//!
//! assert_eq!(result.history.len(), 30);
//! assert_eq!(*result.history.last().unwrap(), result.best_value);
//! ```

pub mod bat;
pub mod bee_colony;
pub mod genetic;
pub mod launcher;
pub mod options;

use std::fmt::Debug;

use crate::bounds::Bounds;
use crate::error::{EvaluationStage, OptimizationError, Result};
use crate::objective::Objective;
use crate::rng::RandomNumberGenerator;

pub use bat::BatSearch;
pub use bee_colony::BeeColony;
pub use genetic::{CrossoverType, GeneticSearch, MutationType};
pub use options::{SearchOptions, SearchOptionsBuilder};

/// A coordinate vector, one real number per dimension.
pub type Point = Vec<f64>;

/// Population snapshots, one entry per sampled iteration.
pub type PositionLog = Vec<Vec<Point>>;

/// The outcome of a search run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// The best point found over the whole run.
    pub best: Point,
    /// The objective value at `best`.
    pub best_value: f64,
    /// Best value found up to and including each iteration.
    pub history: Vec<f64>,
    /// Sampled population positions.
    pub positions_log: PositionLog,
}

/// A population-based search procedure.
pub trait SearchStrategy: Debug + Send + Sync {
    /// Short identifier of the strategy, e.g. `"abc"`.
    fn name(&self) -> &'static str;

    /// Minimizes `objective` inside `bounds`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for invalid `options` before any iteration
    /// runs, and `NonFiniteFitness` if the objective produces NaN or infinity.
    fn search(
        &self,
        objective: &dyn Objective,
        bounds: Bounds,
        options: &SearchOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<SearchResult>;
}

/// The best point seen so far. Only strictly better offers replace it, so the
/// recorded value never increases.
#[derive(Debug, Clone, PartialEq)]
pub struct Incumbent {
    pub point: Point,
    pub value: f64,
}

impl Incumbent {
    pub fn new(point: Point, value: f64) -> Self {
        Self { point, value }
    }

    /// The best of `(point, value)` pairs, first wins ties.
    pub(crate) fn best_of<'a, I>(candidates: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a Point, f64)>,
    {
        candidates
            .into_iter()
            .fold(None::<Incumbent>, |best, (point, value)| match best {
                Some(b) if b.value <= value => Some(b),
                _ => Some(Incumbent::new(point.clone(), value)),
            })
            .ok_or(OptimizationError::EmptyPopulation)
    }

    /// Replaces the incumbent if `value` is strictly better.
    pub fn offer(&mut self, point: &[f64], value: f64) -> bool {
        if value < self.value {
            self.point.clear();
            self.point.extend_from_slice(point);
            self.value = value;
            true
        } else {
            false
        }
    }
}

/// Evaluates `point`, rejecting non-finite values.
pub(crate) fn evaluate(
    objective: &dyn Objective,
    point: &[f64],
    stage: EvaluationStage,
) -> Result<f64> {
    let value = objective.evaluate(point);
    if value.is_finite() {
        Ok(value)
    } else {
        tracing::warn!(%stage, ?point, value, "objective returned a non-finite value");
        Err(OptimizationError::NonFiniteFitness {
            stage,
            point: point.to_vec(),
            value,
        })
    }
}
