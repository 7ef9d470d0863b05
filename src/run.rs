//! # Run orchestration
//!
//! Everything a caller needs to go from named parameters to a finished run:
//! the registry of algorithms, their tagged parameter sets, the request and
//! the report, and the statistics of the final population.
//!
//! ```rust
//! use swarmalg::run::{run, Algorithm, RunRequest};
//!
//! let params = Algorithm::Bat.default_params();
//! let mut request = RunRequest::new(params, "rastrigin");
//! request.iterations = 20;
//! request.seed = Some(3);
//!
//! let report = run(&request).unwrap();
//! assert_eq!(report.history.len(), 20);
//! assert_eq!(report.background, "/static/background_rastrigin.png");
//! assert!(report.stats.worst_value >= report.best_value);
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use tracing::{info, info_span};

use crate::bounds::Bounds;
use crate::error::{OptimizationError, OptionExt, Result};
use crate::objective::{Heatmap, Objective, ObjectiveFunction};
use crate::rng::RandomNumberGenerator;
use crate::search::{
    BatSearch, BeeColony, GeneticSearch, Point, PositionLog, SearchOptions, SearchResult,
    SearchStrategy,
};

/// Grid resolution of the background heatmap.
pub const BACKGROUND_RESOLUTION: usize = 400;

/// The registered search algorithms.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Abc,
    Bat,
    Ga,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Abc, Algorithm::Bat, Algorithm::Ga];

    pub fn key(&self) -> &'static str {
        match self {
            Algorithm::Abc => "abc",
            Algorithm::Bat => "bat",
            Algorithm::Ga => "ga",
        }
    }

    /// The parameters a fresh form starts with.
    pub fn default_params(&self) -> AlgorithmParams {
        match self {
            Algorithm::Abc => AlgorithmParams::Abc { limit: 40 },
            Algorithm::Bat => AlgorithmParams::Bat {
                alpha: 0.9,
                gamma: 0.9,
                fmin: 0.0,
                fmax: 2.0,
            },
            Algorithm::Ga => AlgorithmParams::Ga {
                crossover_rate: 0.8,
                mutation_rate: 0.1,
                mutation_scale: 0.1,
                elitism_rate: 0.1,
                tournament_size: 3,
                crossover_type: "arithmetic".to_string(),
                mutation_type: "gaussian".to_string(),
            },
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Algorithm {
    type Err = OptimizationError;

    fn from_str(s: &str) -> Result<Self> {
        Algorithm::ALL
            .iter()
            .find(|a| a.key() == s)
            .copied()
            .ok_or_else(|| OptimizationError::UnknownAlgorithm(s.to_string()))
    }
}

/// Algorithm-specific tuning parameters, tagged by algorithm key.
///
/// Variant names of the genetic operators are kept as strings so that an
/// unknown name is reported by `build_strategy` as `UnsupportedVariant`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "algorithm", rename_all = "lowercase"))]
#[derive(Debug, Clone, PartialEq)]
pub enum AlgorithmParams {
    Abc {
        limit: usize,
    },
    Bat {
        alpha: f64,
        gamma: f64,
        fmin: f64,
        fmax: f64,
    },
    Ga {
        crossover_rate: f64,
        mutation_rate: f64,
        mutation_scale: f64,
        elitism_rate: f64,
        tournament_size: usize,
        crossover_type: String,
        mutation_type: String,
    },
}

impl AlgorithmParams {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            AlgorithmParams::Abc { .. } => Algorithm::Abc,
            AlgorithmParams::Bat { .. } => Algorithm::Bat,
            AlgorithmParams::Ga { .. } => Algorithm::Ga,
        }
    }
}

/// Builds the strategy described by `params`, validating every parameter.
///
/// # Errors
///
/// Returns a configuration error for out-of-range values and
/// `UnsupportedVariant` for unknown crossover or mutation names.
pub fn build_strategy(params: &AlgorithmParams) -> Result<Box<dyn SearchStrategy>> {
    let strategy: Box<dyn SearchStrategy> = match params {
        AlgorithmParams::Abc { limit } => Box::new(BeeColony::new(*limit)?),
        AlgorithmParams::Bat {
            alpha,
            gamma,
            fmin,
            fmax,
        } => Box::new(BatSearch::new(*alpha, *gamma, *fmin, *fmax)?),
        AlgorithmParams::Ga {
            crossover_rate,
            mutation_rate,
            mutation_scale,
            elitism_rate,
            tournament_size,
            crossover_type,
            mutation_type,
        } => Box::new(
            GeneticSearch::builder()
                .crossover_rate(*crossover_rate)
                .mutation_rate(*mutation_rate)
                .mutation_scale(*mutation_scale)
                .elitism_rate(*elitism_rate)
                .tournament_size(*tournament_size)
                .crossover_name(crossover_type)?
                .mutation_name(mutation_type)?
                .build()?,
        ),
    };
    Ok(strategy)
}

/// One optimization request as received from a caller.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RunRequest {
    pub params: AlgorithmParams,
    /// Catalog key of the objective, e.g. `"sphere"`.
    pub objective: String,
    pub iterations: usize,
    pub dimensions: usize,
    pub agents: usize,
    /// Seeds the run's generator; `None` draws from entropy.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: Option<u64>,
    #[cfg_attr(feature = "serde", serde(default = "default_save_every"))]
    pub save_every: Option<usize>,
}

#[cfg(feature = "serde")]
fn default_save_every() -> Option<usize> {
    Some(1)
}

impl RunRequest {
    /// A request with 50 iterations, 2 dimensions, 20 agents, no seed and a
    /// snapshot every iteration.
    pub fn new(params: AlgorithmParams, objective: impl Into<String>) -> Self {
        Self {
            params,
            objective: objective.into(),
            iterations: 50,
            dimensions: 2,
            agents: 20,
            seed: None,
            save_every: Some(1),
        }
    }

    /// Checks the shared sizes, reporting every problem at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        if self.iterations < 1 {
            errors.push("iterations must be at least 1.");
        }
        if self.dimensions < 1 {
            errors.push("dimensions must be at least 1.");
        }
        if self.agents < 1 {
            errors.push("agents must be at least 1.");
        }
        if self.save_every == Some(0) {
            errors.push("save_every must be at least 1.");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(OptimizationError::Configuration(errors.join(" ")))
        }
    }

    pub fn search_options(&self) -> SearchOptions {
        let mut options = SearchOptions::new(self.agents, self.dimensions, self.iterations);
        options.set_save_every(self.save_every);
        options
    }
}

/// Summary statistics of the final population.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationStats {
    /// Best value of the whole run.
    pub best_value: f64,
    pub worst_value: f64,
    pub mean_value: f64,
    /// Population variance (divides by the population size).
    pub variance: f64,
    /// Mean Euclidean distance of the individuals to the best point.
    pub mean_distance_to_best: f64,
    /// Wall-clock seconds of the whole run.
    pub execution_time: f64,
}

impl PopulationStats {
    /// Statistics of the last snapshot in `result`, or of the best point alone
    /// when no snapshot was taken. `execution_time` is left at zero.
    pub fn from_population(objective: &dyn Objective, result: &SearchResult) -> Result<Self> {
        let fallback;
        let population: &[Point] = match result.positions_log.last() {
            Some(snapshot) => snapshot,
            None => {
                fallback = vec![result.best.clone()];
                &fallback
            }
        };

        let values: Vec<f64> = population.iter().map(|p| objective.evaluate(p)).collect();
        let worst_value = values
            .iter()
            .copied()
            .reduce(f64::max)
            .ok_or_else_optim(|| OptimizationError::EmptyPopulation)?;

        let n = values.len() as f64;
        let mean_value = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean_value).powi(2)).sum::<f64>() / n;
        let mean_distance_to_best = population
            .iter()
            .map(|p| distance(p, &result.best))
            .sum::<f64>()
            / n;

        Ok(Self {
            best_value: result.best_value,
            worst_value,
            mean_value,
            variance,
            mean_distance_to_best,
            execution_time: 0.0,
        })
    }
}

fn distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// The outcome of `run`, shaped like the response of the web layer.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub best: Point,
    pub best_value: f64,
    pub history: Vec<f64>,
    pub positions: PositionLog,
    pub objective: String,
    pub dimensions: usize,
    /// Public path of the objective's background image.
    pub background: String,
    pub bounds: Bounds,
    pub stats: PopulationStats,
}

/// Runs one request end to end.
///
/// # Errors
///
/// Configuration, unknown algorithm/objective and unsupported variant errors
/// are returned before the search starts; `NonFiniteFitness` aborts the run.
pub fn run(request: &RunRequest) -> Result<RunReport> {
    let start = Instant::now();

    request.validate()?;
    let objective: ObjectiveFunction = request.objective.parse()?;
    let strategy = build_strategy(&request.params)?;
    let bounds = objective.bounds();
    let options = request.search_options();
    let mut rng = match request.seed {
        Some(seed) => RandomNumberGenerator::from_seed(seed),
        None => RandomNumberGenerator::new(),
    };

    let span = info_span!("run", algorithm = strategy.name(), objective = objective.key());
    let _guard = span.enter();

    let result = strategy.search(&objective, bounds, &options, &mut rng)?;
    let mut stats = PopulationStats::from_population(&objective, &result)?;
    stats.execution_time = start.elapsed().as_secs_f64();

    info!(
        best_value = result.best_value,
        execution_time = stats.execution_time,
        "run finished"
    );

    let SearchResult {
        best,
        best_value,
        history,
        positions_log,
    } = result;

    Ok(RunReport {
        best,
        best_value,
        history,
        positions: positions_log,
        objective: objective.key().to_string(),
        dimensions: request.dimensions,
        background: format!("/static/{}", objective.background_file_name()),
        bounds,
        stats,
    })
}

/// The background heatmap of `objective` at `BACKGROUND_RESOLUTION`.
pub fn background(objective: ObjectiveFunction) -> Result<Heatmap> {
    objective.heatmap(BACKGROUND_RESOLUTION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_registry() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.key().parse::<Algorithm>().unwrap(), algorithm);
            assert_eq!(algorithm.default_params().algorithm(), algorithm);
            let strategy = build_strategy(&algorithm.default_params()).unwrap();
            assert_eq!(strategy.name(), algorithm.key());
        }
        assert!(matches!(
            "pso".parse::<Algorithm>(),
            Err(OptimizationError::UnknownAlgorithm(name)) if name == "pso"
        ));
    }

    #[test]
    fn test_build_strategy_rejects_bad_params() {
        assert!(build_strategy(&AlgorithmParams::Abc { limit: 0 }).is_err());
        assert!(build_strategy(&AlgorithmParams::Bat {
            alpha: 0.9,
            gamma: 0.9,
            fmin: 2.0,
            fmax: 2.0,
        })
        .is_err());

        let mut params = Algorithm::Ga.default_params();
        if let AlgorithmParams::Ga { crossover_type, .. } = &mut params {
            *crossover_type = "three_point".to_string();
        }
        assert!(matches!(
            build_strategy(&params),
            Err(OptimizationError::UnsupportedVariant { kind: "crossover", .. })
        ));
    }

    #[test]
    fn test_validate_collects_every_problem() {
        let mut request = RunRequest::new(Algorithm::Abc.default_params(), "sphere");
        request.iterations = 0;
        request.agents = 0;
        match request.validate() {
            Err(OptimizationError::Configuration(msg)) => {
                assert!(msg.contains("iterations"));
                assert!(msg.contains("agents"));
                assert!(!msg.contains("dimensions"));
            }
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_stats_from_population() {
        let result = SearchResult {
            best: vec![0.0, 0.0],
            best_value: 0.0,
            history: vec![0.0],
            positions_log: vec![vec![vec![0.0, 0.0], vec![3.0, 4.0]]],
        };
        let stats = PopulationStats::from_population(&ObjectiveFunction::Sphere, &result).unwrap();

        assert_eq!(stats.best_value, 0.0);
        assert_eq!(stats.worst_value, 25.0);
        assert_eq!(stats.mean_value, 12.5);
        assert_eq!(stats.variance, 156.25);
        assert_eq!(stats.mean_distance_to_best, 2.5);
    }

    #[test]
    fn test_stats_fall_back_to_best_point() {
        let result = SearchResult {
            best: vec![1.0, 1.0],
            best_value: 2.0,
            history: vec![2.0],
            positions_log: Vec::new(),
        };
        let stats = PopulationStats::from_population(&ObjectiveFunction::Sphere, &result).unwrap();

        assert_eq!(stats.worst_value, 2.0);
        assert_eq!(stats.mean_value, 2.0);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.mean_distance_to_best, 0.0);
    }

    #[test]
    fn test_unknown_objective_fails_before_search() {
        let request = RunRequest::new(Algorithm::Ga.default_params(), "himmelblau");
        assert!(matches!(
            run(&request),
            Err(OptimizationError::UnknownObjective(_))
        ));
    }
}
