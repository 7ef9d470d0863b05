//! # Genetic search
//!
//! A generational real-coded genetic algorithm. Each generation keeps the
//! `ceil(elitism_rate · N)` best individuals unchanged and fills the rest by
//! tournament selection, optional crossover and optional mutation, repairing
//! every child into the box. The population size is preserved exactly.
//!
//! Gaussian mutation is measured in box widths and annealed over the run: at
//! generation `t` of `T` its standard deviation is
//! `mutation_scale · (max - min) · 0.01^(t / T)`, so early generations explore
//! the whole box and late ones refine around the elites.
//!
//! ## Example
//!
//! ```rust
//! use swarmalg::search::{CrossoverType, GeneticSearch, MutationType};
//!
//! let ga = GeneticSearch::builder()
//!     .crossover_rate(0.8)
//!     .mutation_rate(0.1)
//!     .mutation_scale(0.1)
//!     .elitism_rate(0.1)
//!     .tournament_size(3)
//!     .crossover_type(CrossoverType::SinglePoint)
//!     .mutation_type(MutationType::Uniform)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(ga.elite_count(20), 2);
//! ```

pub mod crossover;
pub mod mutation;

use super::launcher::{launch, Swarm};
use super::{evaluate, Incumbent, Point, SearchOptions, SearchResult, SearchStrategy};
use crate::bounds::Bounds;
use crate::error::{EvaluationStage, OptimizationError, Result};
use crate::objective::Objective;
use crate::rng::RandomNumberGenerator;
use crate::selection::{ElitistSelection, SelectionStrategy, TournamentSelection};

pub use crossover::CrossoverType;
pub use mutation::MutationType;

/// Genetic search parameters. Build with `GeneticSearch::builder()`.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone)]
pub struct GeneticSearch {
    crossover_rate: f64,
    mutation_rate: f64,
    mutation_scale: f64,
    elitism_rate: f64,
    tournament: TournamentSelection,
    crossover_type: CrossoverType,
    mutation_type: MutationType,
}

impl GeneticSearch {
    pub fn builder() -> GeneticSearchBuilder {
        GeneticSearchBuilder::default()
    }

    pub fn crossover_rate(&self) -> f64 {
        self.crossover_rate
    }

    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn mutation_scale(&self) -> f64 {
        self.mutation_scale
    }

    pub fn elitism_rate(&self) -> f64 {
        self.elitism_rate
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament.tournament_size()
    }

    pub fn crossover_type(&self) -> CrossoverType {
        self.crossover_type
    }

    pub fn mutation_type(&self) -> MutationType {
        self.mutation_type
    }

    /// Fraction of the initial mutation step left at the end of a run.
    pub const MUTATION_STEP_FLOOR: f64 = 0.01;

    /// Standard deviation of Gaussian mutation at `generation` out of `generations`.
    pub fn mutation_step(&self, bounds: &Bounds, generation: usize, generations: usize) -> f64 {
        let progress = generation as f64 / generations.max(1) as f64;
        self.mutation_scale * bounds.width() * Self::MUTATION_STEP_FLOOR.powf(progress)
    }

    /// Number of individuals carried over unchanged, `ceil(elitism_rate · n)`.
    ///
    /// Products that overshoot an integer by floating-point noise (such as
    /// `0.1 · 30`) are not rounded up.
    pub fn elite_count(&self, population_size: usize) -> usize {
        let exact = self.elitism_rate * population_size as f64;
        let count = (exact - 1e-9 * exact.max(1.0)).ceil().max(0.0) as usize;
        count.min(population_size)
    }
}

impl SearchStrategy for GeneticSearch {
    fn name(&self) -> &'static str {
        "ga"
    }

    fn search(
        &self,
        objective: &dyn Objective,
        bounds: Bounds,
        options: &SearchOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<SearchResult> {
        launch(self.name(), options, rng, |rng| {
            Generation::new(self, objective, bounds, options, rng)
        })
    }
}

/// Builder for `GeneticSearch`. Unset fields take the defaults
/// `0.8 / 0.1 / 0.1 / 0.1 / 3 / arithmetic / gaussian`.
#[derive(Debug, Clone, Default)]
pub struct GeneticSearchBuilder {
    crossover_rate: Option<f64>,
    mutation_rate: Option<f64>,
    mutation_scale: Option<f64>,
    elitism_rate: Option<f64>,
    tournament_size: Option<usize>,
    crossover_type: Option<CrossoverType>,
    mutation_type: Option<MutationType>,
}

impl GeneticSearchBuilder {
    pub fn crossover_rate(mut self, value: f64) -> Self {
        self.crossover_rate = Some(value);
        self
    }

    pub fn mutation_rate(mut self, value: f64) -> Self {
        self.mutation_rate = Some(value);
        self
    }

    /// Initial Gaussian step as a fraction of the box width.
    pub fn mutation_scale(mut self, value: f64) -> Self {
        self.mutation_scale = Some(value);
        self
    }

    pub fn elitism_rate(mut self, value: f64) -> Self {
        self.elitism_rate = Some(value);
        self
    }

    pub fn tournament_size(mut self, value: usize) -> Self {
        self.tournament_size = Some(value);
        self
    }

    pub fn crossover_type(mut self, value: CrossoverType) -> Self {
        self.crossover_type = Some(value);
        self
    }

    pub fn mutation_type(mut self, value: MutationType) -> Self {
        self.mutation_type = Some(value);
        self
    }

    /// Sets the crossover variant by name.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedVariant` for unknown names.
    pub fn crossover_name(self, name: &str) -> Result<Self> {
        Ok(self.crossover_type(name.parse()?))
    }

    /// Sets the mutation variant by name.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedVariant` for unknown names.
    pub fn mutation_name(self, name: &str) -> Result<Self> {
        Ok(self.mutation_type(name.parse()?))
    }

    /// Builds the `GeneticSearch`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a rate is outside `[0, 1]`, the
    /// mutation scale is not positive, or the tournament size is 0.
    pub fn build(self) -> Result<GeneticSearch> {
        let crossover_rate = unit_rate("crossover_rate", self.crossover_rate.unwrap_or(0.8))?;
        let mutation_rate = unit_rate("mutation_rate", self.mutation_rate.unwrap_or(0.1))?;
        let elitism_rate = unit_rate("elitism_rate", self.elitism_rate.unwrap_or(0.1))?;

        let mutation_scale = self.mutation_scale.unwrap_or(0.1);
        if !(mutation_scale > 0.0 && mutation_scale.is_finite()) {
            return Err(OptimizationError::Configuration(format!(
                "mutation_scale must be positive, got {}",
                mutation_scale
            )));
        }

        let tournament = TournamentSelection::new(self.tournament_size.unwrap_or(3))?;

        Ok(GeneticSearch {
            crossover_rate,
            mutation_rate,
            mutation_scale,
            elitism_rate,
            tournament,
            crossover_type: self.crossover_type.unwrap_or_default(),
            mutation_type: self.mutation_type.unwrap_or_default(),
        })
    }
}

fn unit_rate(name: &str, value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(OptimizationError::Configuration(format!(
            "{} must be in [0, 1], got {}",
            name, value
        )))
    }
}

pub(crate) struct Generation<'a> {
    params: &'a GeneticSearch,
    objective: &'a dyn Objective,
    bounds: Bounds,
    generations: usize,
    pub(crate) individuals: Vec<Point>,
    pub(crate) values: Vec<f64>,
    best: Incumbent,
    elitist: ElitistSelection,
}

impl<'a> Generation<'a> {
    pub(crate) fn new(
        params: &'a GeneticSearch,
        objective: &'a dyn Objective,
        bounds: Bounds,
        options: &SearchOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Self> {
        let individuals: Vec<Point> = (0..options.get_population_size())
            .map(|_| bounds.random_point(options.get_dimensions(), rng))
            .collect();
        let values = individuals
            .iter()
            .map(|p| evaluate(objective, p, EvaluationStage::Initialization))
            .collect::<Result<Vec<_>>>()?;
        let best = Incumbent::best_of(individuals.iter().zip(values.iter().copied()))?;

        Ok(Self {
            params,
            objective,
            bounds,
            generations: options.get_max_iterations(),
            individuals,
            values,
            best,
            elitist: ElitistSelection::new(),
        })
    }

    /// Up to two children of one tournament-selected couple, repaired.
    fn breed(&self, iteration: usize, rng: &mut RandomNumberGenerator) -> Result<(Point, Point)> {
        let p = self.params;
        let parents = p.tournament.select(&self.values, 2, rng)?;
        let (p1, p2) = (&self.individuals[parents[0]], &self.individuals[parents[1]]);
        let step = p.mutation_step(&self.bounds, iteration, self.generations);

        let (mut c1, mut c2) = if rng.unit() < p.crossover_rate {
            p.crossover_type.apply(p1, p2, rng)
        } else {
            (p1.clone(), p2.clone())
        };

        for child in [&mut c1, &mut c2] {
            if rng.unit() < p.mutation_rate {
                p.mutation_type.apply(child, step, &self.bounds, rng);
            }
            self.bounds.repair(child);
        }

        Ok((c1, c2))
    }
}

impl Swarm for Generation<'_> {
    fn step(&mut self, iteration: usize, rng: &mut RandomNumberGenerator) -> Result<()> {
        let n = self.individuals.len();
        let elite_count = self.params.elite_count(n);
        let elites = self.elitist.select(&self.values, elite_count, rng)?;

        let mut next: Vec<Point> = Vec::with_capacity(n);
        let mut next_values: Vec<f64> = Vec::with_capacity(n);
        for &i in &elites {
            next.push(self.individuals[i].clone());
            next_values.push(self.values[i]);
        }

        while next.len() < n {
            let (c1, c2) = self.breed(iteration, rng)?;
            for child in [c1, c2] {
                if next.len() == n {
                    break;
                }
                let stage = EvaluationStage::Iteration(iteration);
                let value = evaluate(self.objective, &child, stage)?;
                self.best.offer(&child, value);
                next.push(child);
                next_values.push(value);
            }
        }

        self.individuals = next;
        self.values = next_values;
        Ok(())
    }

    fn positions(&self) -> Vec<Point> {
        self.individuals.clone()
    }

    fn incumbent(&self) -> &Incumbent {
        &self.best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::ObjectiveFunction;

    fn generation<'a>(
        params: &'a GeneticSearch,
        objective: &'a dyn Objective,
        n: usize,
        dim: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Generation<'a> {
        let bounds = Bounds::new(-5.0, 5.0).unwrap();
        let options = SearchOptions::new(n, dim, 1);
        Generation::new(params, objective, bounds, &options, rng).unwrap()
    }

    #[test]
    fn test_builder_validation() {
        assert!(GeneticSearch::builder().build().is_ok());
        assert!(GeneticSearch::builder().crossover_rate(1.5).build().is_err());
        assert!(GeneticSearch::builder().mutation_rate(-0.1).build().is_err());
        assert!(GeneticSearch::builder().elitism_rate(2.0).build().is_err());
        assert!(GeneticSearch::builder().mutation_scale(0.0).build().is_err());
        assert!(GeneticSearch::builder().tournament_size(0).build().is_err());
        assert!(matches!(
            GeneticSearch::builder().crossover_name("three_point"),
            Err(OptimizationError::UnsupportedVariant { .. })
        ));
        assert!(matches!(
            GeneticSearch::builder().mutation_name("cauchy"),
            Err(OptimizationError::UnsupportedVariant { .. })
        ));
    }

    #[test]
    fn test_elite_count() {
        let ga = |rate| GeneticSearch::builder().elitism_rate(rate).build().unwrap();
        assert_eq!(ga(0.0).elite_count(20), 0);
        assert_eq!(ga(0.1).elite_count(20), 2);
        assert_eq!(ga(0.1).elite_count(30), 3);
        assert_eq!(ga(0.1).elite_count(25), 3);
        assert_eq!(ga(0.01).elite_count(5), 1);
        assert_eq!(ga(1.0).elite_count(7), 7);
    }

    #[test]
    fn test_mutation_step_anneals_to_floor() {
        let ga = GeneticSearch::builder().mutation_scale(0.1).build().unwrap();
        let bounds = Bounds::new(-5.0, 5.0).unwrap();

        assert!((ga.mutation_step(&bounds, 0, 50) - 1.0).abs() < 1e-12);
        assert!((ga.mutation_step(&bounds, 25, 50) - 0.1).abs() < 1e-12);
        assert!((ga.mutation_step(&bounds, 50, 50) - 0.01).abs() < 1e-12);

        let wide = Bounds::new(-500.0, 500.0).unwrap();
        assert!((ga.mutation_step(&wide, 0, 50) - 100.0).abs() < 1e-9);

        let steps: Vec<f64> = (0..50).map(|t| ga.mutation_step(&bounds, t, 50)).collect();
        assert!(steps.windows(2).all(|w| w[1] < w[0]));
        assert!(ga.mutation_step(&bounds, 0, 0).is_finite());
    }

    #[test]
    fn test_population_size_is_preserved() {
        let objective = ObjectiveFunction::Rosenbrock;
        let objective: &dyn Objective = &objective;
        let mut rng = RandomNumberGenerator::from_seed(12);

        for n in [1, 2, 3, 7, 10] {
            for elitism_rate in [0.0, 0.3, 1.0] {
                for crossover_type in CrossoverType::ALL {
                    let params = GeneticSearch::builder()
                        .elitism_rate(elitism_rate)
                        .crossover_type(crossover_type)
                        .mutation_type(MutationType::Uniform)
                        .mutation_rate(0.5)
                        .build()
                        .unwrap();
                    let mut generation = generation(&params, objective, n, 3, &mut rng);
                    for iteration in 0..5 {
                        generation.step(iteration, &mut rng).unwrap();
                        assert_eq!(generation.individuals.len(), n);
                        assert_eq!(generation.values.len(), n);
                    }
                }
            }
        }
    }

    #[test]
    fn test_full_elitism_freezes_population() {
        let objective = ObjectiveFunction::Sphere;
        let objective: &dyn Objective = &objective;
        let params = GeneticSearch::builder().elitism_rate(1.0).build().unwrap();
        let mut rng = RandomNumberGenerator::from_seed(14);
        let mut generation = generation(&params, objective, 6, 2, &mut rng);

        generation.step(0, &mut rng).unwrap();
        let frozen = generation.individuals.clone();
        let best = generation.incumbent().clone();
        for iteration in 1..10 {
            generation.step(iteration, &mut rng).unwrap();
            assert_eq!(generation.individuals, frozen);
            assert_eq!(generation.incumbent(), &best);
        }
    }

    #[test]
    fn test_elites_survive_unchanged() {
        let objective = ObjectiveFunction::Griewank;
        let objective: &dyn Objective = &objective;
        let params = GeneticSearch::builder()
            .elitism_rate(0.25)
            .mutation_rate(1.0)
            .build()
            .unwrap();
        let mut rng = RandomNumberGenerator::from_seed(15);
        let mut generation = generation(&params, objective, 8, 2, &mut rng);

        for iteration in 0..10 {
            let ranking = ElitistSelection::new()
                .select(&generation.values, 2, &mut rng)
                .unwrap();
            let elites: Vec<Point> = ranking
                .iter()
                .map(|&i| generation.individuals[i].clone())
                .collect();
            generation.step(iteration, &mut rng).unwrap();
            assert_eq!(&generation.individuals[..2], &elites[..]);
        }
    }

    #[test]
    fn test_children_stay_in_bounds() {
        let objective = ObjectiveFunction::Zakharov;
        let objective: &dyn Objective = &objective;
        let params = GeneticSearch::builder()
            .crossover_type(CrossoverType::Blend)
            .mutation_rate(1.0)
            .mutation_scale(50.0)
            .build()
            .unwrap();
        let mut rng = RandomNumberGenerator::from_seed(16);
        let mut generation = generation(&params, objective, 10, 4, &mut rng);
        let bounds = Bounds::new(-5.0, 5.0).unwrap();

        for iteration in 0..10 {
            generation.step(iteration, &mut rng).unwrap();
            assert!(generation.individuals.iter().all(|p| bounds.contains_point(p)));
        }
    }
}
