use crate::error::{OptimizationError, Result};
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// A selection strategy that selects individuals through tournament selection.
///
/// Each tournament draws `tournament_size` contestants uniformly at random with
/// replacement and keeps the one with the lowest objective value; the contestant
/// drawn first wins ties. Every selection runs an independent tournament, so the
/// same individual can be selected more than once.
///
/// - Smaller tournament sizes lead to more exploration (more random selection)
/// - Larger tournament sizes lead to more exploitation (more focus on the best individuals)
///
/// # Examples
///
/// ```
/// use swarmalg::selection::{SelectionStrategy, TournamentSelection};
/// use swarmalg::rng::RandomNumberGenerator;
/// use swarmalg::error::Result;
///
/// fn main() -> Result<()> {
///     let values = vec![0.5, 0.8, 0.3, 0.9, 0.1];
///     let mut rng = RandomNumberGenerator::from_seed(1);
///
///     let selection = TournamentSelection::new(3)?;
///     let selected = selection.select(&values, 4, &mut rng)?;
///
///     assert_eq!(selected.len(), 4);
///     Ok(())
/// }
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone)]
pub struct TournamentSelection {
    tournament_size: usize,
}

impl TournamentSelection {
    /// Creates a new TournamentSelection strategy with the specified tournament size.
    ///
    /// # Arguments
    ///
    /// * `tournament_size` - The number of contestants drawn per tournament.
    ///   Must be at least 1. A tournament size of 1 is equivalent to random selection.
    ///
    /// # Errors
    ///
    /// Returns an error if `tournament_size` is 0.
    pub fn new(tournament_size: usize) -> Result<Self> {
        if tournament_size < 1 {
            return Err(OptimizationError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }

        Ok(Self { tournament_size })
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Runs a single tournament and returns the index of the winner.
    fn run_tournament(&self, values: &[f64], rng: &mut RandomNumberGenerator) -> usize {
        let mut best_idx = rng.index(values.len());

        for _ in 1..self.tournament_size {
            let idx = rng.index(values.len());
            if values[idx] < values[best_idx] {
                best_idx = idx;
            }
        }

        best_idx
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self { tournament_size: 3 }
    }
}

impl SelectionStrategy for TournamentSelection {
    fn select(
        &self,
        values: &[f64],
        num_to_select: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<usize>> {
        if values.is_empty() {
            return Err(OptimizationError::EmptyPopulation);
        }

        Ok((0..num_to_select)
            .map(|_| self.run_tournament(values, rng))
            .collect())
    }
}
