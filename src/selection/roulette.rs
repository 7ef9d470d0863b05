use crate::error::{OptimizationError, Result};
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// A fitness-proportionate selection strategy for minimized objectives.
///
/// Objective values are first mapped to a positive quality, `1 / (1 + f)` for
/// `f >= 0` and `1 + |f|` otherwise, so lower values always get a larger slice
/// of the wheel. Selections are independent and may repeat.
///
/// # Examples
///
/// ```
/// use swarmalg::selection::{RouletteWheelSelection, SelectionStrategy};
/// use swarmalg::rng::RandomNumberGenerator;
///
/// let values = vec![0.0, 100.0];
/// let mut rng = RandomNumberGenerator::from_seed(3);
/// let selected = RouletteWheelSelection::new().select(&values, 1000, &mut rng).unwrap();
///
/// let picks_of_best = selected.iter().filter(|&&i| i == 0).count();
/// assert!(picks_of_best > 900);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct RouletteWheelSelection;

impl RouletteWheelSelection {
    pub fn new() -> Self {
        Self
    }

    /// Maps an objective value to a strictly positive quality.
    pub fn quality(value: f64) -> f64 {
        if value >= 0.0 {
            1.0 / (1.0 + value)
        } else {
            1.0 + value.abs()
        }
    }

    /// Calculates the cumulative selection probabilities for each individual.
    ///
    /// # Errors
    ///
    /// Returns an error if the qualities do not sum to a positive finite number.
    fn calculate_probabilities(&self, values: &[f64]) -> Result<Vec<f64>> {
        let qualities: Vec<f64> = values.iter().map(|&v| Self::quality(v)).collect();
        let sum: f64 = qualities.iter().sum();

        if !(sum.is_finite() && sum > 0.0) {
            return Err(OptimizationError::Configuration(format!(
                "Roulette wheel selection requires a positive finite quality sum, got {}",
                sum
            )));
        }

        let mut cumulative = 0.0;
        let mut probs: Vec<f64> = qualities
            .iter()
            .map(|q| {
                cumulative += q / sum;
                cumulative
            })
            .collect();

        // Ensure the last probability is exactly 1.0 to avoid floating-point errors
        if let Some(last) = probs.last_mut() {
            *last = 1.0;
        }

        Ok(probs)
    }

    fn select_individual(
        &self,
        cumulative_probs: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> usize {
        let r = rng.unit();

        cumulative_probs
            .iter()
            .position(|&prob| r <= prob)
            .unwrap_or(cumulative_probs.len() - 1)
    }
}

impl SelectionStrategy for RouletteWheelSelection {
    fn select(
        &self,
        values: &[f64],
        num_to_select: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<usize>> {
        if values.is_empty() {
            return Err(OptimizationError::EmptyPopulation);
        }

        let cumulative_probs = self.calculate_probabilities(values)?;

        Ok((0..num_to_select)
            .map(|_| self.select_individual(&cumulative_probs, rng))
            .collect())
    }
}
