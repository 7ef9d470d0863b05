use std::cmp::Ordering;

use crate::error::{OptimizationError, Result};
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// A selection strategy that selects the best individuals by objective value.
///
/// Individuals are sorted ascending by value with a stable sort, so ties keep
/// their population order, and the first `num_to_select` are returned. This is
/// the elitism step of the genetic search. NaN values sort last.
///
/// # Examples
///
/// ```
/// use swarmalg::selection::{ElitistSelection, SelectionStrategy};
/// use swarmalg::rng::RandomNumberGenerator;
///
/// let values = vec![0.5, 0.8, 0.3];
/// let mut rng = RandomNumberGenerator::new();
/// let selected = ElitistSelection::new().select(&values, 2, &mut rng).unwrap();
///
/// assert_eq!(selected, vec![2, 0]);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct ElitistSelection;

impl ElitistSelection {
    pub fn new() -> Self {
        Self
    }

    /// All indices ordered best first, ties broken by index.
    pub fn ranking(&self, values: &[f64]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..values.len()).collect();
        order.sort_by(|&a, &b| {
            values[a].partial_cmp(&values[b]).unwrap_or_else(|| {
                if values[a].is_nan() && values[b].is_nan() {
                    Ordering::Equal
                } else if values[a].is_nan() {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            })
        });
        order
    }
}

impl SelectionStrategy for ElitistSelection {
    fn select(
        &self,
        values: &[f64],
        num_to_select: usize,
        _rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<usize>> {
        if values.is_empty() {
            return Err(OptimizationError::EmptyPopulation);
        }

        let mut order = self.ranking(values);
        order.truncate(num_to_select);
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elitist_selection() {
        let values = vec![0.5, 0.8, 0.3, 0.9, 0.1];
        let mut rng = RandomNumberGenerator::from_seed(1);

        let selected = ElitistSelection::new().select(&values, 3, &mut rng).unwrap();

        // indices 4, 2, 0 with values 0.1, 0.3, 0.5
        assert_eq!(selected, vec![4, 2, 0]);
    }

    #[test]
    fn test_elitist_selection_ties_keep_index_order() {
        let values = vec![1.0, 0.5, 1.0, 0.5, 1.0];
        let mut rng = RandomNumberGenerator::from_seed(1);

        let selected = ElitistSelection::new().select(&values, 4, &mut rng).unwrap();

        assert_eq!(selected, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_elitist_selection_more_than_population() {
        let values = vec![0.5, 0.8, 0.3];
        let mut rng = RandomNumberGenerator::from_seed(1);

        let selected = ElitistSelection::new().select(&values, 5, &mut rng).unwrap();

        assert_eq!(selected, vec![2, 0, 1]);
    }

    #[test]
    fn test_elitist_selection_empty_population() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        assert!(matches!(
            ElitistSelection::new().select(&[], 3, &mut rng),
            Err(OptimizationError::EmptyPopulation)
        ));
    }

    #[test]
    fn test_elitist_selection_with_nan() {
        let values = vec![0.5, f64::NAN, 0.3];
        let ranking = ElitistSelection::new().ranking(&values);

        // NaN values should be sorted last
        assert_eq!(ranking, vec![2, 0, 1]);
    }
}
