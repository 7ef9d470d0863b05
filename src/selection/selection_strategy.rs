use std::fmt::Debug;

use crate::error::Result;
use crate::rng::RandomNumberGenerator;

/// Trait for selection strategies over a minimized objective.
///
/// Selection strategies choose individuals from a population based on their
/// objective values, where lower is better. They return indices into the
/// population so callers keep ownership of the points and their per-individual
/// state.
///
/// # Examples
///
/// ```
/// use swarmalg::selection::{ElitistSelection, SelectionStrategy};
/// use swarmalg::rng::RandomNumberGenerator;
/// use swarmalg::error::Result;
///
/// fn main() -> Result<()> {
///     let values = vec![0.5, 0.8, 0.3];
///     let mut rng = RandomNumberGenerator::new();
///
///     let selected = ElitistSelection::new().select(&values, 2, &mut rng)?;
///     assert_eq!(selected, vec![2, 0]);
///
///     Ok(())
/// }
/// ```
pub trait SelectionStrategy: Debug + Send + Sync {
    /// Selects `num_to_select` indices from the population described by `values`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `values` is empty
    /// - The strategy cannot derive selection weights from `values`
    fn select(
        &self,
        values: &[f64],
        num_to_select: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<usize>>;
}
