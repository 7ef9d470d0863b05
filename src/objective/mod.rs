//! # Objective
//!
//! The `Objective` trait is the only view the search strategies have of the
//! function being minimized. A second capability, grid evaluation, samples the
//! same function over a 2-D meshgrid for visualization; it evaluates exactly the
//! same points the single-point path would, so both agree bit for bit.
//!
//! Any closure `Fn(&[f64]) -> f64 + Send + Sync` is an objective:
//!
//! ```rust
//! use swarmalg::objective::Objective;
//!
//! let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
//! assert_eq!(sphere.evaluate(&[1.0, 2.0]), 5.0);
//! ```

pub mod catalog;
pub mod grid;

use rayon::prelude::*;

pub use catalog::{Heatmap, ObjectiveFunction};
pub use grid::Grid;

/// A real-valued function of a point, to be minimized.
pub trait Objective: Send + Sync {
    /// Evaluates the function at `point`.
    ///
    /// Arity handling is up to the function; the catalog functions use the full
    /// length of the point.
    fn evaluate(&self, point: &[f64]) -> f64;

    /// Evaluates the function pointwise over a 2-D grid.
    ///
    /// The result is indexed `[row][column]`, where row `i` corresponds to
    /// `grid.ys()[i]` and column `j` to `grid.xs()[j]`. Rows are evaluated in
    /// parallel.
    fn evaluate_grid(&self, grid: &Grid) -> Vec<Vec<f64>> {
        grid.ys()
            .par_iter()
            .map(|&y| {
                grid.xs()
                    .iter()
                    .map(|&x| self.evaluate(&[x, y]))
                    .collect()
            })
            .collect()
    }
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn evaluate(&self, point: &[f64]) -> f64 {
        self(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::Bounds;

    #[test]
    fn test_closure_objective() {
        let f = |x: &[f64]| x.iter().sum::<f64>();
        assert_eq!(f.evaluate(&[1.0, 2.0, 3.0]), 6.0);
    }

    #[test]
    fn test_grid_layout_matches_meshgrid() {
        let f = |x: &[f64]| 10.0 * x[0] + x[1];
        let grid = Grid::square(&Bounds::new(0.0, 2.0).unwrap(), 3).unwrap();
        let z = f.evaluate_grid(&grid);

        assert_eq!(z.len(), 3);
        assert!(z.iter().all(|row| row.len() == 3));
        // Row index follows y, column index follows x.
        assert_eq!(z[0][2], 20.0);
        assert_eq!(z[2][0], 2.0);
        assert_eq!(z[1][1], 11.0);
    }

    #[test]
    fn test_trait_object_grid() {
        let f = |x: &[f64]| x[0] * x[1];
        let obj: &dyn Objective = &f;
        let grid = Grid::square(&Bounds::new(-1.0, 1.0).unwrap(), 5).unwrap();
        let z = obj.evaluate_grid(&grid);
        assert_eq!(z[0][0], 1.0);
        assert_eq!(z[4][0], -1.0);
    }
}
