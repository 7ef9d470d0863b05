use crate::bounds::Bounds;
use crate::error::{OptimizationError, Result};

/// A 2-D coordinate grid with the same axis samples along x and y.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Grid {
    /// Builds a square grid of `resolution` linearly spaced samples per axis,
    /// both ends of the box included.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `resolution < 2`.
    pub fn square(bounds: &Bounds, resolution: usize) -> Result<Self> {
        let axis = linspace(bounds.min(), bounds.max(), resolution)?;
        Ok(Self {
            xs: axis.clone(),
            ys: axis,
        })
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// The `(x, y)` coordinate at `[row][column]`.
    pub fn coordinate(&self, row: usize, column: usize) -> Option<(f64, f64)> {
        Some((*self.xs.get(column)?, *self.ys.get(row)?))
    }
}

fn linspace(start: f64, end: f64, num: usize) -> Result<Vec<f64>> {
    if num < 2 {
        return Err(OptimizationError::Configuration(format!(
            "Grid resolution must be at least 2, got {}",
            num
        )));
    }
    let step = (end - start) / (num - 1) as f64;
    let mut axis: Vec<f64> = (0..num).map(|i| start + step * i as f64).collect();
    // Pin the last sample to the box edge.
    axis[num - 1] = end;
    Ok(axis)
}
