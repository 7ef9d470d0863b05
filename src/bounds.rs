//! # Bounds
//!
//! A closed box `[min, max]` shared by every dimension of the search space,
//! together with the repair policy all strategies apply after each stochastic
//! move. Repair clamps every coordinate into the box and is idempotent.

use crate::error::{OptimizationError, Result};
use crate::rng::RandomNumberGenerator;
use crate::search::Point;

/// The search box, applied uniformly to every dimension.
///
/// Serializes as the pair `[min, max]`; deserialization goes through
/// `Bounds::new`, so an inverted pair is rejected.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "(f64, f64)", into = "(f64, f64)"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    min: f64,
    max: f64,
}

impl Bounds {
    /// Creates a new box.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBounds` if either end is not finite or `min >= max`.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(OptimizationError::InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }

    /// For compile-time constants known to satisfy `min < max`.
    pub(crate) const fn new_unchecked(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.min && x <= self.max
    }

    pub fn contains_point(&self, point: &[f64]) -> bool {
        point.iter().all(|&x| self.contains(x))
    }

    /// Clamps a single coordinate into the box.
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }

    /// Clamps every coordinate of `point` into the box, in place.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use swarmalg::bounds::Bounds;
    ///
    /// let bounds = Bounds::new(-1.0, 1.0).unwrap();
    /// let mut p = vec![-3.0, 0.5, 2.0];
    /// bounds.repair(&mut p);
    /// assert_eq!(p, vec![-1.0, 0.5, 1.0]);
    /// ```
    pub fn repair(&self, point: &mut [f64]) {
        point.iter_mut().for_each(|x| *x = self.clamp(*x));
    }

    /// Returns a repaired copy of `point`.
    pub fn repaired(&self, point: &[f64]) -> Point {
        point.iter().map(|&x| self.clamp(x)).collect()
    }

    /// A point of dimension `dim` drawn uniformly from the box.
    pub fn random_point(&self, dim: usize, rng: &mut RandomNumberGenerator) -> Point {
        rng.point(self, dim)
    }
}

impl TryFrom<(f64, f64)> for Bounds {
    type Error = OptimizationError;

    fn try_from((min, max): (f64, f64)) -> Result<Self> {
        Bounds::new(min, max)
    }
}

impl From<Bounds> for (f64, f64) {
    fn from(bounds: Bounds) -> Self {
        (bounds.min, bounds.max)
    }
}
