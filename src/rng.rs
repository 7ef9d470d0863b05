//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct is the single source of randomness for a
//! search run. It wraps the `rand` crate's `StdRng` and is passed by mutable
//! reference into every search call, so each run owns its generator exclusively
//! and a seeded run is reproducible.
//!
//! ## Example
//!
//! ```rust
//! use swarmalg::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let random_numbers = rng.fetch_uniform(0.0, 1.0, 5);
//!
//! for number in random_numbers {
//!     assert!((0.0..1.0).contains(&number));
//! }
//! ```

use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::VecDeque;
use std::f64::consts::PI;

use crate::bounds::Bounds;
use crate::search::Point;

/// A wrapper around the `rand` crate's `StdRng` that provides the draws the
/// search strategies need.
#[derive(Debug, Clone)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// Two generators created from the same seed produce the same sequence, which
    /// makes whole search runs reproducible.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates `num` random numbers uniformly distributed in `[from, to)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use swarmalg::rng::RandomNumberGenerator;
    ///
    /// let mut rng = RandomNumberGenerator::new();
    /// let numbers = rng.fetch_uniform(-1.0, 1.0, 3);
    /// assert_eq!(numbers.len(), 3);
    /// ```
    pub fn fetch_uniform(&mut self, from: f64, to: f64, num: usize) -> VecDeque<f64> {
        let mut uniform_numbers = VecDeque::with_capacity(num);
        uniform_numbers.extend((0..num).map(|_| self.uniform(from, to)));
        uniform_numbers
    }

    /// A single draw from `[from, to)`. Returns `from` when the range is empty.
    pub fn uniform(&mut self, from: f64, to: f64) -> f64 {
        if from < to {
            self.rng.gen_range(from..to)
        } else {
            from
        }
    }

    /// A single draw from `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// A uniformly drawn index in `0..n`.
    ///
    /// `n` must be positive.
    pub fn index(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n)
    }

    /// A draw from the normal distribution `N(mean, std_dev²)` using the
    /// Box-Muller transform.
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.unit().max(1e-12);
        let u2 = self.unit();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        mean + std_dev * z
    }

    /// A point of dimension `dim` drawn uniformly from the box.
    pub fn point(&mut self, bounds: &Bounds, dim: usize) -> Point {
        self.fetch_uniform(bounds.min(), bounds.max(), dim)
            .into_iter()
            .collect()
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
