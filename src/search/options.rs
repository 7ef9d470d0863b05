//! # SearchOptions
//!
//! The `SearchOptions` struct carries the parameters every strategy shares: the
//! population size, problem dimensionality, iteration budget and the cadence of
//! population snapshots.
//!
//! ## Example
//!
//! ```rust
//! use swarmalg::search::SearchOptions;
//!
//! let options = SearchOptions::builder()
//!     .population_size(30)
//!     .dimensions(2)
//!     .max_iterations(100)
//!     .save_every(5)
//!     .build();
//!
//! assert!(options.validate().is_ok());
//! assert!(options.snapshot_due(0));
//! assert!(!options.snapshot_due(1));
//! assert!(options.snapshot_due(99));
//! ```

use crate::error::{OptimizationError, Result};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    population_size: usize,
    dimensions: usize,
    max_iterations: usize,
    /// Snapshot cadence; `None` disables the position log.
    save_every: Option<usize>,
    /// Iterations with `iteration % save_every == save_phase` are logged.
    save_phase: usize,
}

impl SearchOptions {
    pub fn new(population_size: usize, dimensions: usize, max_iterations: usize) -> Self {
        Self {
            population_size,
            dimensions,
            max_iterations,
            ..Self::default()
        }
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn get_max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn get_save_every(&self) -> Option<usize> {
        self.save_every
    }

    pub fn get_save_phase(&self) -> usize {
        self.save_phase
    }

    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    pub fn set_dimensions(&mut self, dimensions: usize) {
        self.dimensions = dimensions;
    }

    pub fn set_max_iterations(&mut self, max_iterations: usize) {
        self.max_iterations = max_iterations;
    }

    pub fn set_save_every(&mut self, save_every: Option<usize>) {
        self.save_every = save_every;
    }

    pub fn set_save_phase(&mut self, save_phase: usize) {
        self.save_phase = save_phase;
    }

    /// Checks that the options describe a runnable search.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any size is zero, `save_every` is
    /// `Some(0)`, or the phase is not smaller than `save_every`.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(OptimizationError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }
        if self.dimensions == 0 {
            return Err(OptimizationError::Configuration(
                "Dimensions cannot be zero".to_string(),
            ));
        }
        if self.max_iterations == 0 {
            return Err(OptimizationError::Configuration(
                "Number of iterations cannot be zero".to_string(),
            ));
        }
        match self.save_every {
            Some(0) => Err(OptimizationError::Configuration(
                "Snapshot cadence cannot be zero".to_string(),
            )),
            Some(every) if self.save_phase >= every => {
                Err(OptimizationError::Configuration(format!(
                    "Snapshot phase ({}) must be smaller than the cadence ({})",
                    self.save_phase, every
                )))
            }
            _ => Ok(()),
        }
    }

    /// Whether the population is logged after the given zero-based iteration.
    ///
    /// The last iteration is always logged unless logging is disabled.
    pub fn snapshot_due(&self, iteration: usize) -> bool {
        match self.save_every {
            Some(every) if every > 0 => {
                iteration % every == self.save_phase || iteration + 1 == self.max_iterations
            }
            _ => false,
        }
    }

    /// Returns a builder for creating a `SearchOptions` instance.
    pub fn builder() -> SearchOptionsBuilder {
        SearchOptionsBuilder::default()
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            population_size: 20,
            dimensions: 2,
            max_iterations: 50,
            save_every: Some(1),
            save_phase: 0,
        }
    }
}

/// Builder for `SearchOptions`.
#[derive(Debug, Clone, Default)]
pub struct SearchOptionsBuilder {
    population_size: Option<usize>,
    dimensions: Option<usize>,
    max_iterations: Option<usize>,
    save_every: Option<Option<usize>>,
    save_phase: Option<usize>,
}

impl SearchOptionsBuilder {
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn dimensions(mut self, value: usize) -> Self {
        self.dimensions = Some(value);
        self
    }

    pub fn max_iterations(mut self, value: usize) -> Self {
        self.max_iterations = Some(value);
        self
    }

    pub fn save_every(mut self, value: usize) -> Self {
        self.save_every = Some(Some(value));
        self
    }

    /// Disables the position log entirely.
    pub fn no_snapshots(mut self) -> Self {
        self.save_every = Some(None);
        self
    }

    pub fn save_phase(mut self, value: usize) -> Self {
        self.save_phase = Some(value);
        self
    }

    pub fn build(self) -> SearchOptions {
        let defaults = SearchOptions::default();
        SearchOptions {
            population_size: self.population_size.unwrap_or(defaults.population_size),
            dimensions: self.dimensions.unwrap_or(defaults.dimensions),
            max_iterations: self.max_iterations.unwrap_or(defaults.max_iterations),
            save_every: self.save_every.unwrap_or(defaults.save_every),
            save_phase: self.save_phase.unwrap_or(defaults.save_phase),
        }
    }
}
