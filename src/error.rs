//! # Error Types
//!
//! This module defines the error type shared by every search strategy and by the
//! run orchestration layer. Errors fall into three groups:
//!
//! - invalid configuration (bad parameters, unknown variant or algorithm names),
//! - invalid problem definition (degenerate bounds, unknown objective),
//! - numerical failures while evaluating the objective.
//!
//! The first two groups are always reported before a search performs its first
//! iteration.
//!
//! ## Examples
//!
//! ```rust
//! use swarmalg::error::{OptimizationError, Result};
//! use swarmalg::bounds::Bounds;
//!
//! fn make_bounds() -> Result<Bounds> {
//!     Bounds::new(5.0, -5.0)
//! }
//!
//! match make_bounds() {
//!     Err(OptimizationError::InvalidBounds { min, max }) => {
//!         assert_eq!((min, max), (5.0, -5.0));
//!     }
//!     _ => panic!("expected invalid bounds"),
//! }
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use swarmalg::error::{OptimizationError, OptionExt};
//!
//! fn worst(values: &[f64]) -> swarmalg::error::Result<f64> {
//!     values
//!         .iter()
//!         .cloned()
//!         .reduce(f64::max)
//!         .ok_or_else_optim(|| OptimizationError::EmptyPopulation)
//! }
//!
//! assert!(worst(&[]).is_err());
//! assert_eq!(worst(&[1.0, 3.0]).unwrap(), 3.0);
//! ```

use std::fmt;

use thiserror::Error;

use crate::search::Point;

/// Where in a run an objective evaluation happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationStage {
    /// Random initialization of the population, before the first iteration.
    Initialization,
    /// The zero-based iteration (or generation) index.
    Iteration(usize),
}

impl fmt::Display for EvaluationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationStage::Initialization => write!(f, "initialization"),
            EvaluationStage::Iteration(i) => write!(f, "iteration {}", i),
        }
    }
}

/// Represents errors that can occur while configuring or running a search.
#[derive(Error, Debug)]
pub enum OptimizationError {
    /// An algorithm or search parameter is missing or out of range.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A crossover or mutation variant name is not supported.
    #[error("Unsupported {kind} variant: '{name}'")]
    UnsupportedVariant { kind: &'static str, name: String },

    /// The search box is inverted, degenerate or not finite.
    #[error("Invalid bounds: min ({min}) must be finite and strictly less than max ({max})")]
    InvalidBounds { min: f64, max: f64 },

    /// The objective produced NaN or infinity.
    #[error("Non-finite fitness {value} during {stage} at point {point:?}")]
    NonFiniteFitness {
        stage: EvaluationStage,
        point: Point,
        value: f64,
    },

    /// An operation required at least one individual.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// No search strategy is registered under the given key.
    #[error("Unknown algorithm: '{0}'")]
    UnknownAlgorithm(String),

    /// No catalog objective is registered under the given key.
    #[error("Unknown objective: '{0}'")]
    UnknownObjective(String),
}

/// A specialized Result type for optimization operations.
pub type Result<T> = std::result::Result<T, OptimizationError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, OptimizationError>` using
    /// a closure to generate the error.
    fn ok_or_else_optim<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> OptimizationError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_optim<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> OptimizationError,
    {
        self.ok_or_else(err_fn)
    }
}
