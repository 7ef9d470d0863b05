use std::fmt;
use std::str::FromStr;

use crate::bounds::Bounds;
use crate::error::{OptimizationError, Result};
use crate::rng::RandomNumberGenerator;

/// The mutation operators understood by `GeneticSearch`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationType {
    /// Adds `N(0, std_dev²)` noise to every gene.
    #[default]
    Gaussian,
    /// Resets one random gene to a uniform draw from the box.
    Uniform,
}

impl MutationType {
    pub const ALL: [MutationType; 2] = [MutationType::Gaussian, MutationType::Uniform];

    pub fn name(&self) -> &'static str {
        match self {
            MutationType::Gaussian => "gaussian",
            MutationType::Uniform => "uniform",
        }
    }

    /// Mutates `genes` in place. `std_dev` is the Gaussian step; the uniform
    /// reset ignores it. The result may leave the box.
    pub fn apply(
        &self,
        genes: &mut [f64],
        std_dev: f64,
        bounds: &Bounds,
        rng: &mut RandomNumberGenerator,
    ) {
        match self {
            MutationType::Gaussian => {
                genes.iter_mut().for_each(|g| *g += rng.normal(0.0, std_dev));
            }
            MutationType::Uniform => {
                if genes.is_empty() {
                    return;
                }
                let j = rng.index(genes.len());
                genes[j] = rng.uniform(bounds.min(), bounds.max());
            }
        }
    }
}

impl fmt::Display for MutationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MutationType {
    type Err = OptimizationError;

    fn from_str(s: &str) -> Result<Self> {
        MutationType::ALL
            .iter()
            .find(|m| m.name() == s)
            .copied()
            .ok_or_else(|| OptimizationError::UnsupportedVariant {
                kind: "mutation",
                name: s.to_string(),
            })
    }
}
