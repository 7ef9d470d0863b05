use std::fmt;
use std::str::FromStr;

use crate::error::{OptimizationError, Result};
use crate::rng::RandomNumberGenerator;
use crate::search::Point;

/// The crossover operators understood by `GeneticSearch`.
///
/// Each operator takes two parents of equal length and returns two children.
/// Children may leave the search box (`Blend` does so by construction); the
/// caller repairs them.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrossoverType {
    /// `c1 = a p1 + (1 - a) p2`, `c2 = (1 - a) p1 + a p2` with `a ~ U(0, 1)`.
    #[default]
    Arithmetic,
    /// BLX-0.5: each gene drawn from the parents' interval widened by half its length.
    Blend,
    /// Swap the tails after one random cut.
    SinglePoint,
    /// Swap the segment between two random cuts.
    TwoPoint,
}

impl CrossoverType {
    pub const ALL: [CrossoverType; 4] = [
        CrossoverType::Arithmetic,
        CrossoverType::Blend,
        CrossoverType::SinglePoint,
        CrossoverType::TwoPoint,
    ];

    const BLEND_ALPHA: f64 = 0.5;

    pub fn name(&self) -> &'static str {
        match self {
            CrossoverType::Arithmetic => "arithmetic",
            CrossoverType::Blend => "blend",
            CrossoverType::SinglePoint => "single_point",
            CrossoverType::TwoPoint => "two_point",
        }
    }

    pub fn apply(
        &self,
        p1: &[f64],
        p2: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> (Point, Point) {
        match self {
            CrossoverType::Arithmetic => {
                let a = rng.unit();
                let c1 = p1.iter().zip(p2).map(|(x, y)| a * x + (1.0 - a) * y).collect();
                let c2 = p1.iter().zip(p2).map(|(x, y)| (1.0 - a) * x + a * y).collect();
                (c1, c2)
            }
            CrossoverType::Blend => {
                let mut blend = |x: f64, y: f64| {
                    let (lo, hi) = if x <= y { (x, y) } else { (y, x) };
                    let spread = Self::BLEND_ALPHA * (hi - lo);
                    rng.uniform(lo - spread, hi + spread)
                };
                let c1 = p1.iter().zip(p2).map(|(&x, &y)| blend(x, y)).collect();
                let c2 = p1.iter().zip(p2).map(|(&x, &y)| blend(x, y)).collect();
                (c1, c2)
            }
            CrossoverType::SinglePoint => {
                let dim = p1.len();
                if dim < 2 {
                    return (p1.to_vec(), p2.to_vec());
                }
                let cut = 1 + rng.index(dim - 1);
                swap_segment(p1, p2, cut, dim)
            }
            CrossoverType::TwoPoint => {
                let dim = p1.len();
                if dim < 2 {
                    return (p1.to_vec(), p2.to_vec());
                }
                let a = 1 + rng.index(dim - 1);
                let b = 1 + rng.index(dim - 1);
                let (start, end) = if a <= b { (a, b) } else { (b, a) };
                // Equal cuts fall back to a single-point swap of the tail.
                let end = if start == end { dim } else { end };
                swap_segment(p1, p2, start, end)
            }
        }
    }
}

fn swap_segment(p1: &[f64], p2: &[f64], start: usize, end: usize) -> (Point, Point) {
    let mut c1 = p1.to_vec();
    let mut c2 = p2.to_vec();
    c1[start..end].copy_from_slice(&p2[start..end]);
    c2[start..end].copy_from_slice(&p1[start..end]);
    (c1, c2)
}

impl fmt::Display for CrossoverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CrossoverType {
    type Err = OptimizationError;

    fn from_str(s: &str) -> Result<Self> {
        CrossoverType::ALL
            .iter()
            .find(|c| c.name() == s)
            .copied()
            .ok_or_else(|| OptimizationError::UnsupportedVariant {
                kind: "crossover",
                name: s.to_string(),
            })
    }
}
