//! # Benchmark catalog
//!
//! The standard continuous test functions, each paired with the box it is
//! usually studied on. Every function is defined for any dimension `n >= 1`
//! using the full length of the point (Rosenbrock is identically zero for
//! `n == 1`).

use std::f64::consts::{E, PI};
use std::fmt;
use std::str::FromStr;

use super::{Grid, Objective};
use crate::bounds::Bounds;
use crate::error::{OptimizationError, Result};

/// A function from the benchmark catalog.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectiveFunction {
    Sphere,
    Rastrigin,
    Rosenbrock,
    Ackley,
    Griewank,
    Schwefel,
    Zakharov,
}

impl ObjectiveFunction {
    pub const ALL: [ObjectiveFunction; 7] = [
        ObjectiveFunction::Sphere,
        ObjectiveFunction::Rastrigin,
        ObjectiveFunction::Rosenbrock,
        ObjectiveFunction::Ackley,
        ObjectiveFunction::Griewank,
        ObjectiveFunction::Schwefel,
        ObjectiveFunction::Zakharov,
    ];

    /// The catalog key, e.g. `"rastrigin"`.
    pub fn key(&self) -> &'static str {
        match self {
            ObjectiveFunction::Sphere => "sphere",
            ObjectiveFunction::Rastrigin => "rastrigin",
            ObjectiveFunction::Rosenbrock => "rosenbrock",
            ObjectiveFunction::Ackley => "ackley",
            ObjectiveFunction::Griewank => "griewank",
            ObjectiveFunction::Schwefel => "schwefel",
            ObjectiveFunction::Zakharov => "zakharov",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ObjectiveFunction::Sphere => "Sphere",
            ObjectiveFunction::Rastrigin => "Rastrigin",
            ObjectiveFunction::Rosenbrock => "Rosenbrock",
            ObjectiveFunction::Ackley => "Ackley",
            ObjectiveFunction::Griewank => "Griewank",
            ObjectiveFunction::Schwefel => "Schwefel",
            ObjectiveFunction::Zakharov => "Zakharov",
        }
    }

    /// The box shared by every dimension.
    pub fn bounds(&self) -> Bounds {
        let (min, max) = match self {
            ObjectiveFunction::Sphere => (-10.0, 10.0),
            ObjectiveFunction::Rastrigin => (-5.12, 5.12),
            ObjectiveFunction::Rosenbrock => (-5.0, 5.0),
            ObjectiveFunction::Ackley => (-5.0, 5.0),
            ObjectiveFunction::Griewank => (-600.0, 600.0),
            ObjectiveFunction::Schwefel => (-500.0, 500.0),
            ObjectiveFunction::Zakharov => (-5.0, 10.0),
        };
        Bounds::new_unchecked(min, max)
    }

    /// File name of the background image for this objective.
    pub fn background_file_name(&self) -> String {
        format!("background_{}.png", self.key())
    }

    /// Samples the function over a square grid spanning its bounds.
    pub fn heatmap(&self, resolution: usize) -> Result<Heatmap> {
        let grid = Grid::square(&self.bounds(), resolution)?;
        let values = self.evaluate_grid(&grid);
        Ok(Heatmap { grid, values })
    }
}

impl Objective for ObjectiveFunction {
    fn evaluate(&self, x: &[f64]) -> f64 {
        match self {
            ObjectiveFunction::Sphere => sphere(x),
            ObjectiveFunction::Rastrigin => rastrigin(x),
            ObjectiveFunction::Rosenbrock => rosenbrock(x),
            ObjectiveFunction::Ackley => ackley(x),
            ObjectiveFunction::Griewank => griewank(x),
            ObjectiveFunction::Schwefel => schwefel(x),
            ObjectiveFunction::Zakharov => zakharov(x),
        }
    }
}

impl fmt::Display for ObjectiveFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ObjectiveFunction {
    type Err = OptimizationError;

    fn from_str(s: &str) -> Result<Self> {
        ObjectiveFunction::ALL
            .iter()
            .find(|f| f.key() == s)
            .copied()
            .ok_or_else(|| OptimizationError::UnknownObjective(s.to_string()))
    }
}

/// Objective values sampled over a 2-D grid, the data behind a background image.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Heatmap {
    pub grid: Grid,
    /// Indexed `[row][column]`, rows following y.
    pub values: Vec<Vec<f64>>,
}

impl Heatmap {
    /// The smallest and largest sampled value.
    pub fn value_range(&self) -> (f64, f64) {
        self.values
            .iter()
            .flatten()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}

/// Global minimum 0 at the origin.
pub fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|xi| xi * xi).sum()
}

/// Global minimum 0 at the origin.
pub fn rastrigin(x: &[f64]) -> f64 {
    const A: f64 = 10.0;
    A * x.len() as f64
        + x.iter()
            .map(|xi| xi * xi - A * (2.0 * PI * xi).cos())
            .sum::<f64>()
}

/// Global minimum 0 at `(1, ..., 1)`.
pub fn rosenbrock(x: &[f64]) -> f64 {
    x.windows(2)
        .map(|w| {
            let a = w[1] - w[0] * w[0];
            let b = 1.0 - w[0];
            100.0 * a * a + b * b
        })
        .sum()
}

/// Global minimum 0 at the origin.
pub fn ackley(x: &[f64]) -> f64 {
    const A: f64 = 20.0;
    const B: f64 = 0.2;
    let c = 2.0 * PI;
    let n = x.len() as f64;

    let sum_sq: f64 = x.iter().map(|xi| xi * xi).sum();
    let sum_cos: f64 = x.iter().map(|xi| (c * xi).cos()).sum();

    -A * (-B * (sum_sq / n).sqrt()).exp() - (sum_cos / n).exp() + A + E
}

/// Global minimum 0 at the origin.
pub fn griewank(x: &[f64]) -> f64 {
    let sum_sq: f64 = x.iter().map(|xi| xi * xi).sum::<f64>() / 4000.0;
    let prod_cos: f64 = x
        .iter()
        .enumerate()
        .map(|(i, xi)| (xi / ((i + 1) as f64).sqrt()).cos())
        .product();
    sum_sq - prod_cos + 1.0
}

/// Global minimum near 0 at `(420.9687, ..., 420.9687)`.
pub fn schwefel(x: &[f64]) -> f64 {
    418.9829 * x.len() as f64 - x.iter().map(|xi| xi * xi.abs().sqrt().sin()).sum::<f64>()
}

/// Global minimum 0 at the origin.
pub fn zakharov(x: &[f64]) -> f64 {
    let sum_sq: f64 = x.iter().map(|xi| xi * xi).sum();
    let weighted: f64 = x
        .iter()
        .enumerate()
        .map(|(i, xi)| 0.5 * (i + 1) as f64 * xi)
        .sum();
    sum_sq + weighted.powi(2) + weighted.powi(4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RandomNumberGenerator;

    #[test]
    fn test_known_minima() {
        let origin = [0.0, 0.0, 0.0];
        assert_eq!(sphere(&origin), 0.0);
        assert!(rastrigin(&origin).abs() < 1e-12);
        assert!(ackley(&origin).abs() < 1e-12);
        assert!(griewank(&origin).abs() < 1e-12);
        assert_eq!(zakharov(&origin), 0.0);
        assert_eq!(rosenbrock(&[1.0, 1.0, 1.0]), 0.0);
        assert!(schwefel(&[420.9687, 420.9687]).abs() < 1e-3);
    }

    #[test]
    fn test_one_dimensional_points() {
        for f in ObjectiveFunction::ALL {
            assert!(f.evaluate(&[0.5]).is_finite(), "{} failed on 1-D", f);
        }
        assert_eq!(rosenbrock(&[3.0]), 0.0);
    }

    #[test]
    fn test_keys_round_trip() {
        for f in ObjectiveFunction::ALL {
            assert_eq!(f.key().parse::<ObjectiveFunction>().unwrap(), f);
        }
        assert!(matches!(
            "himmelblau".parse::<ObjectiveFunction>(),
            Err(OptimizationError::UnknownObjective(_))
        ));
    }

    #[test]
    fn test_catalog_bounds() {
        assert_eq!(ObjectiveFunction::Zakharov.bounds().min(), -5.0);
        assert_eq!(ObjectiveFunction::Zakharov.bounds().max(), 10.0);
        assert_eq!(ObjectiveFunction::Griewank.bounds().width(), 1200.0);
        assert_eq!(
            ObjectiveFunction::Ackley.background_file_name(),
            "background_ackley.png"
        );
    }

    #[test]
    fn test_grid_agrees_with_single_point_for_every_function() {
        let mut rng = RandomNumberGenerator::from_seed(2024);
        for f in ObjectiveFunction::ALL {
            let heatmap = f.heatmap(60).unwrap();
            for _ in 0..100 {
                let row = rng.index(60);
                let column = rng.index(60);
                let (x, y) = heatmap.grid.coordinate(row, column).unwrap();
                let single = f.evaluate(&[x, y]);
                let gridded = heatmap.values[row][column];
                assert!(
                    (single - gridded).abs() <= 1e-12 * single.abs().max(1.0),
                    "{}: grid {} vs point {} at ({}, {})",
                    f,
                    gridded,
                    single,
                    x,
                    y
                );
            }
        }
    }

    #[test]
    fn test_heatmap_value_range() {
        let heatmap = ObjectiveFunction::Sphere.heatmap(11).unwrap();
        let (lo, hi) = heatmap.value_range();
        assert_eq!(lo, 0.0);
        assert_eq!(hi, 200.0);
    }
}
