//! # Bat-inspired search
//!
//! Every bat carries a position, a velocity, a loudness and a pulse emission
//! rate. Per iteration and bat:
//!
//! - a frequency `f ~ U(fmin, fmax)` pulls the velocity toward the global best,
//!   `v += f (best - x)`, and the proposal is `x + v`, repaired into the box;
//! - with probability `1 - pulse_rate` the proposal is replaced by a local walk
//!   around the global best, `best + ε · mean_loudness` with `ε ~ U(-1, 1)` per
//!   dimension;
//! - the candidate always becomes the bat's new position. If it also improves
//!   on the bat's previous value and a uniform draw falls below the bat's
//!   loudness, the bat gets quieter (`loudness *= alpha`) and pulses more often
//!   (`pulse_rate = max(pulse_rate, r_max - (r_max - r0) e^(-gamma (t + 1)))`).
//!
//! Both per-bat updates are one-way: loudness never grows and the pulse rate
//! never shrinks. Any non-decreasing growth calibrated by `gamma` is a valid
//! pulse schedule; this one saturates at `r_max`, 0.5 by default, so local
//! walks around the best never stop entirely. The classic growth toward 1 is
//! `with_max_pulse_rate(1.0)`, at the cost of local refinement dying out
//! within a few iterations of the first improvements.

use tracing::trace;

use super::launcher::{launch, Swarm};
use super::{evaluate, Incumbent, Point, SearchOptions, SearchResult, SearchStrategy};
use crate::bounds::Bounds;
use crate::error::{EvaluationStage, OptimizationError, Result};
use crate::objective::Objective;
use crate::rng::RandomNumberGenerator;

/// Bat-inspired search.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone)]
pub struct BatSearch {
    alpha: f64,
    gamma: f64,
    fmin: f64,
    fmax: f64,
    initial_loudness: f64,
    initial_pulse_rate: f64,
    max_pulse_rate: f64,
}

impl BatSearch {
    pub const DEFAULT_INITIAL_LOUDNESS: f64 = 1.0;
    pub const DEFAULT_INITIAL_PULSE_RATE: f64 = 0.1;
    /// Saturation level of the pulse schedule. Raise to 1.0 for growth toward 1.
    pub const DEFAULT_MAX_PULSE_RATE: f64 = 0.5;

    /// Creates a bat search with the default initial loudness and pulse rate.
    ///
    /// # Arguments
    ///
    /// * `alpha` - Loudness decay factor, in `(0, 1]`.
    /// * `gamma` - Pulse rate growth factor, in `(0, 1]`.
    /// * `fmin`, `fmax` - Frequency range, `0 <= fmin < fmax`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any argument is out of range.
    pub fn new(alpha: f64, gamma: f64, fmin: f64, fmax: f64) -> Result<Self> {
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(OptimizationError::Configuration(format!(
                "alpha must be in (0, 1], got {}",
                alpha
            )));
        }
        if !(gamma > 0.0 && gamma <= 1.0) {
            return Err(OptimizationError::Configuration(format!(
                "gamma must be in (0, 1], got {}",
                gamma
            )));
        }
        if !(fmin >= 0.0 && fmin.is_finite()) {
            return Err(OptimizationError::Configuration(format!(
                "fmin must be a finite value >= 0, got {}",
                fmin
            )));
        }
        if !(fmax > fmin && fmax.is_finite()) {
            return Err(OptimizationError::Configuration(format!(
                "fmax ({}) must be greater than fmin ({})",
                fmax, fmin
            )));
        }

        Ok(Self {
            alpha,
            gamma,
            fmin,
            fmax,
            initial_loudness: Self::DEFAULT_INITIAL_LOUDNESS,
            initial_pulse_rate: Self::DEFAULT_INITIAL_PULSE_RATE,
            max_pulse_rate: Self::DEFAULT_MAX_PULSE_RATE,
        })
    }

    /// Overrides the starting loudness (`> 0`) and pulse rate of every bat.
    /// The pulse rate must lie in `[0, max_pulse_rate]`.
    pub fn with_initial_state(mut self, loudness: f64, pulse_rate: f64) -> Result<Self> {
        if !(loudness > 0.0 && loudness.is_finite()) {
            return Err(OptimizationError::Configuration(format!(
                "initial loudness must be positive, got {}",
                loudness
            )));
        }
        if !(0.0..=self.max_pulse_rate).contains(&pulse_rate) {
            return Err(OptimizationError::Configuration(format!(
                "initial pulse rate must be in [0, {}], got {}",
                self.max_pulse_rate, pulse_rate
            )));
        }
        self.initial_loudness = loudness;
        self.initial_pulse_rate = pulse_rate;
        Ok(self)
    }

    /// Overrides the level the pulse rate grows toward, in `[initial, 1]`.
    pub fn with_max_pulse_rate(mut self, max_pulse_rate: f64) -> Result<Self> {
        if !(self.initial_pulse_rate..=1.0).contains(&max_pulse_rate) {
            return Err(OptimizationError::Configuration(format!(
                "max pulse rate must be in [{}, 1], got {}",
                self.initial_pulse_rate, max_pulse_rate
            )));
        }
        self.max_pulse_rate = max_pulse_rate;
        Ok(self)
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn frequency_range(&self) -> (f64, f64) {
        (self.fmin, self.fmax)
    }

    /// The pulse rate target after an accepted improvement at `iteration`.
    fn pulse_rate_at(&self, iteration: usize) -> f64 {
        let (r0, r_max) = (self.initial_pulse_rate, self.max_pulse_rate);
        r_max - (r_max - r0) * (-self.gamma * (iteration + 1) as f64).exp()
    }
}

impl SearchStrategy for BatSearch {
    fn name(&self) -> &'static str {
        "bat"
    }

    fn search(
        &self,
        objective: &dyn Objective,
        bounds: Bounds,
        options: &SearchOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<SearchResult> {
        launch(self.name(), options, rng, |rng| {
            Colony::new(self, objective, bounds, options, rng)
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Bat {
    pub(crate) position: Point,
    pub(crate) velocity: Point,
    pub(crate) value: f64,
    pub(crate) loudness: f64,
    pub(crate) pulse_rate: f64,
}

pub(crate) struct Colony<'a> {
    params: &'a BatSearch,
    objective: &'a dyn Objective,
    bounds: Bounds,
    pub(crate) bats: Vec<Bat>,
    best: Incumbent,
}

impl<'a> Colony<'a> {
    pub(crate) fn new(
        params: &'a BatSearch,
        objective: &'a dyn Objective,
        bounds: Bounds,
        options: &SearchOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Self> {
        let dim = options.get_dimensions();
        let bats = (0..options.get_population_size())
            .map(|_| {
                let position = bounds.random_point(dim, rng);
                let value = evaluate(objective, &position, EvaluationStage::Initialization)?;
                Ok(Bat {
                    position,
                    velocity: vec![0.0; dim],
                    value,
                    loudness: params.initial_loudness,
                    pulse_rate: params.initial_pulse_rate,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let best = Incumbent::best_of(bats.iter().map(|b| (&b.position, b.value)))?;

        Ok(Self {
            params,
            objective,
            bounds,
            bats,
            best,
        })
    }

    fn mean_loudness(&self) -> f64 {
        self.bats.iter().map(|b| b.loudness).sum::<f64>() / self.bats.len() as f64
    }

    /// Global move: frequency-scaled pull toward the best position.
    fn fly(&mut self, i: usize, rng: &mut RandomNumberGenerator) -> Point {
        let frequency = rng.uniform(self.params.fmin, self.params.fmax);
        let bat = &mut self.bats[i];

        bat.velocity
            .iter_mut()
            .zip(bat.position.iter().zip(self.best.point.iter()))
            .for_each(|(v, (x, b))| *v += frequency * (b - x));

        let proposal: Point = bat
            .position
            .iter()
            .zip(bat.velocity.iter())
            .map(|(x, v)| x + v)
            .collect();
        self.bounds.repaired(&proposal)
    }

    /// Local random walk around the best position.
    fn walk(&self, mean_loudness: f64, rng: &mut RandomNumberGenerator) -> Point {
        let local: Point = self
            .best
            .point
            .iter()
            .map(|b| b + rng.uniform(-1.0, 1.0) * mean_loudness)
            .collect();
        self.bounds.repaired(&local)
    }
}

impl Swarm for Colony<'_> {
    fn step(&mut self, iteration: usize, rng: &mut RandomNumberGenerator) -> Result<()> {
        for i in 0..self.bats.len() {
            let mut candidate = self.fly(i, rng);

            if rng.unit() > self.bats[i].pulse_rate {
                let mean_loudness = self.mean_loudness();
                candidate = self.walk(mean_loudness, rng);
            }

            let stage = EvaluationStage::Iteration(iteration);
            let value = evaluate(self.objective, &candidate, stage)?;

            let loudness_draw = rng.unit();
            let target_rate = self.params.pulse_rate_at(iteration);
            let alpha = self.params.alpha;
            let bat = &mut self.bats[i];

            if value < bat.value && loudness_draw < bat.loudness {
                bat.loudness *= alpha;
                bat.pulse_rate = bat.pulse_rate.max(target_rate);
                trace!(
                    iteration,
                    bat = i,
                    loudness = bat.loudness,
                    pulse_rate = bat.pulse_rate,
                    "bat improved"
                );
            }

            bat.position = candidate;
            bat.value = value;
            self.best.offer(&bat.position, value);
        }
        Ok(())
    }

    fn positions(&self) -> Vec<Point> {
        self.bats.iter().map(|b| b.position.clone()).collect()
    }

    fn incumbent(&self) -> &Incumbent {
        &self.best
    }
}
