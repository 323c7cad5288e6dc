// src/solvers/time_grid.rs
//! Uniform time discretization
//!
//! ```text
//! t_i = t0 + i Δt,    i = 0, 1, ..., N,    N = ⌈(t_N - t0) / Δt⌉
//! ```
//!
//! The last point may overshoot `t_N` when the horizon is not a multiple of
//! `Δt`. A ratio within [`SNAP_TOLERANCE`] of an integer is rounded instead of
//! ceiled, so `100 / 0.001` gives 100 000 steps rather than 100 001. A snapped
//! grid spans the horizon exactly: its points are `t0 + (t_N - t0) i / N` and
//! the last one is `t_N` itself.

use crate::error::{validation::*, SdeResult};
use ndarray::Array1;

/// Relative tolerance for treating `(t_N - t0) / Δt` as an exact integer
pub const SNAP_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    t0: f64,
    t_n: f64,
    delta_t: f64,
    steps: usize,
    snapped: bool,
}

impl TimeGrid {
    pub fn new(t0: f64, t_n: f64, delta_t: f64) -> SdeResult<Self> {
        validate_horizon(t0, t_n)?;
        validate_positive("delta_t", delta_t)?;
        validate_finite("delta_t", delta_t)?;

        let (steps, snapped) = Self::snapped_step_count(t0, t_n, delta_t);
        // Two points at least, and the count must fit in an allocation.
        validate_grid_size(steps.saturating_add(1), 1)?;

        Ok(TimeGrid {
            t0,
            t_n,
            delta_t,
            steps,
            snapped,
        })
    }

    /// `⌈(t_n - t0) / delta_t⌉` with integer snapping
    pub fn step_count(t0: f64, t_n: f64, delta_t: f64) -> usize {
        Self::snapped_step_count(t0, t_n, delta_t).0
    }

    fn snapped_step_count(t0: f64, t_n: f64, delta_t: f64) -> (usize, bool) {
        let ratio = (t_n - t0) / delta_t;
        let nearest = ratio.round();
        let (steps, snapped) = if (ratio - nearest).abs() <= SNAP_TOLERANCE * nearest.max(1.0) {
            (nearest, true)
        } else {
            (ratio.ceil(), false)
        };
        // A horizon that snaps to zero steps still gets one full step.
        if steps < 1.0 {
            (1, false)
        } else {
            (steps as usize, snapped)
        }
    }

    pub fn t0(&self) -> f64 {
        self.t0
    }

    pub fn delta_t(&self) -> f64 {
        self.delta_t
    }

    /// Number of integration intervals
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Number of time points (`steps + 1`)
    pub fn n_points(&self) -> usize {
        self.steps + 1
    }

    pub fn time(&self, i: usize) -> f64 {
        if !self.snapped {
            self.t0 + i as f64 * self.delta_t
        } else if i == self.steps {
            self.t_n
        } else {
            self.t0 + (self.t_n - self.t0) * i as f64 / self.steps as f64
        }
    }

    pub fn last(&self) -> f64 {
        self.time(self.steps)
    }

    pub fn to_array(&self) -> Array1<f64> {
        Array1::from_shape_fn(self.n_points(), |i| self.time(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_division() {
        let grid = TimeGrid::new(0.0, 1.0, 0.1).unwrap();
        assert_eq!(grid.steps(), 10);
        assert_eq!(grid.n_points(), 11);
        assert_eq!(grid.time(0), 0.0);
    }

    #[test]
    fn test_floating_point_noise_is_snapped() {
        let grid = TimeGrid::new(0.0, 100.0, 0.001).unwrap();
        assert_eq!(grid.steps(), 100_000);

        let grid = TimeGrid::new(0.0, 1.1, 0.1).unwrap();
        assert_eq!(grid.steps(), 11);
    }

    #[test]
    fn test_snapped_grid_ends_exactly_at_horizon() {
        for &(t0, t_n) in &[(0.0, 0.3), (0.0, 0.7), (0.1, 0.3), (1.0, 2.1)] {
            let grid = TimeGrid::new(t0, t_n, 0.1).unwrap();
            assert_eq!(grid.last(), t_n);
            assert_eq!(grid.to_array()[grid.steps()], t_n);
            assert_eq!(grid.time(0), t0);
        }
    }

    #[test]
    fn test_partial_last_step_is_ceiled() {
        let grid = TimeGrid::new(0.0, 1.0, 0.3).unwrap();
        assert_eq!(grid.steps(), 4);
        assert!(grid.last() >= 1.0);
    }

    #[test]
    fn test_grid_is_uniform_and_increasing() {
        let grid = TimeGrid::new(2.0, 5.0, 0.25).unwrap();
        let times = grid.to_array();
        assert_eq!(times[0], 2.0);
        for w in times.windows(2) {
            let dt = w[1] - w[0];
            assert!(dt > 0.0);
            assert!((dt - 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn test_invalid_grids_rejected() {
        assert!(TimeGrid::new(1.0, 1.0, 0.1).is_err());
        assert!(TimeGrid::new(1.0, 0.0, 0.1).is_err());
        assert!(TimeGrid::new(0.0, 1.0, 0.0).is_err());
        assert!(TimeGrid::new(0.0, 1.0, -0.1).is_err());
        assert!(TimeGrid::new(0.0, f64::INFINITY, 0.1).is_err());
    }
}
