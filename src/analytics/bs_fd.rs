// src/analytics/bs_fd.rs
//! Explicit Finite-Difference Solver for the Black-Scholes PDE
//!
//! # Mathematical Framework
//!
//! In time to maturity `τ = T - t` a European call solves
//! ```text
//! ∂C/∂τ = ½σ²S² ∂²C/∂S² + rS ∂C/∂S - rC
//! ```
//! on `S ∈ [0, 2S₀]`, `τ ∈ [0, T]`, discretized as `S_i = iΔS` (`i = 0..=N`)
//! and `τ_j = jΔτ` (`j = 0..=M`):
//! ```text
//! C[i, 0] = max(S_i - K, 0)
//! C[0, j] = 0,    C[N, j] = S_max - K e^(-rτ_j)
//!
//! C[i, j+1] = (1 - rΔτ - i²σ²Δτ) C[i, j]
//!           + ½ (i²σ²Δτ + irΔτ) C[i+1, j]
//!           + ½ (i²σ²Δτ - irΔτ) C[i-1, j]
//! ```
//!
//! The explicit pass is only stable for `Δτ (σ²N² + r) ≤ 1`; grids beyond
//! the bound are rejected with `SdeError::NumericalInstability`.
//! [`BlackScholesFd::with_stable_grid`] picks the spot resolution from the
//! bound for a given number of time steps.

use crate::error::{validation::*, SdeError, SdeResult};
use ndarray::{Array1, Array2};
use tracing::debug;

/// Fraction of the largest stable spot resolution used by `with_stable_grid`
pub const STABILITY_MARGIN: f64 = 0.99;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholesFd {
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
    time_steps: usize,
    space_steps: usize,
}

impl BlackScholesFd {
    /// Call-price grid with `time_steps` steps in `τ` and `space_steps` in `S`
    ///
    /// # Errors
    ///
    /// - `InvalidParameters` for a non-positive spot, strike, volatility or
    ///   maturity, or a non-finite rate
    /// - `InvalidConfiguration` for fewer than 1 time step or 2 spot steps
    /// - `NumericalInstability` when the grid violates the stability bound
    pub fn new(
        spot: f64,
        strike: f64,
        rate: f64,
        volatility: f64,
        maturity: f64,
        time_steps: usize,
        space_steps: usize,
    ) -> SdeResult<Self> {
        validate_positive("spot", spot)?;
        validate_positive("strike", strike)?;
        validate_finite("rate", rate)?;
        validate_positive("volatility", volatility)?;
        validate_positive("maturity", maturity)?;
        validate_finite("maturity", maturity)?;

        if time_steps == 0 {
            return Err(SdeError::InvalidConfiguration {
                field: "time_steps".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        if space_steps < 2 {
            return Err(SdeError::InvalidConfiguration {
                field: "space_steps".to_string(),
                reason: format!("need at least one interior spot node, got {} steps", space_steps),
            });
        }
        validate_grid_size(space_steps + 1, time_steps + 1)?;
        validate_explicit_fd_stability(maturity / time_steps as f64, volatility, rate, space_steps)?;

        Ok(BlackScholesFd {
            spot,
            strike,
            rate,
            volatility,
            maturity,
            time_steps,
            space_steps,
        })
    }

    /// Solver with the finest spot grid the stability bound allows
    pub fn with_stable_grid(
        spot: f64,
        strike: f64,
        rate: f64,
        volatility: f64,
        maturity: f64,
        time_steps: usize,
    ) -> SdeResult<Self> {
        let max_steps = Self::max_stable_space_steps(rate, volatility, maturity, time_steps);
        let space_steps = (max_steps * STABILITY_MARGIN).floor().max(0.0) as usize;
        Self::new(spot, strike, rate, volatility, maturity, time_steps, space_steps)
    }

    /// `N_max = √(M/T - r) / σ`, zero when no spot grid is stable
    pub fn max_stable_space_steps(rate: f64, volatility: f64, maturity: f64, time_steps: usize) -> f64 {
        let headroom = time_steps as f64 / maturity - rate;
        if headroom <= 0.0 {
            0.0
        } else {
            headroom.sqrt() / volatility
        }
    }

    pub fn time_steps(&self) -> usize {
        self.time_steps
    }

    pub fn space_steps(&self) -> usize {
        self.space_steps
    }

    pub fn spot_max(&self) -> f64 {
        2.0 * self.spot
    }

    pub fn delta_s(&self) -> f64 {
        self.spot_max() / self.space_steps as f64
    }

    pub fn delta_tau(&self) -> f64 {
        self.maturity / self.time_steps as f64
    }

    /// `S_i = iΔS`, `i = 0..=N`
    pub fn spot_grid(&self) -> Array1<f64> {
        let ds = self.delta_s();
        Array1::from_shape_fn(self.space_steps + 1, |i| i as f64 * ds)
    }

    /// `τ_j = jΔτ`, `j = 0..=M`
    pub fn time_grid(&self) -> Array1<f64> {
        let m = self.time_steps as f64;
        Array1::from_shape_fn(self.time_steps + 1, |j| self.maturity * j as f64 / m)
    }

    /// Full `(N + 1) x (M + 1)` call-price grid; column `j` is `τ_j`
    pub fn solve(&self) -> Array2<f64> {
        let n = self.space_steps;
        let m = self.time_steps;
        let ds = self.delta_s();
        let dtau = self.delta_tau();
        let s_max = n as f64 * ds;

        let mut prices = Array2::<f64>::zeros((n + 1, m + 1));
        for (i, s) in self.spot_grid().iter().enumerate() {
            prices[[i, 0]] = (s - self.strike).max(0.0);
        }
        for j in 0..=m {
            prices[[0, j]] = 0.0;
            prices[[n, j]] = s_max - self.strike * (-self.rate * j as f64 * dtau).exp();
        }

        let alpha = dtau * self.volatility * self.volatility;
        let beta = dtau * self.rate;
        for j in 0..m {
            for i in 1..n {
                let fi = i as f64;
                let i2 = fi * fi;
                prices[[i, j + 1]] = (1.0 - beta - i2 * alpha) * prices[[i, j]]
                    + 0.5 * (i2 * alpha + fi * beta) * prices[[i + 1, j]]
                    + 0.5 * (i2 * alpha - fi * beta) * prices[[i - 1, j]];
            }
        }

        debug!(
            space_steps = n,
            time_steps = m,
            delta_s = ds,
            delta_tau = dtau,
            "Black-Scholes PDE solved"
        );
        prices
    }

    /// Call price today at the spot, linearly interpolated on the `τ = T` column
    pub fn price(&self) -> f64 {
        let prices = self.solve();
        let x = self.spot / self.delta_s();
        let i = (x.floor() as usize).min(self.space_steps - 1);
        let w = x - i as f64;
        let m = self.time_steps;
        (1.0 - w) * prices[[i, m]] + w * prices[[i + 1, m]]
    }
}
