// src/models/cir.rs
//! Cox-Ingersoll-Ross Short-Rate Model
//!
//! ```text
//! dX_t = λ(ξ - X_t) dt + γ √X_t dW_t
//! ```
//!
//! - λ: mean reversion speed
//! - ξ: long-run mean level
//! - γ: volatility of the square-root diffusion
//!
//! # Negative States
//!
//! The exact process stays non-negative, the Euler discretization does not:
//! a large negative increment can push `X` below zero, after which `√X` is
//! undefined. [`CirBoundary`] selects what happens then. The default rejects
//! the simulation with `SdeError::InvalidState`.
//!
//! # Feller Condition
//!
//! With `2λξ ≤ γ²` the exact process can reach zero, and the discretized
//! one crosses it far more often. This is logged as a warning.

use super::model::StochasticProcess;
use crate::error::{validation::*, SdeResult};
use crate::mc::mc_engine::{simulate, SimConfig};
use crate::output::SimulationResult;
use rand::Rng;
use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CirBoundary {
    /// Abort on the first negative state
    #[default]
    Reject,
    /// Floor the updated state at zero
    Truncate,
    /// Replace the updated state by its absolute value
    Reflect,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CirParams {
    pub lambda: f64, // Mean reversion speed
    pub xi: f64,     // Long-run mean
    pub gamma: f64,  // Volatility
}

impl Default for CirParams {
    fn default() -> Self {
        CirParams {
            lambda: 0.1,
            xi: 0.2,
            gamma: 0.3,
        }
    }
}

impl CirParams {
    pub fn satisfies_feller(&self) -> bool {
        2.0 * self.lambda * self.xi > self.gamma * self.gamma
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Cir {
    pub params: CirParams,
    pub boundary: CirBoundary,
}

impl Cir {
    pub fn new(params: CirParams) -> SdeResult<Self> {
        Self::with_boundary(params, CirBoundary::default())
    }

    pub fn with_boundary(params: CirParams, boundary: CirBoundary) -> SdeResult<Self> {
        validate_finite("lambda", params.lambda)?;
        validate_finite("xi", params.xi)?;
        validate_finite("gamma", params.gamma)?;
        validate_non_negative("gamma", params.gamma)?;

        if !params.satisfies_feller() {
            warn!(
                lambda = params.lambda,
                xi = params.xi,
                gamma = params.gamma,
                "Feller condition violated (2λξ ≤ γ²), rate may hit zero"
            );
        }

        Ok(Cir { params, boundary })
    }
}

impl StochasticProcess for Cir {
    fn drift(&self, x: f64, _t: f64) -> f64 {
        self.params.lambda * (self.params.xi - x)
    }

    fn diffusion(&self, x: f64, _t: f64) -> f64 {
        self.params.gamma * x.sqrt()
    }

    fn name(&self) -> &str {
        "Cox-Ingersoll-Ross"
    }

    fn admissible(&self, x: f64) -> bool {
        x.is_finite() && x >= 0.0
    }

    fn project(&self, x: f64) -> f64 {
        match self.boundary {
            CirBoundary::Reject => x,
            CirBoundary::Truncate => x.max(0.0),
            CirBoundary::Reflect => x.abs(),
        }
    }
}

/// Simulate CIR short rates, rejecting any path that turns negative
///
/// Build a [`Cir`] with [`Cir::with_boundary`] and pass it to
/// [`simulate`] for the truncating or reflecting variants.
pub fn cox_ingersoll_ross<R: Rng + ?Sized>(
    params: CirParams,
    cfg: &SimConfig,
    rng: &mut R,
) -> SdeResult<SimulationResult> {
    simulate(&Cir::new(params)?, cfg, rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feller() {
        assert!(CirParams { lambda: 2.0, xi: 0.04, gamma: 0.3 }.satisfies_feller());
        assert!(!CirParams::default().satisfies_feller());
    }

    #[test]
    fn test_invalid_parameters() {
        let bad = CirParams { gamma: -0.1, ..Default::default() };
        assert!(Cir::new(bad).is_err());
        let bad = CirParams { lambda: f64::INFINITY, ..Default::default() };
        assert!(Cir::new(bad).is_err());
    }

    #[test]
    fn test_projection_policies() {
        let params = CirParams::default();
        let reject = Cir::with_boundary(params, CirBoundary::Reject).unwrap();
        let truncate = Cir::with_boundary(params, CirBoundary::Truncate).unwrap();
        let reflect = Cir::with_boundary(params, CirBoundary::Reflect).unwrap();

        assert_eq!(reject.project(-0.01), -0.01);
        assert!(!reject.admissible(-0.01));
        assert_eq!(truncate.project(-0.01), 0.0);
        assert_eq!(reflect.project(-0.01), 0.01);
        assert_eq!(reflect.project(0.02), 0.02);
        assert!(reject.admissible(0.0));
    }

    #[test]
    fn test_step_with_dw_applies_boundary() {
        let truncate = Cir::with_boundary(CirParams::default(), CirBoundary::Truncate).unwrap();
        let mut x = 0.01;
        truncate.step_with_dw(&mut x, 0.0, 0.01, -1.0);
        assert_eq!(x, 0.0);
    }
}
