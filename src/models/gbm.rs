// src/models/gbm.rs
use super::model::StochasticProcess;
use crate::error::{validation::*, SdeResult};
use crate::mc::mc_engine::{simulate, SimConfig};
use crate::output::SimulationResult;
use rand::Rng;

/// Geometric Brownian motion `dX_t = r X_t dt + σ X_t dW_t`
#[derive(Debug, Clone, Copy)]
pub struct Gbm {
    pub r: f64,
    pub sigma: f64,
}

impl Gbm {
    pub fn new(r: f64, sigma: f64) -> SdeResult<Self> {
        validate_finite("r", r)?;
        validate_finite("sigma", sigma)?;
        validate_non_negative("sigma", sigma)?;
        Ok(Gbm { r, sigma })
    }

    /// Exact log-normal transition, for comparison with the discretized path
    pub fn exact_step(&self, x_t: f64, dt: f64, normal_draw: f64) -> f64 {
        x_t * ((self.r - 0.5 * self.sigma * self.sigma) * dt + self.sigma * dt.sqrt() * normal_draw)
            .exp()
    }
}

impl Default for Gbm {
    fn default() -> Self {
        Gbm { r: 0.1, sigma: 0.2 }
    }
}

impl StochasticProcess for Gbm {
    fn drift(&self, x: f64, _t: f64) -> f64 {
        self.r * x
    }

    fn diffusion(&self, x: f64, _t: f64) -> f64 {
        self.sigma * x
    }

    fn name(&self) -> &str {
        "Geometric Brownian Motion"
    }
}

/// Simulate geometric Brownian motion with growth rate `r` and volatility `sigma`
pub fn geometric_brownian_motion<R: Rng + ?Sized>(
    r: f64,
    sigma: f64,
    cfg: &SimConfig,
    rng: &mut R,
) -> SdeResult<SimulationResult> {
    simulate(&Gbm::new(r, sigma)?, cfg, rng)
}
