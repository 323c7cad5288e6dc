// src/models/brownian.rs
use super::model::StochasticProcess;
use crate::error::SdeResult;
use crate::mc::mc_engine::{simulate, SimConfig};
use crate::output::SimulationResult;
use rand::Rng;

/// Standard Brownian motion `dB_t = dW_t`
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardBrownianMotion;

impl StochasticProcess for StandardBrownianMotion {
    fn drift(&self, _x: f64, _t: f64) -> f64 {
        0.0
    }

    fn diffusion(&self, _x: f64, _t: f64) -> f64 {
        1.0
    }

    fn name(&self) -> &str {
        "Standard Brownian Motion"
    }
}

/// Simulate `cfg.n_sim` Brownian paths started at `cfg.x0`
pub fn standard_brownian_motion<R: Rng + ?Sized>(
    cfg: &SimConfig,
    rng: &mut R,
) -> SdeResult<SimulationResult> {
    simulate(&StandardBrownianMotion, cfg, rng)
}
