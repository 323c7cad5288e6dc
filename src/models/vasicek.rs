// src/models/vasicek.rs
use super::model::StochasticProcess;
use crate::error::{validation::*, SdeResult};
use crate::mc::mc_engine::{simulate, SimConfig};
use crate::output::SimulationResult;
use rand::Rng;

/// Vasicek short-rate parameters for `dr_t = k(θ - r_t) dt + σ dW_t`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VasicekParams {
    pub k: f64,     // Mean reversion speed
    pub theta: f64, // Long-run mean
    pub sigma: f64, // Volatility
}

impl Default for VasicekParams {
    fn default() -> Self {
        VasicekParams {
            k: 0.1,
            theta: 0.2,
            sigma: 0.2,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Vasicek {
    pub params: VasicekParams,
}

impl Vasicek {
    pub fn new(params: VasicekParams) -> SdeResult<Self> {
        validate_finite("k", params.k)?;
        validate_finite("theta", params.theta)?;
        validate_finite("sigma", params.sigma)?;
        validate_non_negative("sigma", params.sigma)?;
        Ok(Vasicek { params })
    }

    /// `E[r_t | r_0]` of the exact process, `t` measured from the start
    pub fn mean(&self, r0: f64, t: f64) -> f64 {
        let VasicekParams { k, theta, .. } = self.params;
        theta + (r0 - theta) * (-k * t).exp()
    }
}

impl StochasticProcess for Vasicek {
    fn drift(&self, x: f64, _t: f64) -> f64 {
        self.params.k * (self.params.theta - x)
    }

    fn diffusion(&self, _x: f64, _t: f64) -> f64 {
        self.params.sigma
    }

    fn name(&self) -> &str {
        "Vasicek"
    }
}

/// Simulate Vasicek short rates started at `cfg.x0`
pub fn vasicek<R: Rng + ?Sized>(
    params: VasicekParams,
    cfg: &SimConfig,
    rng: &mut R,
) -> SdeResult<SimulationResult> {
    simulate(&Vasicek::new(params)?, cfg, rng)
}
