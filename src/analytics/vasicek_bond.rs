// src/analytics/vasicek_bond.rs
//! Zero-Coupon Bond Prices under the Vasicek Model
//!
//! # Mathematical Framework
//!
//! For the short rate `dr_t = k(θ - r_t) dt + σ dW_t` the price at `t` of a
//! bond paying 1 at `T` is affine in `r_t`:
//! ```text
//! P(t, T, r) = A(t, T) e^(-r B(t, T))
//!
//! B(t, T) = (1 - e^(-k(T-t))) / k
//! A(t, T) = exp[(θ - σ²/(2k²)) (B(t, T) - T + t) - (σ²/(4k)) B(t, T)²]
//! ```
//!
//! `B(T, T) = 0`, hence `P(T, T, r) = 1` for every `r`.
//!
//! The scalar functions here do not validate `k`; `k = 0` divides by zero.
//! [`simulate_bond_prices`] rejects it before simulating.

use crate::error::{validation::*, SdeResult};
use crate::mc::mc_engine::{simulate, SimConfig, SimFlags};
use crate::models::vasicek::{Vasicek, VasicekParams};
use crate::output::{BondPriceTable, SimulationResult};
use crate::plot::{ChartRenderer, TracingChartRenderer};
use rand::Rng;
use tracing::debug;

pub const DEFAULT_TITLE: &str = "Bond Prices (Vasicek)";

pub fn b(t: f64, maturity: f64, k: f64) -> f64 {
    (1.0 - (-k * (maturity - t)).exp()) / k
}

pub fn a(t: f64, maturity: f64, k: f64, theta: f64, sigma: f64) -> f64 {
    let b = b(t, maturity, k);
    let sigma2 = sigma * sigma;
    ((theta - sigma2 / (2.0 * k * k)) * (b - maturity + t) - (sigma2 / (4.0 * k)) * b * b).exp()
}

/// Price at `t` of the zero-coupon bond maturing at `maturity`, short rate `r`
pub fn zero_coupon_price(t: f64, maturity: f64, r: f64, k: f64, theta: f64, sigma: f64) -> f64 {
    a(t, maturity, k, theta, sigma) * (-r * b(t, maturity, k)).exp()
}

/// Simulate Vasicek short rates up to `maturity` and price the bond on every path
///
/// The short-rate table covers `[cfg.t0, maturity]` (`cfg.t_n` is ignored)
/// and is never plotted; the bond table is plotted when `cfg.flags` has
/// `PLOT`. Returns `(bond_prices, short_rates)`, both of the same shape.
///
/// # Errors
///
/// - `InvalidParameters` for `k = 0` or a non-finite maturity
/// - Anything [`simulate`] reports for the short-rate paths
pub fn simulate_bond_prices<R: Rng + ?Sized>(
    params: VasicekParams,
    maturity: f64,
    cfg: &SimConfig,
    rng: &mut R,
) -> SdeResult<(BondPriceTable, SimulationResult)> {
    simulate_bond_prices_with_renderer(params, maturity, cfg, rng, &TracingChartRenderer)
}

pub fn simulate_bond_prices_with_renderer<R: Rng + ?Sized>(
    params: VasicekParams,
    maturity: f64,
    cfg: &SimConfig,
    rng: &mut R,
    renderer: &dyn ChartRenderer,
) -> SdeResult<(BondPriceTable, SimulationResult)> {
    validate_nonzero("k", params.k)?;
    validate_finite("maturity", maturity)?;
    let model = Vasicek::new(params)?;

    let title = cfg.title.clone().unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let rate_cfg = SimConfig {
        t_n: maturity,
        flags: cfg.flags - SimFlags::PLOT,
        title: Some(title.clone()),
        ..cfg.clone()
    };
    let short_rates = simulate(&model, &rate_cfg, rng)?;

    let VasicekParams { k, theta, sigma } = params;
    let bond_prices = short_rates.map_values(title, |t, r| {
        zero_coupon_price(t, maturity, r, k, theta, sigma)
    });
    debug!(
        maturity,
        rows = bond_prices.n_rows(),
        columns = bond_prices.n_cols(),
        "Bond prices computed"
    );

    if cfg.flags.contains(SimFlags::PLOT) {
        let y_label = format!("ZCB(t, {})", maturity);
        renderer.render(&bond_prices.chart("t", &y_label))?;
    }

    Ok((bond_prices, short_rates))
}
