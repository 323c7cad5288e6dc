// src/mc/mc_engine.rs
use crate::error::{validation::*, SdeError, SdeResult};
use crate::math_utils::Timer;
use crate::mc::payoffs::Payoff;
use crate::models::model::StochasticProcess;
use crate::output::SimulationResult;
use crate::plot::{ChartRenderer, TracingChartRenderer};
use crate::rng;
use crate::solvers::euler_maruyama::EulerMaruyama;
use crate::solvers::time_grid::TimeGrid;
use bitflags::bitflags;
use rand::Rng;
use tracing::{debug, info};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SimFlags: u32 {
        const NONE    = 0;
        /// Log elapsed time and result shape at `info` level
        const VERBOSE = 1 << 0;
        /// Hand the finished paths to a chart renderer
        const PLOT    = 1 << 1;
    }
}

impl Default for SimFlags {
    fn default() -> Self {
        SimFlags::NONE
    }
}

/// Parameters shared by every simulated model
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub t0: f64,
    pub t_n: f64,
    pub delta_t: f64,
    pub x0: f64,
    pub n_sim: usize,
    pub flags: SimFlags,
    /// Chart and log title; each model supplies its own name when `None`
    pub title: Option<String>,
}

impl SimConfig {
    /// Validate the simulation configuration
    pub fn validate(&self) -> SdeResult<()> {
        validate_horizon(self.t0, self.t_n)?;
        validate_positive("delta_t", self.delta_t)?;
        validate_finite("delta_t", self.delta_t)?;
        validate_finite("x0", self.x0)?;
        validate_paths(self.n_sim)?;

        let rows = TimeGrid::step_count(self.t0, self.t_n, self.delta_t).saturating_add(1);
        validate_grid_size(rows, self.n_sim)?;
        Ok(())
    }

    pub fn time_grid(&self) -> SdeResult<TimeGrid> {
        TimeGrid::new(self.t0, self.t_n, self.delta_t)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            t0: 0.0,
            t_n: 100.0,
            delta_t: 0.001,
            x0: 0.0,
            n_sim: 10,
            flags: SimFlags::NONE,
            title: None,
        }
    }
}

/// Simulate `cfg.n_sim` Euler-Maruyama paths of `process`
///
/// # Math Framework
///
/// ```text
/// X_{i+1} = X_i + a(X_i, t_i) Δt + b(X_i, t_i) ΔW_i,    X_0 = cfg.x0
/// ```
/// on the grid `t_i = t0 + iΔt`, `i = 0..=⌈(t_N - t0)/Δt⌉`, with all paths
/// advanced together one row at a time.
///
/// # Errors
///
/// Returns `SdeError` for:
/// - Invalid configuration (empty horizon, non-positive step, zero paths)
/// - A path leaving the admissible states of `process`
///
/// Plot requests go to [`TracingChartRenderer`]; use
/// [`simulate_with_renderer`] to supply another backend.
pub fn simulate<P, R>(process: &P, cfg: &SimConfig, rng: &mut R) -> SdeResult<SimulationResult>
where
    P: StochasticProcess + ?Sized,
    R: Rng + ?Sized,
{
    simulate_with_renderer(process, cfg, rng, &TracingChartRenderer)
}

pub fn simulate_with_renderer<P, R>(
    process: &P,
    cfg: &SimConfig,
    rng: &mut R,
    renderer: &dyn ChartRenderer,
) -> SdeResult<SimulationResult>
where
    P: StochasticProcess + ?Sized,
    R: Rng + ?Sized,
{
    cfg.validate()?;
    let timer = Timer::new();

    let grid = cfg.time_grid()?;
    let increments = rng::brownian_increments(grid.steps(), cfg.n_sim, grid.delta_t(), rng)?;
    let paths = EulerMaruyama::integrate(process, &grid, cfg.x0, &increments)?;

    let title = cfg
        .title
        .clone()
        .unwrap_or_else(|| process.name().to_string());
    let result = SimulationResult::new(title, grid.to_array(), paths)?;

    let elapsed_ms = timer.elapsed_ms();
    let (rows, columns) = result.shape();
    if cfg.flags.contains(SimFlags::VERBOSE) {
        info!(
            model = process.name(),
            elapsed_ms,
            rows,
            columns,
            elements = rows * columns,
            "Simulation finished"
        );
    } else {
        debug!(model = process.name(), elapsed_ms, rows, columns, "Simulation finished");
    }

    if cfg.flags.contains(SimFlags::PLOT) {
        renderer.render(&result.chart("t", "X_t"))?;
    }

    Ok(result)
}

/// Discounted Monte Carlo estimate with its standard error
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct McEstimate {
    pub price: f64,
    pub std_error: f64,
}

/// Price an option over simulated asset paths
///
/// # Math Framework
///
/// With `τ = t_last - t_0` and payoffs `Y_j` computed on every path column:
/// ```text
/// price     = e^(-rτ) * mean(Y)
/// std_error = e^(-rτ) * sd(Y) / √n
/// ```
/// The paths are expected to follow the risk-neutral dynamics with rate `r`,
/// e.g. a geometric Brownian motion simulated with drift `r`.
///
/// # Errors
///
/// Returns `SdeError::NumericalInstability` if the estimate is not finite.
pub fn mc_price_option(result: &SimulationResult, payoff: &Payoff, r: f64) -> SdeResult<McEstimate> {
    validate_finite("r", r)?;

    let times = result.times();
    let tau = times[times.len() - 1] - times[0];
    let discount = (-r * tau).exp();

    let payoffs: Vec<f64> = result
        .paths()
        .columns()
        .into_iter()
        .map(|path| payoff.calculate(&path.to_vec()))
        .collect();

    let n = payoffs.len() as f64;
    let mean = payoffs.iter().sum::<f64>() / n;
    let variance = if payoffs.len() > 1 {
        payoffs.iter().map(|y| (y - mean).powi(2)).sum::<f64>() / (n - 1.0)
    } else {
        0.0
    };

    let price = discount * mean;
    let std_error = discount * (variance / n).sqrt();

    if !price.is_finite() {
        return Err(SdeError::NumericalInstability {
            method: "Monte Carlo".to_string(),
            reason: format!("Price estimate is not finite: {}", price),
        });
    }
    if !std_error.is_finite() {
        return Err(SdeError::NumericalInstability {
            method: "Monte Carlo".to_string(),
            reason: format!("Standard error is not finite: {}", std_error),
        });
    }

    debug!(paths = payoffs.len(), tau, price, std_error, "Monte Carlo option price");
    Ok(McEstimate { price, std_error })
}
