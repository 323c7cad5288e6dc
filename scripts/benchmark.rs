// scripts/benchmark.rs
use sde_sim::analytics::vasicek_bond::simulate_bond_prices;
use sde_sim::math_utils::Timer;
use sde_sim::mc::mc_engine::{simulate, SimConfig};
use sde_sim::models::{Cir, CirBoundary, CirParams, Gbm, StandardBrownianMotion, Vasicek, VasicekParams};
use sde_sim::rng;
use sde_sim::{SdeResult, SimulationResult, StochasticProcess};
use std::env;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_cores: usize,
    rustc_flags: String,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_cores: num_cpus::get(),
            rustc_flags: env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string()),
        }
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    steps: usize,
    paths: usize,
    time_ms: f64,
    cells_per_sec: f64,
    terminal_mean: f64,
}

impl BenchmarkResult {
    fn from_run(name: &str, result: &SimulationResult, time_ms: f64) -> Self {
        let cells = (result.n_rows() * result.n_sim()) as f64;
        let terminal = result.terminal_values();
        BenchmarkResult {
            name: name.to_string(),
            steps: result.n_rows() - 1,
            paths: result.n_sim(),
            time_ms,
            cells_per_sec: cells / (time_ms / 1000.0),
            terminal_mean: terminal.sum() / terminal.len() as f64,
        }
    }
}

fn time_model<P: StochasticProcess>(model: &P, cfg: &SimConfig) -> SdeResult<BenchmarkResult> {
    let mut rng = rng::seed_rng_from_u64(42);
    let timer = Timer::new();
    let result = simulate(model, cfg, &mut rng)?;
    Ok(BenchmarkResult::from_run(model.name(), &result, timer.elapsed_ms()))
}

fn run_model_benchmarks() -> SdeResult<Vec<BenchmarkResult>> {
    let mut results = Vec::new();

    let gbm = Gbm::default();
    let cir = Cir::with_boundary(CirParams::default(), CirBoundary::Truncate)?;
    let vasicek = Vasicek::new(VasicekParams::default())?;

    let grid_configs = [(1_000, 1_000), (10_000, 100), (100_000, 10)];

    for &(steps, paths) in &grid_configs {
        println!("Running benchmarks with {} steps x {} paths...", steps, paths);
        let cfg = SimConfig {
            t_n: 1.0,
            delta_t: 1.0 / steps as f64,
            x0: 1.0,
            n_sim: paths,
            ..Default::default()
        };

        results.push(time_model(&StandardBrownianMotion, &cfg)?);
        results.push(time_model(&gbm, &cfg)?);
        results.push(time_model(&cir, &SimConfig { x0: 0.05, ..cfg.clone() })?);
        results.push(time_model(&vasicek, &SimConfig { x0: 0.05, ..cfg.clone() })?);

        let mut rng = rng::seed_rng_from_u64(42);
        let timer = Timer::new();
        let (bonds, _) = simulate_bond_prices(
            VasicekParams::default(),
            1.0,
            &SimConfig { x0: 0.05, ..cfg.clone() },
            &mut rng,
        )?;
        results.push(BenchmarkResult::from_run("Vasicek Bond Prices", &bonds, timer.elapsed_ms()));
    }

    Ok(results)
}

fn main() {
    println!("sde-sim Euler-Maruyama Benchmark Suite");
    println!("======================================\n");

    let system_info = SystemInfo::gather();
    println!("System Information:");
    println!("  OS: {}", system_info.os);
    println!("  CPU Cores: {}", system_info.cpu_cores);
    println!("  RUSTFLAGS: {}", system_info.rustc_flags);
    println!(
        "  Benchmark Date: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();

    let results = match run_model_benchmarks() {
        Ok(results) => results,
        Err(e) => {
            eprintln!("Benchmark failed: {}", e);
            std::process::exit(1);
        }
    };

    println!("\n{:=<96}", "");
    println!("BENCHMARK RESULTS");
    println!("{:=<96}", "");
    println!(
        "{:<28} {:>8} {:>8} {:>12} {:>18} {:>14}",
        "Model", "Steps", "Paths", "Time (ms)", "Cells/sec", "Mean X_T"
    );
    println!("{:-<96}", "");

    for result in &results {
        println!(
            "{:<28} {:>8} {:>8} {:>12.2} {:>18.0} {:>14.6}",
            result.name,
            result.steps,
            result.paths,
            result.time_ms,
            result.cells_per_sec,
            result.terminal_mean
        );
    }

    println!("{:=<96}", "");
    println!("\nBenchmark complete!");
    println!("To reproduce: cargo run --bin benchmark --release");
}
