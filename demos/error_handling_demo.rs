// demos/error_handling_demo.rs
use sde_sim::analytics::vasicek_bond::simulate_bond_prices;
use sde_sim::error::SdeError;
use sde_sim::mc::mc_engine::{simulate, SimConfig};
use sde_sim::models::{
    cox_ingersoll_ross, geometric_brownian_motion, Cir, CirBoundary, CirParams, VasicekParams,
};
use sde_sim::rng::seed_rng_from_u64;

fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    println!("sde-sim: rejected inputs and inadmissible states\n");

    let mut rng = seed_rng_from_u64(42);

    // t_n before t0
    println!("[horizon] t0 = 5, t_n = 1");
    let backwards = SimConfig {
        t0: 5.0,
        t_n: 1.0,
        ..Default::default()
    };
    match geometric_brownian_motion(0.05, 0.2, &backwards, &mut rng) {
        Ok(_) => println!("    accepted (unexpected)"),
        Err(e) => println!("    rejected: {}\n", e),
    }

    println!("[step size] delta_t = 0");
    let zero_step = SimConfig {
        delta_t: 0.0,
        ..Default::default()
    };
    match geometric_brownian_motion(0.05, 0.2, &zero_step, &mut rng) {
        Ok(_) => println!("    accepted (unexpected)"),
        Err(e) => println!("    rejected: {}\n", e),
    }

    // B(t, T) divides by k
    println!("[bond pricing] Vasicek k = 0");
    let flat = VasicekParams {
        k: 0.0,
        ..Default::default()
    };
    let cfg = SimConfig {
        delta_t: 0.01,
        ..Default::default()
    };
    match simulate_bond_prices(flat, 10.0, &cfg, &mut rng) {
        Ok(_) => println!("    accepted (unexpected)"),
        Err(e) => println!("    rejected: {}\n", e),
    }

    // 2λξ = 0.002 < γ² = 4, far outside the Feller region
    println!("[CIR, reject] rate crossing zero");
    let wild = CirParams {
        lambda: 0.1,
        xi: 0.01,
        gamma: 2.0,
    };
    let cir_cfg = SimConfig {
        t_n: 10.0,
        delta_t: 0.1,
        x0: 0.01,
        n_sim: 100,
        ..Default::default()
    };
    match cox_ingersoll_ross(wild, &cir_cfg, &mut rng) {
        Ok(_) => println!("    accepted (unexpected)"),
        Err(e @ SdeError::InvalidState { .. }) => println!("    rejected: {}\n", e),
        Err(e) => println!("    wrong error kind: {}\n", e),
    }

    println!("[CIR, truncate] same parameters");
    let truncated = Cir::with_boundary(wild, CirBoundary::Truncate).expect("Valid parameters");
    match simulate(&truncated, &cir_cfg, &mut rng) {
        Ok(result) => println!(
            "    {} rows x {} columns, min rate {:.6}\n",
            result.n_rows(),
            result.n_cols(),
            result.paths().iter().cloned().fold(f64::INFINITY, f64::min)
        ),
        Err(e) => println!("    failed: {}\n", e),
    }

    println!("done");
}
