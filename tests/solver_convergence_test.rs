// tests/solver_convergence_test.rs
use sde_sim::mc::mc_engine::{simulate, SimConfig};
use sde_sim::models::gbm::Gbm;
use sde_sim::models::vasicek::{Vasicek, VasicekParams};
use sde_sim::rng;
use sde_sim::solvers::euler_maruyama::EulerMaruyama;
use sde_sim::solvers::time_grid::TimeGrid;

// Exact solution path for Geometric Brownian Motion driven by the same increments
fn gbm_exact_terminal(gbm: &Gbm, x0: f64, dt: f64, increments: &[f64]) -> f64 {
    let sqrt_dt = dt.sqrt();
    increments
        .iter()
        .fold(x0, |x, &dw| gbm.exact_step(x, dt, dw / sqrt_dt))
}

#[test]
fn test_euler_maruyama_vasicek_weak_convergence() {
    let params = VasicekParams {
        k: 0.5,
        theta: 0.1,
        sigma: 0.2,
    };
    let model = Vasicek::new(params).unwrap();
    let x0 = 100.0;
    let t_end = 1.0;
    let num_paths = 20_000;

    let mut errors = Vec::new();
    for num_steps in &[10, 20, 40, 80] {
        let cfg = SimConfig {
            t_n: t_end,
            delta_t: t_end / *num_steps as f64,
            x0,
            n_sim: num_paths,
            ..Default::default()
        };
        let result = simulate(&model, &cfg, &mut rng::seed_rng_from_u64(42)).unwrap();

        let simulated_mean = result.terminal_values().sum() / num_paths as f64;
        let abs_error = (simulated_mean - model.mean(x0, t_end)).abs();
        errors.push(abs_error);
    }

    println!("\nEuler-Maruyama Vasicek weak errors: {:?}", errors);

    // Assert weak convergence: error should decrease as num_steps increases
    for i in 0..(errors.len() - 1) {
        assert!(
            errors[i] > errors[i + 1],
            "Euler-Maruyama did not converge (weak) as expected at step {}",
            i
        );
    }
    assert!(
        *errors.last().unwrap() < 0.15,
        "Euler-Maruyama final absolute error ({}) is too high for weak convergence",
        errors.last().unwrap()
    );
}

#[test]
fn test_euler_maruyama_gbm_strong_convergence() {
    let x0 = 100.0;
    let gbm = Gbm::new(0.05, 0.2).unwrap();
    let t_end = 1.0;
    let num_paths = 2_000;

    let mut rms_errors = Vec::new();
    for num_steps in &[10, 20, 40, 80, 160] {
        let grid = TimeGrid::new(0.0, t_end, t_end / *num_steps as f64).unwrap();
        let dt = grid.delta_t();
        let mut rng = rng::seed_rng_from_u64(42);
        let increments = rng::brownian_increments(grid.steps(), num_paths, dt, &mut rng).unwrap();

        let paths = EulerMaruyama::integrate(&gbm, &grid, x0, &increments).unwrap();

        let mut sum_sq_diff = 0.0;
        for j in 0..num_paths {
            let dw: Vec<f64> = increments.column(j).iter().take(grid.steps()).copied().collect();
            let exact = gbm_exact_terminal(&gbm, x0, dt, &dw);
            sum_sq_diff += (paths[[grid.steps(), j]] - exact).powi(2);
        }
        rms_errors.push((sum_sq_diff / num_paths as f64).sqrt());
    }

    println!(
        "\nEuler-Maruyama GBM Strong Convergence RMSEs: {:?}",
        rms_errors
    );

    // Strong order 0.5: halving dt shrinks the RMSE by about √2
    for i in 0..(rms_errors.len() - 1) {
        let ratio = rms_errors[i] / rms_errors[i + 1];
        assert!(
            ratio > 1.15 && ratio < 1.7,
            "Strong convergence ratio not as expected at step {}: {}",
            i,
            ratio
        );
    }
    assert!(
        *rms_errors.last().unwrap() < 1.0,
        "Euler-Maruyama final RMSE ({}) is too high for strong convergence",
        rms_errors.last().unwrap()
    );
}
