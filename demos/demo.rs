// demos/demo.rs
use sde_sim::analytics::bs_analytic;
use sde_sim::analytics::bs_fd::BlackScholesFd;
use sde_sim::analytics::vasicek_bond::simulate_bond_prices;
use sde_sim::mc::mc_engine::{mc_price_option, simulate, SimConfig, SimFlags};
use sde_sim::mc::payoffs::Payoff;
use sde_sim::models::{
    geometric_brownian_motion, standard_brownian_motion, vasicek, Cir, CirBoundary, CirParams,
    VasicekParams,
};
use sde_sim::output::SimulationResult;
use sde_sim::rng;

fn summarize(result: &SimulationResult) {
    let terminal = result.terminal_values();
    let mean = terminal.sum() / terminal.len() as f64;
    let (min, max) = terminal
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)));
    println!(
        "{:<28} {:>6} rows x {:>3} cols   X_T mean {:>10.4}  min {:>10.4}  max {:>10.4}",
        result.title(),
        result.n_rows(),
        result.n_cols(),
        mean,
        min,
        max
    );
}

fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    println!("Running sde-sim Euler-Maruyama Demo\n");

    let mut rng = rng::seed_rng_from_u64(42);
    let cfg = SimConfig {
        t_n: 10.0,
        delta_t: 0.01,
        n_sim: 50,
        flags: SimFlags::VERBOSE | SimFlags::PLOT,
        ..Default::default()
    };

    let brownian = standard_brownian_motion(&cfg, &mut rng).expect("Valid configuration");
    summarize(&brownian);

    let gbm_cfg = SimConfig {
        x0: 100.0,
        ..cfg.clone()
    };
    let gbm = geometric_brownian_motion(0.1, 0.2, &gbm_cfg, &mut rng).expect("Valid configuration");
    summarize(&gbm);

    let rate_cfg = SimConfig {
        x0: 0.05,
        ..cfg.clone()
    };
    let cir = Cir::with_boundary(CirParams::default(), CirBoundary::Truncate)
        .expect("Valid parameters");
    let cir_rates = simulate(&cir, &rate_cfg, &mut rng).expect("Valid configuration");
    summarize(&cir_rates);

    let vasicek_rates =
        vasicek(VasicekParams::default(), &rate_cfg, &mut rng).expect("Valid configuration");
    summarize(&vasicek_rates);

    println!("\nZero-coupon bond prices (Vasicek, T = 10)");
    let (bonds, short_rates) = simulate_bond_prices(VasicekParams::default(), 10.0, &rate_cfg, &mut rng)
        .expect("Valid configuration");
    summarize(&short_rates);
    let bond_mean = bonds.mean_path();
    for &i in &[0usize, 250, 500, 750, 1000] {
        println!(
            "  t = {:>5.2}   mean P(t, T) = {:.6}",
            bonds.times()[i],
            bond_mean[i]
        );
    }

    println!("\nEuropean options on simulated GBM paths (S0 = 100, K = 100, r = 5%, σ = 20%, T = 1)");
    let option_cfg = SimConfig {
        t_n: 1.0,
        delta_t: 1.0 / 252.0,
        x0: 100.0,
        n_sim: 50_000,
        flags: SimFlags::VERBOSE,
        ..Default::default()
    };
    let paths = geometric_brownian_motion(0.05, 0.2, &option_cfg, &mut rng)
        .expect("Valid configuration");
    let horizon = paths.times()[paths.n_rows() - 1];

    for (name, payoff, analytic) in [
        (
            "European Call",
            Payoff::EuropeanCall { k: 100.0 },
            Some(bs_analytic::bs_call_price(100.0, 100.0, 0.05, 0.2, horizon)),
        ),
        (
            "European Put",
            Payoff::EuropeanPut { k: 100.0 },
            Some(bs_analytic::bs_put_price(100.0, 100.0, 0.05, 0.2, horizon)),
        ),
        ("Asian Call", Payoff::AsianCall { k: 100.0 }, None),
    ] {
        let estimate = mc_price_option(&paths, &payoff, 0.05).expect("Finite estimate");
        match analytic {
            Some(bs) => println!(
                "  {:<14} MC {:.4} ± {:.4}   Black-Scholes {:.4}",
                name, estimate.price, estimate.std_error, bs
            ),
            None => println!(
                "  {:<14} MC {:.4} ± {:.4}",
                name, estimate.price, estimate.std_error
            ),
        }
    }

    let fd = BlackScholesFd::with_stable_grid(100.0, 100.0, 0.05, 0.2, 1.0, 2_000)
        .expect("Stable grid");
    println!(
        "  {:<14} PDE {:.4} on a {} x {} explicit grid",
        "European Call",
        fd.price(),
        fd.space_steps(),
        fd.time_steps()
    );
}
