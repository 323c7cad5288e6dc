// src/solvers/euler_maruyama.rs
//! Euler-Maruyama Scheme for SDE Integration
//!
//! # Mathematical Framework
//!
//! For a general SDE:
//! ```text
//! dX_t = a(X_t, t) dt + b(X_t, t) dW_t
//! ```
//!
//! The Euler-Maruyama scheme provides the discretization:
//! ```text
//! X_{n+1} = X_n + a(X_n, t_n) Δt + b(X_n, t_n) ΔW_n
//! ```
//!
//! Where:
//! - `a(x,t)` is the drift coefficient
//! - `b(x,t)` is the diffusion coefficient
//! - `ΔW_n ~ N(0, Δt)` are independent normal increments
//!
//! # Convergence Properties
//!
//! - **Strong convergence**: Order 0.5 in step size
//! - **Weak convergence**: Order 1.0 in step size
//! - **Stability**: Conditionally stable (depends on drift/diffusion)
//!
//! The explicit scheme can leave the state space of a model (a square-root
//! diffusion stepping below zero, an unstable drift blowing up). Every new
//! row is checked with [`StochasticProcess::admissible`] and the first bad
//! cell aborts the integration.

use crate::error::{SdeError, SdeResult};
use crate::models::model::StochasticProcess;
use crate::rng;
use crate::solvers::time_grid::TimeGrid;
use ndarray::{s, Array2, ArrayView1, ArrayViewMut1, Zip};
use rand::Rng;

/// Euler-Maruyama numerical scheme for SDE integration
#[derive(Debug, Clone, Copy, Default)]
pub struct EulerMaruyama;

impl EulerMaruyama {
    /// Single scalar Euler-Maruyama step drawing its own increment
    pub fn step<M: StochasticProcess + ?Sized, R: Rng + ?Sized>(
        model: &M,
        x: &mut f64,
        t: f64,
        dt: f64,
        rng: &mut R,
    ) {
        let dw = dt.sqrt() * rng::get_normal_draw(rng);
        model.step_with_dw(x, t, dt, dw);
    }

    /// Advance every path by one step at once
    ///
    /// `next[j] = project(current[j] + a(current[j], t) Δt + b(current[j], t) dw[j])`
    pub fn step_row<M: StochasticProcess + ?Sized>(
        model: &M,
        current: ArrayView1<'_, f64>,
        next: ArrayViewMut1<'_, f64>,
        t: f64,
        dt: f64,
        dw: ArrayView1<'_, f64>,
    ) {
        Zip::from(next)
            .and(current)
            .and(dw)
            .for_each(|x_next, &x, &w| {
                *x_next = model.project(x + model.drift(x, t) * dt + model.diffusion(x, t) * w);
            });
    }

    /// Integrate all paths over `grid` from the common start value `x0`
    ///
    /// `increments` must have at least `grid.steps()` rows; its column count
    /// sets the number of paths. Returns the `(grid.n_points(), n_sim)` path matrix.
    pub fn integrate<M: StochasticProcess + ?Sized>(
        model: &M,
        grid: &TimeGrid,
        x0: f64,
        increments: &Array2<f64>,
    ) -> SdeResult<Array2<f64>> {
        let steps = grid.steps();
        let (dw_rows, n_sim) = increments.dim();
        if dw_rows < steps {
            return Err(SdeError::InvalidConfiguration {
                field: "increments".to_string(),
                reason: format!("{} rows cannot drive {} steps", dw_rows, steps),
            });
        }

        if !model.admissible(x0) {
            return Err(SdeError::InvalidState {
                model: model.name().to_string(),
                step: 0,
                time: grid.t0(),
                path: 0,
                value: x0,
            });
        }

        let mut paths = Array2::<f64>::zeros((grid.n_points(), n_sim));
        paths.row_mut(0).fill(x0);

        let dt = grid.delta_t();
        for i in 0..steps {
            let t = grid.time(i);
            let (current, mut next) = paths.multi_slice_mut((s![i, ..], s![i + 1, ..]));
            Self::step_row(model, current.view(), next.view_mut(), t, dt, increments.row(i));

            if let Some((path, &value)) = next.iter().enumerate().find(|(_, &x)| !model.admissible(x)) {
                return Err(SdeError::InvalidState {
                    model: model.name().to_string(),
                    step: i + 1,
                    time: grid.time(i + 1),
                    path,
                    value,
                });
            }
        }

        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    struct Linear {
        a: f64,
        b: f64,
    }

    impl StochasticProcess for Linear {
        fn drift(&self, _x: f64, _t: f64) -> f64 {
            self.a
        }
        fn diffusion(&self, _x: f64, _t: f64) -> f64 {
            self.b
        }
        fn name(&self) -> &str {
            "linear"
        }
    }

    struct Positive;

    impl StochasticProcess for Positive {
        fn drift(&self, _x: f64, _t: f64) -> f64 {
            0.0
        }
        fn diffusion(&self, _x: f64, _t: f64) -> f64 {
            1.0
        }
        fn name(&self) -> &str {
            "positive"
        }
        fn admissible(&self, x: f64) -> bool {
            x >= 0.0
        }
    }

    #[test]
    fn test_integrate_matches_hand_computation() {
        let model = Linear { a: 2.0, b: 3.0 };
        let grid = TimeGrid::new(0.0, 0.2, 0.1).unwrap();
        let dw = array![[0.1, -0.1], [0.2, 0.0], [9.9, 9.9]];

        let paths = EulerMaruyama::integrate(&model, &grid, 1.0, &dw).unwrap();

        assert_eq!(paths.dim(), (3, 2));
        assert_eq!(paths.row(0).to_vec(), vec![1.0, 1.0]);
        // 1 + 2*0.1 + 3*0.1 = 1.5 ; 1 + 0.2 - 0.3 = 0.9
        assert!((paths[[1, 0]] - 1.5).abs() < 1e-12);
        assert!((paths[[1, 1]] - 0.9).abs() < 1e-12);
        // 1.5 + 0.2 + 0.6 = 2.3 ; 0.9 + 0.2 = 1.1
        assert!((paths[[2, 0]] - 2.3).abs() < 1e-12);
        assert!((paths[[2, 1]] - 1.1).abs() < 1e-12);
    }

    #[test]
    fn test_row_update_equals_scalar_update() {
        let model = Linear { a: -0.4, b: 0.7 };
        let grid = TimeGrid::new(0.0, 1.0, 0.25).unwrap();
        let mut rng = rng::seed_rng_from_u64(11);
        let dw = rng::brownian_increments(grid.steps(), 5, grid.delta_t(), &mut rng).unwrap();

        let paths = EulerMaruyama::integrate(&model, &grid, 0.3, &dw).unwrap();

        for j in 0..5 {
            let mut x = 0.3;
            for i in 0..grid.steps() {
                model.step_with_dw(&mut x, grid.time(i), grid.delta_t(), dw[[i, j]]);
                assert_eq!(paths[[i + 1, j]], x);
            }
        }
    }

    #[test]
    fn test_inadmissible_state_is_reported() {
        let grid = TimeGrid::new(0.0, 0.3, 0.1).unwrap();
        let dw = array![[0.5, 0.5], [0.1, -2.0], [0.0, 0.0], [0.0, 0.0]];

        let err = EulerMaruyama::integrate(&Positive, &grid, 1.0, &dw).unwrap_err();
        match err {
            SdeError::InvalidState {
                step, path, value, ..
            } => {
                assert_eq!(step, 2);
                assert_eq!(path, 1);
                assert!((value + 0.5).abs() < 1e-12);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_inadmissible_start_is_reported() {
        let grid = TimeGrid::new(0.0, 0.1, 0.1).unwrap();
        let dw = Array2::zeros((2, 1));
        let err = EulerMaruyama::integrate(&Positive, &grid, -1.0, &dw).unwrap_err();
        assert!(matches!(err, SdeError::InvalidState { step: 0, .. }));
    }

    #[test]
    fn test_short_increment_matrix_rejected() {
        let grid = TimeGrid::new(0.0, 1.0, 0.1).unwrap();
        let dw = Array2::zeros((3, 2));
        let result = EulerMaruyama::integrate(&Linear { a: 0.0, b: 1.0 }, &grid, 0.0, &dw);
        assert!(matches!(result, Err(SdeError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_scalar_step_is_reproducible() {
        let model = Linear { a: 0.1, b: 0.2 };
        let mut rng1 = rng::seed_rng_from_u64(5);
        let mut rng2 = rng::seed_rng_from_u64(5);
        let (mut x1, mut x2) = (1.0, 1.0);
        for k in 0..10 {
            EulerMaruyama::step(&model, &mut x1, k as f64 * 0.01, 0.01, &mut rng1);
            EulerMaruyama::step(&model, &mut x2, k as f64 * 0.01, 0.01, &mut rng2);
        }
        assert_eq!(x1, x2);
    }
}
