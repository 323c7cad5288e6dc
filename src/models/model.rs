// src/models/model.rs
/// A scalar Itô process `dX_t = a(X_t, t) dt + b(X_t, t) dW_t`
///
/// Integrators only ever see a process through this trait, so any drift and
/// diffusion pair can be simulated without changes to the scheme.
pub trait StochasticProcess {
    fn drift(&self, x: f64, t: f64) -> f64;

    fn diffusion(&self, x: f64, t: f64) -> f64;

    /// Display name, used as the default chart and log title
    fn name(&self) -> &str;

    /// Whether `x` lies in the state space of the process
    fn admissible(&self, x: f64) -> bool {
        x.is_finite()
    }

    /// Map an updated state back onto the state space (identity by default)
    fn project(&self, x: f64) -> f64 {
        x
    }

    /// One Euler-Maruyama step with a caller-supplied increment `dw ~ N(0, dt)`
    fn step_with_dw(&self, x_current: &mut f64, t_current: f64, dt: f64, dw: f64) {
        *x_current = self.project(
            *x_current + self.drift(*x_current, t_current) * dt
                + self.diffusion(*x_current, t_current) * dw,
        );
    }
}
