// src/error.rs
use std::fmt;

/// Error types for the sde-sim library
#[derive(Debug, Clone, PartialEq)]
pub enum SdeError {
    /// Invalid parameter values
    InvalidParameters {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Invalid simulation configuration
    InvalidConfiguration { field: String, reason: String },

    /// A simulated state left the admissible domain of its model
    InvalidState {
        model: String,
        step: usize,
        time: f64,
        path: usize,
        value: f64,
    },

    /// Numerical instability in a derived quantity
    NumericalInstability { method: String, reason: String },

    /// RNG or random number generation error
    RandomGenerationError { reason: String },
}

impl fmt::Display for SdeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SdeError::InvalidParameters {
                parameter,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter '{}' = {}: {}",
                    parameter, value, constraint
                )
            }
            SdeError::InvalidConfiguration { field, reason } => {
                write!(f, "Invalid configuration for '{}': {}", field, reason)
            }
            SdeError::InvalidState {
                model,
                step,
                time,
                path,
                value,
            } => {
                write!(
                    f,
                    "{} produced inadmissible state {} at step {} (t = {}) on Simulation {}",
                    model,
                    value,
                    step,
                    time,
                    path + 1
                )
            }
            SdeError::NumericalInstability { method, reason } => {
                write!(f, "Numerical instability in {}: {}", method, reason)
            }
            SdeError::RandomGenerationError { reason } => {
                write!(f, "Random number generation error: {}", reason)
            }
        }
    }
}

impl std::error::Error for SdeError {}

/// Result type alias for sde-sim operations
pub type SdeResult<T> = Result<T, SdeError>;

/// Validation utilities
pub mod validation {
    use super::{SdeError, SdeResult};

    /// Largest number of cells (rows x columns) a single simulation may allocate
    pub const MAX_CELLS: usize = 1 << 28;

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> SdeResult<()> {
        if value <= 0.0 || value.is_nan() {
            Err(SdeError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> SdeResult<()> {
        if value < 0.0 || value.is_nan() {
            Err(SdeError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is not zero (used as a divisor)
    pub fn validate_nonzero(name: &str, value: f64) -> SdeResult<()> {
        if value == 0.0 {
            Err(SdeError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be non-zero".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> SdeResult<()> {
        if !value.is_finite() {
            Err(SdeError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that the horizon `[t0, t_n]` is non-empty
    pub fn validate_horizon(t0: f64, t_n: f64) -> SdeResult<()> {
        validate_finite("t0", t0)?;
        validate_finite("t_n", t_n)?;
        if t_n <= t0 {
            Err(SdeError::InvalidConfiguration {
                field: "t_n".to_string(),
                reason: format!("end time {} must be greater than start time {}", t_n, t0),
            })
        } else {
            Ok(())
        }
    }

    /// Validate the number of simulated paths
    pub fn validate_paths(paths: usize) -> SdeResult<()> {
        if paths == 0 {
            Err(SdeError::InvalidConfiguration {
                field: "n_sim".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate the explicit finite-difference stability bound `Δτ (σ² N² + r) ≤ 1`
    pub fn validate_explicit_fd_stability(
        delta_tau: f64,
        volatility: f64,
        rate: f64,
        space_steps: usize,
    ) -> SdeResult<()> {
        let n = space_steps as f64;
        let courant = delta_tau * (volatility * volatility * n * n + rate);
        if courant > 1.0 || courant.is_nan() {
            Err(SdeError::NumericalInstability {
                method: "explicit finite difference".to_string(),
                reason: format!(
                    "Δτ (σ² N² + r) = {:.4} exceeds 1 with N = {} spot steps; \
                     add time steps or remove spot steps",
                    courant, space_steps
                ),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a `rows x cols` matrix fits within [`MAX_CELLS`]
    pub fn validate_grid_size(rows: usize, cols: usize) -> SdeResult<()> {
        match rows.checked_mul(cols) {
            Some(cells) if cells <= MAX_CELLS => Ok(()),
            _ => Err(SdeError::InvalidConfiguration {
                field: "delta_t".to_string(),
                reason: format!(
                    "{} time points x {} paths exceeds maximum allowed cells ({})",
                    rows, cols, MAX_CELLS
                ),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use super::*;

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive("delta_t", 0.01).is_ok());
        assert!(validate_positive("delta_t", 0.0).is_err());
        assert!(validate_positive("delta_t", -0.1).is_err());
        assert!(validate_positive("delta_t", f64::NAN).is_err());
    }

    #[test]
    fn test_explicit_fd_stability() {
        // σ² N² + r = 400.05
        assert!(validate_explicit_fd_stability(1.0 / 500.0, 0.2, 0.05, 100).is_ok());
        assert!(matches!(
            validate_explicit_fd_stability(1.0 / 100.0, 0.2, 0.05, 100),
            Err(SdeError::NumericalInstability { .. })
        ));
    }

    #[test]
    fn test_validate_nonzero() {
        assert!(validate_nonzero("k", -0.3).is_ok());
        assert!(validate_nonzero("k", 0.0).is_err());
    }

    #[test]
    fn test_validate_finite() {
        assert!(validate_finite("value", 1.0).is_ok());
        assert!(validate_finite("value", f64::NAN).is_err());
        assert!(validate_finite("value", f64::INFINITY).is_err());
        assert!(validate_finite("value", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_validate_horizon() {
        assert!(validate_horizon(0.0, 1.0).is_ok());
        assert!(validate_horizon(1.0, 1.0).is_err());
        assert!(validate_horizon(2.0, 1.0).is_err());
    }

    #[test]
    fn test_validate_grid_size() {
        assert!(validate_grid_size(100_001, 10).is_ok());
        assert!(validate_grid_size(MAX_CELLS, 2).is_err());
        assert!(validate_grid_size(usize::MAX, 2).is_err());
    }

    #[test]
    fn test_error_display() {
        let error = SdeError::InvalidParameters {
            parameter: "sigma".to_string(),
            value: -0.1,
            constraint: "must be non-negative".to_string(),
        };

        let display = format!("{}", error);
        assert!(display.contains("sigma"));
        assert!(display.contains("-0.1"));
        assert!(display.contains("non-negative"));
    }

    #[test]
    fn test_invalid_state_display() {
        let error = SdeError::InvalidState {
            model: "Cox-Ingersoll-Ross".to_string(),
            step: 7,
            time: 0.7,
            path: 2,
            value: -0.004,
        };

        let display = format!("{}", error);
        assert!(display.contains("Cox-Ingersoll-Ross"));
        assert!(display.contains("step 7"));
        assert!(display.contains("Simulation 3"));
    }
}
