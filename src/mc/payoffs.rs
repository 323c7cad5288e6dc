//! Option Payoff Functions
//!
//! Payoffs evaluated on a single simulated asset path `[S_0, S_1, ..., S_N]`.
//!
//! ## European Options
//! - **Call**: max(S_T - K, 0)
//! - **Put**: max(K - S_T, 0)
//!
//! ## Path-Dependent Options
//! - **Asian call**: max(Avg(S_t) - K, 0), arithmetic average over every grid
//!   point including `S_0`

/// Enumeration of supported option payoff types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payoff {
    /// European call option: max(S_T - K, 0)
    EuropeanCall { k: f64 },

    /// European put option: max(K - S_T, 0)
    EuropeanPut { k: f64 },

    /// Asian call option: max(Avg(S_t) - K, 0)
    AsianCall { k: f64 },
}

impl Payoff {
    /// Payoff of one path; an empty path pays nothing
    pub fn calculate(&self, path: &[f64]) -> f64 {
        let terminal = match path.last() {
            Some(&s) => s,
            None => return 0.0,
        };
        match self {
            Payoff::EuropeanCall { k } => (terminal - k).max(0.0),
            Payoff::EuropeanPut { k } => (k - terminal).max(0.0),
            Payoff::AsianCall { k } => {
                let average_price = path.iter().sum::<f64>() / path.len() as f64;
                (average_price - k).max(0.0)
            }
        }
    }
}
