// src/output.rs
//! Simulation output tables
//!
//! A [`SimulationResult`] is the labeled table every simulation returns:
//!
//! ```text
//!  Time | Simulation 1 | Simulation 2 | ... | Simulation n
//!  t_0  |     X_0      |     X_0      | ... |     X_0
//!  t_1  |   X_1^(1)    |   X_1^(2)    | ... |   X_1^(n)
//!  ...
//! ```
//!
//! The time column and the path matrix are stored separately; label-based
//! lookup is offered on top. Tables are plain owned values, and every
//! transformation returns a new table.

use crate::error::{SdeError, SdeResult};
use crate::plot::Chart;
use ndarray::{Array1, Array2, ArrayView1, Axis};

pub const TIME_COLUMN: &str = "Time";

/// Label of the `index`-th path column (0-based index, 1-based label)
pub fn simulation_label(index: usize) -> String {
    format!("Simulation {}", index + 1)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    title: String,
    times: Array1<f64>,
    paths: Array2<f64>,
}

/// Zero-coupon bond prices laid out exactly like the short-rate table they
/// were computed from
pub type BondPriceTable = SimulationResult;

impl SimulationResult {
    pub fn new(title: impl Into<String>, times: Array1<f64>, paths: Array2<f64>) -> SdeResult<Self> {
        if times.len() != paths.nrows() {
            return Err(SdeError::InvalidConfiguration {
                field: "paths".to_string(),
                reason: format!(
                    "{} time points but {} path rows",
                    times.len(),
                    paths.nrows()
                ),
            });
        }
        if paths.ncols() == 0 {
            return Err(SdeError::InvalidConfiguration {
                field: "paths".to_string(),
                reason: "a table needs at least one simulation column".to_string(),
            });
        }
        Ok(SimulationResult {
            title: title.into(),
            times,
            paths,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn times(&self) -> ArrayView1<'_, f64> {
        self.times.view()
    }

    /// The path matrix, one column per simulation
    pub fn paths(&self) -> &Array2<f64> {
        &self.paths
    }

    pub fn n_rows(&self) -> usize {
        self.times.len()
    }

    /// Column count including the time column
    pub fn n_cols(&self) -> usize {
        self.paths.ncols() + 1
    }

    pub fn n_sim(&self) -> usize {
        self.paths.ncols()
    }

    /// `(rows, columns)` including the time column
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_cols())
    }

    pub fn column_names(&self) -> Vec<String> {
        std::iter::once(TIME_COLUMN.to_string())
            .chain((0..self.n_sim()).map(simulation_label))
            .collect()
    }

    /// Look a column up by its label
    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        if name == TIME_COLUMN {
            return Some(self.times.view());
        }
        let index: usize = name.strip_prefix("Simulation ")?.parse().ok()?;
        if index == 0 {
            return None;
        }
        self.path(index - 1)
    }

    /// The `index`-th simulated path (0-based)
    pub fn path(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        (index < self.n_sim()).then(|| self.paths.column(index))
    }

    /// Cell lookup with the time column at `col = 0`
    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        match col {
            0 => self.times.get(row).copied(),
            c => self.paths.get((row, c - 1)).copied(),
        }
    }

    /// Final row of the path matrix
    pub fn terminal_values(&self) -> ArrayView1<'_, f64> {
        self.paths.row(self.n_rows() - 1)
    }

    /// Cross-sectional mean of every row
    pub fn mean_path(&self) -> Array1<f64> {
        self.paths
            .mean_axis(Axis(1))
            .unwrap_or_else(|| Array1::zeros(self.n_rows()))
    }

    /// New table with `f(t, x)` applied to every simulated cell
    ///
    /// The time column is copied unchanged and `self` is left untouched.
    pub fn map_values<F>(&self, title: impl Into<String>, f: F) -> SimulationResult
    where
        F: Fn(f64, f64) -> f64,
    {
        let paths = Array2::from_shape_fn(self.paths.raw_dim(), |(i, j)| {
            f(self.times[i], self.paths[[i, j]])
        });
        SimulationResult {
            title: title.into(),
            times: self.times.clone(),
            paths,
        }
    }

    pub fn chart(&self, x_label: &str, y_label: &str) -> Chart<'_> {
        Chart {
            title: self.title.clone(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            x: self.times.view(),
            series: self.paths.view(),
        }
    }
}
