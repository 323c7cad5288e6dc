// src/plot.rs
//! Charting hand-off
//!
//! The simulator does not draw anything itself. When plotting is requested it
//! builds a [`Chart`] (one line per simulated path against the time column)
//! and passes it to a [`ChartRenderer`]. Applications plug in their own
//! backend; the bundled [`TracingChartRenderer`] only logs what would be drawn.

use crate::error::SdeResult;
use ndarray::{ArrayView1, ArrayView2};
use tracing::info;

/// A line chart of every path column against time
#[derive(Debug, Clone)]
pub struct Chart<'a> {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x: ArrayView1<'a, f64>,
    /// One column per line, one row per x value
    pub series: ArrayView2<'a, f64>,
}

impl<'a> Chart<'a> {
    pub fn line_count(&self) -> usize {
        self.series.ncols()
    }

    /// Smallest and largest finite y value, `None` if there is none
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

pub trait ChartRenderer {
    fn render(&self, chart: &Chart<'_>) -> SdeResult<()>;
}

/// Renderer that emits a one-line summary of the chart as a tracing event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingChartRenderer;

impl ChartRenderer for TracingChartRenderer {
    fn render(&self, chart: &Chart<'_>) -> SdeResult<()> {
        let (y_min, y_max) = chart.value_range().unwrap_or((f64::NAN, f64::NAN));
        info!(
            title = %chart.title,
            x_label = %chart.x_label,
            y_label = %chart.y_label,
            lines = chart.line_count(),
            points = chart.x.len(),
            y_min,
            y_max,
            "Plotting has started"
        );
        Ok(())
    }
}
