//! Time to add two identical `n × n × n` grids, for three grid layouts.
//!
//! The timings were measured once and are kept here; there is no input file.

use crate::config::PlotConfig;
use crate::data::DataError;
use crate::data::summary::ensure_same_length;
use crate::figure::{Figure, Series};

use super::{Plot, PlotResult};

pub const PLOTS: &[Plot] = &[Plot {
    name: "grid summation times",
    build: grid_summation_times,
}];

const GRID_SIZES: [f64; 4] = [10.0, 50.0, 100.0, 200.0];

/// Seconds per addition, one row per grid layout.
const TIMINGS: [(&str, &[f64]); 3] = [
    ("1D Array Grid", &[1.4197e-05, 3.5612e-04, 1.3241e-03, 5.4893e-03]),
    ("Vector Grid", &[4.6569e-05, 7.6328e-04, 2.7645e-03, 1.0295e-02]),
    ("New Operator Grid", &[1.6368e-05, 4.5123e-04, 1.6324e-03, 6.7829e-03]),
];

fn grid_summation_times(config: &PlotConfig) -> PlotResult {
    Ok(vec![timing_figure(&GRID_SIZES, &TIMINGS, config)?])
}

fn timing_figure(sizes: &[f64], timings: &[(&str, &[f64])], config: &PlotConfig) -> Result<Figure, DataError> {
    let mut figure = Figure::new(
        "Time to Add Two Identical Grids for Different Grid Sizes",
        "grid_summation_times.png",
    )
    .size(config.width.max(1000), config.height)
    .labels("Grid Size (n x n x n)", "Time (seconds)")
    .with_grid()
    .with_legend();

    for &(layout, seconds) in timings {
        ensure_same_length(&format!("{layout} timings"), sizes.len(), seconds.len())?;
        let points = sizes.iter().copied().zip(seconds.iter().copied()).collect();
        figure = figure.series(Series::marker_line(layout, points));
    }
    Ok(figure)
}
