//! Steady-state 1D heat distribution `T(x) = 1 - x^2`.

use crate::config::PlotConfig;
use crate::data::DataError;
use crate::data::loader::read_positional;
use crate::data::model::HeatSample;
use crate::figure::{Figure, Series};

use super::{Plot, PlotResult};

pub const INPUT: &str = "heat_distribution.csv";
pub const OUTPUT: &str = "heat_distribution_plot.png";

pub const PLOTS: &[Plot] = &[Plot {
    name: "heat distribution",
    build: heat_distribution,
}];

/// Columns are positional: whatever the header says, `x` first, `T` second.
pub fn load(config: &PlotConfig) -> Result<Vec<HeatSample>, DataError> {
    let path = config.input(INPUT);
    log::info!("Reading data from {}...", path.display());

    let samples: Vec<HeatSample> = read_positional(&path, 2)?
        .into_iter()
        .map(|row| HeatSample {
            x: row[0],
            temperature: row[1],
        })
        .collect();

    log::info!("Data read successfully. Number of points: {}", samples.len());
    Ok(samples)
}

fn heat_distribution(config: &PlotConfig) -> PlotResult {
    let samples = load(config)?;
    let points = samples.iter().map(|s| (s.x, s.temperature)).collect();

    let figure = Figure::new("1D Heat Distribution", OUTPUT)
        .size(config.width, config.height)
        .labels("x", "Temperature (T)")
        .with_grid()
        .with_legend()
        .series(Series::line("T(x) = 1 - x^2", points));
    Ok(vec![figure])
}
