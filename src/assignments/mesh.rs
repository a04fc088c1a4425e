//! Brain surface mesh statistics: per-vertex areas and edge lengths.

use std::path::PathBuf;

use crate::config::PlotConfig;
use crate::data::loader::read_values;
use crate::data::summary::{Histogram, mean, std_dev};
use crate::figure::{Figure, Series};

use super::{Plot, PlotResult};

pub const PLOTS: &[Plot] = &[
    Plot {
        name: "vertex area histogram",
        build: vertex_areas,
    },
    Plot {
        name: "edge length histogram",
        build: edge_lengths,
    },
];

/// Histograms go into this sub-directory of the output directory.
pub const IMAGE_DIR: &str = "images";

fn histogram_figure(config: &PlotConfig, values: &[f64], title: &str, x_label: &str, file: &str) -> Figure {
    let histogram = Histogram::from_values(values, config.histogram_bins);
    log::debug!("{title}: {} finite values in {} bins", histogram.total(), histogram.counts.len());
    Figure::new(title, PathBuf::from(IMAGE_DIR).join(file))
        .size(config.width, config.height)
        .labels(x_label, "Frequency")
        .series(Series::Histogram {
            name: None,
            histogram,
        })
}

fn vertex_areas(config: &PlotConfig) -> PlotResult {
    let areas = read_values(&config.input("vertex_areas.txt"))?;
    log::info!("Loaded {} vertex areas", areas.len());

    Ok(vec![histogram_figure(
        config,
        &areas,
        "Histogram of Vertex Areas",
        "Area",
        "vertex_areas_histogram.png",
    )])
}

/// Also reports mean and standard deviation of the edge lengths on stdout.
fn edge_lengths(config: &PlotConfig) -> PlotResult {
    let lengths = read_values(&config.input("edge_lengths.txt"))?;
    log::info!("Loaded {} edge lengths", lengths.len());

    let (summary_mean, summary_std) = edge_length_summary(&lengths);
    println!("Mean edge length: {summary_mean}");
    println!("Standard deviation of edge lengths: {summary_std}");

    Ok(vec![histogram_figure(
        config,
        &lengths,
        "Histogram of Edge Lengths",
        "Length",
        "edge_lengths_histogram.png",
    )])
}

/// Mean and population standard deviation; NaN for an empty sample.
pub fn edge_length_summary(lengths: &[f64]) -> (f64, f64) {
    (
        mean(lengths).unwrap_or(f64::NAN),
        std_dev(lengths).unwrap_or(f64::NAN),
    )
}
