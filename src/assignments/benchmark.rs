//! Non-adaptive Simpson vs adaptive trapezoidal quadrature on three integrands.

use crate::config::PlotConfig;
use crate::data::loader::read_records;
use crate::data::model::BenchmarkRecord;
use crate::data::summary::unique_in_order;
use crate::figure::{Figure, Series};

use super::{Plot, PlotResult};

pub const INPUT: &str = "benchmark_results.csv";

pub const PLOTS: &[Plot] = &[Plot {
    name: "integration benchmark",
    build: benchmark_comparison,
}];

fn benchmark_comparison(config: &PlotConfig) -> PlotResult {
    let records: Vec<BenchmarkRecord> = read_records(&config.input(INPUT))?;
    log::info!("Loaded {} benchmark results", records.len());

    Ok(vec![
        comparison_figure(
            &records,
            |r| r.execution_time,
            "Execution Time Comparison of Integration Methods",
            "Execution Time (s)",
            "updated_execution_time_comparison.png",
        ),
        comparison_figure(
            &records,
            |r| r.error,
            "Error Comparison of Integration Methods",
            "Error",
            "updated_error_comparison.png",
        ),
    ])
}

/// One bar per method, one bar colour per integrand.
fn comparison_figure(
    records: &[BenchmarkRecord],
    value: impl Fn(&BenchmarkRecord) -> f64,
    title: &str,
    y_label: &str,
    file: &str,
) -> Figure {
    let methods = unique_in_order(records, |r| r.method.clone());
    let functions = unique_in_order(records, |r| r.function.clone());

    let mut figure = Figure::new(title, file)
        .size(1000, 600)
        .labels("Integration Method", y_label)
        .legend_title("Function")
        .categories(methods.clone());

    for function in &functions {
        let values = records
            .iter()
            .filter(|r| &r.function == function)
            .filter_map(|r| {
                let slot = methods.iter().position(|m| m == &r.method)?;
                Some((slot, value(r)))
            })
            .collect();
        figure = figure.series(Series::Bars {
            name: Some(function.clone()),
            values,
        });
    }
    figure
}
