//! A degree-four polynomial built from its zeros and its first five derivatives.

use crate::config::PlotConfig;
use crate::data::DataError;
use crate::data::loader::read_whitespace_table;
use crate::data::model::{DERIVATIVE_COUNT, PolynomialSample};
use crate::figure::{Figure, Series};

use super::{Plot, PlotResult};

pub const INPUT: &str = "polynomial_evaluation.txt";

pub const PLOTS: &[Plot] = &[Plot {
    name: "polynomial and derivatives",
    build: polynomial_and_derivatives,
}];

const COLUMNS: usize = DERIVATIVE_COUNT + 2;

/// `P(x)`, `P'(x)`, `P''(x)`, …
pub fn derivative_label(order: usize) -> String {
    format!("P{}(x)", "'".repeat(order))
}

pub fn load(config: &PlotConfig) -> Result<Vec<PolynomialSample>, DataError> {
    let path = config.input(INPUT);
    // First line is the column header.
    let rows = read_whitespace_table(&path, 1)?;
    rows.iter()
        .map(|row| {
            PolynomialSample::from_row(row).ok_or_else(|| DataError::LengthMismatch {
                what: format!("{} row", path.display()),
                expected: COLUMNS,
                found: row.len(),
            })
        })
        .collect()
}

fn polynomial_and_derivatives(config: &PlotConfig) -> PlotResult {
    let samples = load(config)?;

    let mut figure = Figure::new("Polynomial and Its Derivatives", "polynomial_plot.svg")
        .size(1000, 600)
        .labels("x", "Value")
        .with_grid()
        .with_legend();

    for order in 0..=DERIVATIVE_COUNT {
        let points = samples.iter().map(|s| (s.x, s.values[order])).collect();
        figure = figure.series(Series::line(derivative_label(order), points));
    }
    Ok(vec![figure])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_count_primes() {
        assert_eq!(derivative_label(0), "P(x)");
        assert_eq!(derivative_label(2), "P''(x)");
        assert_eq!(derivative_label(5), "P'''''(x)");
    }

    #[test]
    fn six_lines_share_the_x_column() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(INPUT),
            "x P(x) P'(x) P''(x) P'''(x) P''''(x) P'''''(x)\n\
             0 0.0853 0 -1.5 0 24 0\n\
             0.01 0.0853 -0.015 -1.5 0.24 24 0\n",
        )
        .unwrap();
        let config = PlotConfig {
            input_dir: dir.path().to_path_buf(),
            ..PlotConfig::default()
        };

        let figures = polynomial_and_derivatives(&config).unwrap();
        let fig = &figures[0];
        assert_eq!(fig.file_name.extension().and_then(|e| e.to_str()), Some("svg"));
        assert_eq!(fig.series.len(), 6);
        assert_eq!(fig.series[4].name(), Some("P''''(x)"));
        match &fig.series[3] {
            Series::Line { points, .. } => assert_eq!(points, &vec![(0.0, 0.0), (0.01, 0.24)]),
            other => panic!("unexpected series {other:?}"),
        }
    }

    #[test]
    fn short_rows_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(INPUT), "x P(x)\n0 1\n").unwrap();
        let config = PlotConfig {
            input_dir: dir.path().to_path_buf(),
            ..PlotConfig::default()
        };
        let err = polynomial_and_derivatives(&config).unwrap_err();
        assert!(matches!(err, DataError::LengthMismatch { expected: 7, found: 2, .. }));
    }
}
