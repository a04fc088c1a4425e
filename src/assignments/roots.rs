//! Convergence of Newton and secant iterations on `sin(3x - 2)`.

use crate::config::PlotConfig;
use crate::data::loader::read_records;
use crate::data::model::RootIteration;
use crate::figure::{Figure, Series};

use super::{Plot, PlotResult};

pub const PLOTS: &[Plot] = &[
    Plot {
        name: "Newton iterations",
        build: newton,
    },
    Plot {
        name: "secant iterations",
        build: secant,
    },
];

fn newton(config: &PlotConfig) -> PlotResult {
    plot_iterations(config, "newton_function_1.csv", "Newton Method (Function 1)")
}

fn secant(config: &PlotConfig) -> PlotResult {
    plot_iterations(config, "secant_function_1.csv", "Secant Method (Function 1)")
}

/// Root estimate against iteration number; the image is named after the method.
fn plot_iterations(config: &PlotConfig, file: &str, method: &str) -> PlotResult {
    let iterations: Vec<RootIteration> = read_records(&config.input(file))?;
    if let Some(last) = iterations.last() {
        log::info!("{method}: {} iterations, last root {}", iterations.len(), last.root);
    }

    let points = iterations
        .iter()
        .map(|it| (f64::from(it.iteration), it.root))
        .collect();

    let figure = Figure::new(format!("Root vs Iterations for {method}"), format!("{method}_plot.png"))
        .size(config.width, config.height)
        .labels("Iteration", "Root")
        .with_grid()
        .with_legend()
        .series(Series::marker_line(method, points));
    Ok(vec![figure])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newton_iterations_become_marker_line_named_after_method() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("newton_function_1.csv"),
            "Iteration,Root\n1,0.6848\n2,0.6667\n3,0.6667\n",
        )
        .unwrap();
        let config = PlotConfig {
            input_dir: dir.path().to_path_buf(),
            ..PlotConfig::default()
        };

        let figures = newton(&config).unwrap();
        let fig = &figures[0];
        assert_eq!(fig.title, "Root vs Iterations for Newton Method (Function 1)");
        assert_eq!(fig.file_name.to_str(), Some("Newton Method (Function 1)_plot.png"));
        match &fig.series[..] {
            [Series::Line { name, points, markers: true }] => {
                assert_eq!(name.as_deref(), Some("Newton Method (Function 1)"));
                assert_eq!(points[0], (1.0, 0.6848));
                assert_eq!(points.len(), 3);
            }
            other => panic!("unexpected series {other:?}"),
        }
    }

    #[test]
    fn secant_without_input_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlotConfig {
            input_dir: dir.path().to_path_buf(),
            ..PlotConfig::default()
        };
        assert!(secant(&config).unwrap_err().is_missing());
    }
}
