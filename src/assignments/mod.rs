//! One module per coursework assignment.
//!
//! Each assignment is a fixed list of [`Plot`]s. A plot loads its own
//! inputs and describes one or more figures with hardcoded titles and
//! labels; [`run`] saves them and hands them back for the viewer.

pub mod benchmark;
pub mod grid_summation;
pub mod heat;
pub mod mesh;
pub mod polynomial;
pub mod roots;
pub mod threads;
pub mod trajectory;

use std::fmt;

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::config::PlotConfig;
use crate::data::DataError;
use crate::figure::Figure;
use crate::render;

/// Outcome of loading one plot's inputs.
pub type PlotResult = Result<Vec<Figure>, DataError>;

/// A single load-and-describe step of an assignment.
#[derive(Clone, Copy)]
pub struct Plot {
    pub name: &'static str,
    pub build: fn(&PlotConfig) -> PlotResult,
}

impl fmt::Debug for Plot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plot").field("name", &self.name).finish()
    }
}

// ---------------------------------------------------------------------------
// Assignment registry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Assignment {
    /// 1D heat distribution T(x)
    Heat,
    /// 2D and 3D particle trajectories
    Trajectory,
    /// Newton and secant root iterations
    Roots,
    /// Brain mesh vertex-area and edge-length histograms
    Mesh,
    /// Timing of grid additions for three grid layouts
    GridSummation,
    /// Polynomial and its derivatives
    Polynomial,
    /// Integration method execution time and error
    Benchmark,
    /// Adaptive vs non-adaptive integration thread scaling
    Threads,
}

impl Assignment {
    pub const ALL: [Assignment; 8] = [
        Assignment::Heat,
        Assignment::Trajectory,
        Assignment::Roots,
        Assignment::Mesh,
        Assignment::GridSummation,
        Assignment::Polynomial,
        Assignment::Benchmark,
        Assignment::Threads,
    ];

    pub fn plots(self) -> &'static [Plot] {
        match self {
            Assignment::Heat => heat::PLOTS,
            Assignment::Trajectory => trajectory::PLOTS,
            Assignment::Roots => roots::PLOTS,
            Assignment::Mesh => mesh::PLOTS,
            Assignment::GridSummation => grid_summation::PLOTS,
            Assignment::Polynomial => polynomial::PLOTS,
            Assignment::Benchmark => benchmark::PLOTS,
            Assignment::Threads => threads::PLOTS,
        }
    }

    /// The trajectory plots were always independent: a broken 2D file
    /// never stopped the 3D plot.
    fn tolerates_failed_plots(self) -> bool {
        matches!(self, Assignment::Trajectory)
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_possible_value() {
            Some(v) => f.write_str(v.get_name()),
            None => write!(f, "{self:?}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Running
// ---------------------------------------------------------------------------

/// Build, save and return every figure of `assignment`.
///
/// A plot whose inputs fail to load stops the run, unless the assignment
/// tolerates failed plots or `config.keep_going` is set; then it is logged
/// and skipped.
pub fn run(assignment: Assignment, config: &PlotConfig) -> Result<Vec<Figure>> {
    let tolerant = config.keep_going || assignment.tolerates_failed_plots();
    let mut figures = Vec::new();

    for plot in assignment.plots() {
        log::debug!("{assignment}: building {}", plot.name);
        let built = match (plot.build)(config) {
            Ok(built) => built,
            Err(e) if tolerant => {
                log::warn!("{assignment}: skipping {}: {e}", plot.name);
                continue;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("{assignment}: {} failed", plot.name));
            }
        };

        for figure in built {
            let path = render::save_figure(&figure, &config.output_dir)
                .with_context(|| format!("{assignment}: saving '{}'", figure.title))?;
            log::info!("Plot saved as '{}'", path.display());
            figures.push(figure);
        }
    }
    Ok(figures)
}

/// Run every assignment, skipping plots whose inputs are unavailable.
pub fn run_all(config: &PlotConfig) -> Result<Vec<Figure>> {
    let config = PlotConfig {
        keep_going: true,
        ..config.clone()
    };
    let mut figures = Vec::new();
    for assignment in Assignment::ALL {
        figures.extend(run(assignment, &config)?);
    }
    Ok(figures)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_assignment_has_plots() {
        for assignment in Assignment::ALL {
            assert!(!assignment.plots().is_empty(), "{assignment} has no plots");
        }
    }

    #[test]
    fn display_uses_cli_names() {
        assert_eq!(Assignment::GridSummation.to_string(), "grid-summation");
        assert_eq!(Assignment::Heat.to_string(), "heat");
    }

    #[test]
    fn missing_input_stops_a_strict_run() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlotConfig {
            input_dir: dir.path().to_path_buf(),
            output_dir: dir.path().to_path_buf(),
            show: false,
            ..PlotConfig::default()
        };

        let err = run(Assignment::Heat, &config).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("heat_distribution.csv"), "{message}");
        assert!(err
            .chain()
            .any(|cause| matches!(cause.downcast_ref::<DataError>(), Some(e) if e.is_missing())));
    }

    #[test]
    fn missing_inputs_are_skipped_when_tolerant() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlotConfig {
            input_dir: dir.path().to_path_buf(),
            output_dir: dir.path().to_path_buf(),
            show: false,
            keep_going: true,
            ..PlotConfig::default()
        };

        assert!(run(Assignment::Mesh, &config).unwrap().is_empty());
        // Trajectory skips on its own.
        let strict = PlotConfig { keep_going: false, ..config };
        assert!(run(Assignment::Trajectory, &strict).unwrap().is_empty());
    }

    fn config_for(input: &std::path::Path, output: &std::path::Path) -> PlotConfig {
        PlotConfig {
            input_dir: input.to_path_buf(),
            output_dir: output.to_path_buf(),
            show: false,
            ..PlotConfig::default()
        }
    }

    #[test]
    fn mesh_run_writes_histograms_under_images() {
        if !render::fonts_available() {
            eprintln!("skipping: no sans-serif font");
            return;
        }
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        std::fs::write(input.path().join("vertex_areas.txt"), "0.4\n0.5\n0.45\n0.6\n").unwrap();
        std::fs::write(input.path().join("edge_lengths.txt"), "1.0\n1.2\n0.9\n").unwrap();

        let figures = run(Assignment::Mesh, &config_for(input.path(), output.path())).unwrap();
        assert_eq!(figures.len(), 2);
        assert!(output.path().join("images/vertex_areas_histogram.png").is_file());
        assert!(output.path().join("images/edge_lengths_histogram.png").is_file());
    }

    #[test]
    fn polynomial_run_writes_svg() {
        if !render::fonts_available() {
            eprintln!("skipping: no sans-serif font");
            return;
        }
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        std::fs::write(
            input.path().join(polynomial::INPUT),
            "x P(x) P'(x) P''(x) P'''(x) P''''(x) P'''''(x)\n\
             0 0.085 0 -1.49 0 24 0\n\
             0.5 -0.04 0.2 1.1 12 24 0\n\
             1 0.079 1.99 8.49 24 24 0\n",
        )
        .unwrap();

        run(Assignment::Polynomial, &config_for(input.path(), output.path())).unwrap();
        let svg = std::fs::read_to_string(output.path().join("polynomial_plot.svg")).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn benchmark_run_writes_both_bar_charts() {
        if !render::fonts_available() {
            eprintln!("skipping: no sans-serif font");
            return;
        }
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        std::fs::write(
            input.path().join(benchmark::INPUT),
            "Method,Function,Result,Exact,Error,ExecutionTime\n\
             Non-Adaptive Simpson,sin(x),2,2,1e-12,0.0001\n\
             Adaptive Trapezoidal,sin(x),2,2,1e-9,0.0004\n",
        )
        .unwrap();

        run(Assignment::Benchmark, &config_for(input.path(), output.path())).unwrap();
        for file in ["updated_execution_time_comparison.png", "updated_error_comparison.png"] {
            assert!(output.path().join(file).is_file(), "{file} missing");
        }
    }
}
