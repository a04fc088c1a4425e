//! Particle trajectories integrated with explicit Euler steps.

use crate::config::PlotConfig;
use crate::data::DataError;
use crate::data::loader::read_records;
use crate::data::model::TrajectoryPoint;
use crate::figure::{Figure, Series};

use super::{Plot, PlotResult};

pub const INPUT_2D: &str = "traject_2d.txt";
pub const INPUT_3D: &str = "traject_3d.txt";

pub const PLOTS: &[Plot] = &[
    Plot {
        name: "2D trajectory",
        build: trajectory_2d,
    },
    Plot {
        name: "3D trajectory",
        build: trajectory_3d,
    },
];

/// Rows shown in the debug preview of a loaded file.
const PREVIEW_ROWS: usize = 5;

fn load(config: &PlotConfig, file: &str, label: &str) -> Result<Vec<TrajectoryPoint>, DataError> {
    let path = config.input(file);
    log::info!("Reading {label} trajectory data from {}...", path.display());

    let points: Vec<TrajectoryPoint> = read_records(&path)?;
    log::info!("{label} data loaded successfully: {} rows", points.len());
    for p in points.iter().take(PREVIEW_ROWS) {
        match p.z {
            Some(z) => log::debug!("t={:<8} x={:<12} y={:<12} z={z}", p.time, p.x, p.y),
            None => log::debug!("t={:<8} x={:<12} y={}", p.time, p.x, p.y),
        }
    }
    Ok(points)
}

fn xy(points: &[TrajectoryPoint]) -> Vec<(f64, f64)> {
    points.iter().map(|p| (p.x, p.y)).collect()
}

fn trajectory_2d(config: &PlotConfig) -> PlotResult {
    let points = load(config, INPUT_2D, "2D")?;

    let figure = Figure::new("2D Particle Trajectory", "trajectory_2d_plot.png")
        .size(config.width, config.height)
        .labels("X Position", "Y Position")
        .with_grid()
        .with_legend()
        .series(Series::marker_line("2D Trajectory", xy(&points)));
    Ok(vec![figure])
}

/// The projection onto the x–y plane, plus the full path in 3D.
fn trajectory_3d(config: &PlotConfig) -> PlotResult {
    let points = load(config, INPUT_3D, "3D")?;

    // Header is line 1, so data row `i` sits on line `i + 2`.
    if let Some(row) = points.iter().position(|p| p.z.is_none()) {
        return Err(DataError::RaggedRow {
            path: config.input(INPUT_3D),
            line: row + 2,
            expected: 4,
            found: 3,
        });
    }

    let projection = Figure::new("3D Particle Trajectory (2D Projection)", "trajectory_3d_plot.png")
        .size(config.width, config.height)
        .labels("X Position", "Y Position")
        .with_grid()
        .with_legend()
        .series(Series::marker_line("3D Trajectory (2D projection)", xy(&points)));

    let path = points
        .iter()
        .map(|p| (p.x, p.y, p.z.unwrap_or_default()))
        .collect();
    let spatial = Figure::new("3D Particle Trajectory", "trajectory_3d_line_plot.png")
        .size(config.width, config.height)
        .labels("X Position", "Y Position")
        .z_label("Z Position")
        .with_legend()
        .series(Series::Line3d {
            name: Some("3D Trajectory".to_string()),
            points: path,
        });

    Ok(vec![projection, spatial])
}
