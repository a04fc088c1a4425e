//! Thread scaling of the parallel adaptive and non-adaptive integrators.

use crate::config::PlotConfig;
use crate::data::loader::read_records;
use crate::data::model::ThreadScalingRecord;
use crate::figure::{Figure, Series};

use super::{Plot, PlotResult};

pub const PLOTS: &[Plot] = &[
    Plot {
        name: "adaptive thread scaling",
        build: adaptive,
    },
    Plot {
        name: "non-adaptive thread scaling",
        build: non_adaptive,
    },
];

fn adaptive(config: &PlotConfig) -> PlotResult {
    scaling_figures(config, "adaptive_results.csv", "Adaptive", "adaptive")
}

fn non_adaptive(config: &PlotConfig) -> PlotResult {
    scaling_figures(config, "nonadaptive_results.csv", "Non-Adaptive", "nonadaptive")
}

/// Mean ± standard deviation of execution time and of evaluation count.
fn scaling_figures(config: &PlotConfig, file: &str, method: &str, prefix: &str) -> PlotResult {
    let records: Vec<ThreadScalingRecord> = read_records(&config.input(file))?;
    let threads: Vec<f64> = records.iter().map(|r| f64::from(r.threads)).collect();

    let column = |f: fn(&ThreadScalingRecord) -> f64| records.iter().map(f).collect::<Vec<f64>>();
    let mean_time = column(|r| r.mean_time);
    let std_time = column(|r| r.std_dev_time);
    let mean_evals = column(|r| r.mean_evaluations);
    let std_evals = column(|r| r.std_dev_evaluations);

    let band_figure = |title: String, y_label: &str, file: String, label: String, mean: &[f64], spread: &[f64]| {
        let points = threads.iter().copied().zip(mean.iter().copied()).collect();
        Figure::new(title, file)
            .size(config.width, config.height)
            .labels("Threads", y_label)
            .with_legend()
            .series(Series::marker_line(label, points))
            .series(Series::spread_band("Standard Deviation", &threads, mean, spread))
    };

    Ok(vec![
        band_figure(
            format!("{method} Method: Execution Time vs. Threads"),
            "Execution Time (s)",
            format!("{prefix}_execution_time_vs_threads.png"),
            format!("{method} Mean Time"),
            &mean_time,
            &std_time,
        ),
        band_figure(
            format!("{method} Method: Mean Evaluations vs. Threads"),
            "Mean Evaluations",
            format!("{prefix}_mean_evaluations_vs_threads.png"),
            format!("{method} Mean Evaluations"),
            &mean_evals,
            &std_evals,
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS: &str = "Method,Threads,MeanEvaluations,StdDevEvaluations,MeanTime,StdDevTime\n\
                           Adaptive,1,0.2286,0,0.004,0.0005\n\
                           Adaptive,2,0.2286,0,0.003,0.0004\n\
                           Adaptive,4,0.2286,0,0.0025,0.0006\n";

    #[test]
    fn time_and_evaluation_charts_with_bands() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("adaptive_results.csv"), RESULTS).unwrap();
        let config = PlotConfig {
            input_dir: dir.path().to_path_buf(),
            ..PlotConfig::default()
        };

        let figures = adaptive(&config).unwrap();
        assert_eq!(figures.len(), 2);

        let time = &figures[0];
        assert_eq!(time.title, "Adaptive Method: Execution Time vs. Threads");
        assert_eq!(time.file_name.to_str(), Some("adaptive_execution_time_vs_threads.png"));
        match &time.series[..] {
            [Series::Line { name, points, markers: true }, Series::Band { name: band, x, lower, upper, .. }] => {
                assert_eq!(name.as_deref(), Some("Adaptive Mean Time"));
                assert_eq!(points[2], (4.0, 0.0025));
                assert_eq!(band.as_deref(), Some("Standard Deviation"));
                assert_eq!(x, &vec![1.0, 2.0, 4.0]);
                assert!((lower[0] - 0.0035).abs() < 1e-12);
                assert!((upper[0] - 0.0045).abs() < 1e-12);
            }
            other => panic!("unexpected series {other:?}"),
        }

        assert_eq!(figures[1].y_label, "Mean Evaluations");
        assert_eq!(figures[1].file_name.to_str(), Some("adaptive_mean_evaluations_vs_threads.png"));
    }

    #[test]
    fn non_adaptive_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlotConfig {
            input_dir: dir.path().to_path_buf(),
            ..PlotConfig::default()
        };
        assert!(non_adaptive(&config).unwrap_err().is_missing());
    }
}
