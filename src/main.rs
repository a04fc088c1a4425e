mod app;
mod assignments;
mod color;
mod config;
mod data;
mod figure;
mod render;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use assignments::Assignment;
use config::PlotConfig;

/// What to plot: one assignment, or all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    All,
    One(Assignment),
}

fn parse_target(s: &str) -> Result<Target, String> {
    if s.eq_ignore_ascii_case("all") {
        return Ok(Target::All);
    }
    Assignment::from_str(s, true).map(Target::One)
}

/// Plot the results of the numerical-methods assignments.
#[derive(Debug, Parser)]
#[command(name = "coursework-plots", version)]
struct Cli {
    /// heat, trajectory, roots, mesh, grid-summation, polynomial,
    /// benchmark, threads, or all
    #[arg(value_parser = parse_target)]
    target: Target,

    /// Directory holding the input files [default: .]
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Directory receiving the images [default: .]
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Do not open the interactive viewer
    #[arg(long)]
    no_show: bool,

    /// Continue with the next plot when an input is missing
    #[arg(long)]
    keep_going: bool,
}

impl Cli {
    /// Config file (or defaults) with command-line flags on top.
    fn resolve_config(&self) -> Result<PlotConfig> {
        let mut config = match &self.config {
            Some(path) => PlotConfig::from_file(path)?,
            None => PlotConfig::default(),
        };
        if let Some(dir) = &self.input_dir {
            config.input_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if self.no_show {
            config.show = false;
        }
        if self.keep_going {
            config.keep_going = true;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    log::debug!("{config:?}");

    let figures = match cli.target {
        Target::All => assignments::run_all(&config)?,
        Target::One(assignment) => assignments::run(assignment, &config)?,
    };

    if config.show {
        app::show(figures, &config.output_dir)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_assignment_names_and_all() {
        let cli = Cli::try_parse_from(["coursework-plots", "grid-summation"]).unwrap();
        assert_eq!(cli.target, Target::One(Assignment::GridSummation));

        let cli = Cli::try_parse_from(["coursework-plots", "ALL", "--no-show"]).unwrap();
        assert_eq!(cli.target, Target::All);
        assert!(cli.no_show);

        assert!(Cli::try_parse_from(["coursework-plots", "week11"]).is_err());
        assert!(Cli::try_parse_from(["coursework-plots"]).is_err());
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plots.json");
        std::fs::write(&path, r#"{ "input_dir": "from-file", "output_dir": "from-file", "show": true }"#).unwrap();

        let cli = Cli::try_parse_from([
            "coursework-plots",
            "heat",
            "--config",
            path.to_str().unwrap(),
            "-o",
            "figures",
            "--no-show",
            "--keep-going",
        ])
        .unwrap();
        let config = cli.resolve_config().unwrap();

        assert_eq!(config.input_dir, PathBuf::from("from-file"));
        assert_eq!(config.output_dir, PathBuf::from("figures"));
        assert!(!config.show);
        assert!(config.keep_going);
    }
}
