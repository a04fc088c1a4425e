use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Run configuration
// ---------------------------------------------------------------------------

/// Settings shared by every assignment plot.
///
/// Loaded from an optional JSON file; fields left out keep their defaults:
///
/// ```json
/// { "input_dir": "build", "output_dir": "figures", "histogram_bins": 40 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotConfig {
    /// Where the input tables are looked up.
    pub input_dir: PathBuf,
    /// Where images are written (sub-directories are created as needed).
    pub output_dir: PathBuf,
    /// Open the interactive viewer once all images are written.
    pub show: bool,
    /// Skip a plot whose input is missing instead of stopping the run.
    pub keep_going: bool,
    /// Default bitmap size for figures without a fixed size.
    pub width: u32,
    pub height: u32,
    pub histogram_bins: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            show: true,
            keep_going: false,
            width: 800,
            height: 600,
            histogram_bins: 50,
        }
    }
}

impl PlotConfig {
    /// Read a JSON configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: PlotConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            anyhow::bail!("figure size must be non-zero, got {}x{}", self.width, self.height);
        }
        if self.histogram_bins == 0 {
            anyhow::bail!("histogram_bins must be at least 1");
        }
        Ok(())
    }

    /// Path of an input file of this run.
    pub fn input(&self, name: &str) -> PathBuf {
        self.input_dir.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_keep_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plots.json");
        std::fs::write(&path, r#"{ "output_dir": "figures", "histogram_bins": 20 }"#).unwrap();

        let config = PlotConfig::from_file(&path).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("figures"));
        assert_eq!(config.histogram_bins, 20);
        assert_eq!(config.input_dir, PathBuf::from("."));
        assert!(config.show);
    }

    #[test]
    fn unknown_keys_and_zero_sizes_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let typo = dir.path().join("typo.json");
        std::fs::write(&typo, r#"{ "outptu_dir": "x" }"#).unwrap();
        assert!(PlotConfig::from_file(&typo).is_err());

        let zero = dir.path().join("zero.json");
        std::fs::write(&zero, r#"{ "width": 0 }"#).unwrap();
        let err = PlotConfig::from_file(&zero).unwrap_err();
        assert!(err.to_string().contains("non-zero"));
    }

    #[test]
    fn inputs_resolve_against_input_dir() {
        let config = PlotConfig {
            input_dir: PathBuf::from("runs/week04"),
            ..PlotConfig::default()
        };
        assert_eq!(config.input("newton_function_1.csv"), PathBuf::from("runs/week04/newton_function_1.csv"));
    }
}
