use serde::Deserialize;

// ---------------------------------------------------------------------------
// Heat distribution – `x,T`
// ---------------------------------------------------------------------------

/// One sample of the 1D steady-state temperature profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatSample {
    pub x: f64,
    pub temperature: f64,
}

// ---------------------------------------------------------------------------
// Particle trajectory – `time,x,y[,z]`
// ---------------------------------------------------------------------------

/// A particle position at one time step. `z` is absent for planar runs.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TrajectoryPoint {
    pub time: f64,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: Option<f64>,
}

// ---------------------------------------------------------------------------
// Root finding – `Iteration,Root`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RootIteration {
    #[serde(rename = "Iteration")]
    pub iteration: u32,
    #[serde(rename = "Root")]
    pub root: f64,
}

// ---------------------------------------------------------------------------
// Polynomial evaluation – `x P(x) P'(x) … P'''''(x)`
// ---------------------------------------------------------------------------

/// Number of derivatives written next to the polynomial value.
pub const DERIVATIVE_COUNT: usize = 5;

/// `P(x)` followed by its first five derivatives, all evaluated at `x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolynomialSample {
    pub x: f64,
    pub values: [f64; DERIVATIVE_COUNT + 1],
}

impl PolynomialSample {
    /// Build a sample from one whitespace-separated row.
    /// Returns `None` unless the row has exactly seven values.
    pub fn from_row(row: &[f64]) -> Option<Self> {
        let (&x, rest) = row.split_first()?;
        let values: [f64; DERIVATIVE_COUNT + 1] = rest.try_into().ok()?;
        Some(PolynomialSample { x, values })
    }
}

// ---------------------------------------------------------------------------
// Integration benchmark – `Method,Function,Result,Exact,Error,ExecutionTime`
// ---------------------------------------------------------------------------

/// One method/function pair of the quadrature benchmark.
/// `Result` and `Exact` columns are present in the file but not plotted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BenchmarkRecord {
    #[serde(rename = "Function")]
    pub function: String,
    #[serde(rename = "Method")]
    pub method: String,
    #[serde(rename = "ExecutionTime")]
    pub execution_time: f64,
    #[serde(rename = "Error")]
    pub error: f64,
}

// ---------------------------------------------------------------------------
// Thread scaling – `Method,Threads,MeanEvaluations,StdDevEvaluations,MeanTime,StdDevTime`
// ---------------------------------------------------------------------------

/// Aggregated timing of repeated runs at one thread count.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ThreadScalingRecord {
    #[serde(rename = "Threads")]
    pub threads: u32,
    #[serde(rename = "MeanTime")]
    pub mean_time: f64,
    #[serde(rename = "StdDevTime")]
    pub std_dev_time: f64,
    #[serde(rename = "MeanEvaluations")]
    pub mean_evaluations: f64,
    #[serde(rename = "StdDevEvaluations")]
    pub std_dev_evaluations: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polynomial_sample_needs_seven_values() {
        let row = [0.5, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let sample = PolynomialSample::from_row(&row).unwrap();
        assert_eq!(sample.x, 0.5);
        assert_eq!(sample.values, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        assert!(PolynomialSample::from_row(&row[..6]).is_none());
        assert!(PolynomialSample::from_row(&[]).is_none());
    }
}
