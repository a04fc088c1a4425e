//! Writes a well-formed input file for every assignment plot into one
//! directory, so `coursework-plots all -i <dir>` has something to draw.
//!
//! Usage: `generate_sample [DIR]` (default `sample_data`).

use std::f64::consts::PI;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        mean + std_dev * z
    }
}

// ---------------------------------------------------------------------------
// Heat distribution
// ---------------------------------------------------------------------------

fn write_heat(dir: &Path) -> Result<()> {
    const POINTS: usize = 101;
    let (a, b) = (-1.0_f64, 1.0_f64);
    let step = (b - a) / (POINTS - 1) as f64;

    let mut w = csv::Writer::from_path(dir.join("heat_distribution.csv"))?;
    w.write_record(["x", "T"])?;
    for i in 0..POINTS {
        let x = a + i as f64 * step;
        w.write_record([format!("{x:.6}"), format!("{:.6}", 1.0 - x * x)])?;
    }
    w.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Particle trajectories (explicit Euler under a periodic force)
// ---------------------------------------------------------------------------

fn force(t: f64, dims: usize) -> Vec<f64> {
    let f = [(2.0 * t).sin(), (2.0 * t).cos(), (1.5 * t).cos()];
    f[..dims].to_vec()
}

fn write_trajectory(path: &Path, dims: usize) -> Result<()> {
    const DT: f64 = 0.02;
    const STEPS: usize = 200;

    let mut w = csv::Writer::from_path(path)?;
    let header = ["time", "x", "y", "z"];
    w.write_record(&header[..dims + 1])?;

    let mut position = vec![0.0; dims];
    let mut velocity = vec![0.0; dims];
    for step in 0..=STEPS {
        let t = step as f64 * DT;
        for (v, f) in velocity.iter_mut().zip(force(t, dims)) {
            *v += f * DT;
        }
        for (p, v) in position.iter_mut().zip(&velocity) {
            *p += v * DT;
        }
        let mut row = vec![t.to_string()];
        row.extend(position.iter().map(|p| p.to_string()));
        w.write_record(&row)?;
    }
    w.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Root finding on sin(3x - 2)
// ---------------------------------------------------------------------------

const TOLERANCE: f64 = 1e-6;
const MAX_ITERATIONS: u32 = 5000;

fn f1(x: f64) -> f64 {
    (3.0 * x - 2.0).sin()
}

fn f1_prime(x: f64) -> f64 {
    3.0 * (3.0 * x - 2.0).cos()
}

fn newton_iterations(x0: f64) -> Vec<(u32, f64)> {
    let mut rows = Vec::new();
    let mut x = x0;
    for i in 1..=MAX_ITERATIONS {
        let (fx, dfx) = (f1(x), f1_prime(x));
        if fx.abs() < TOLERANCE || dfx.abs() < TOLERANCE {
            rows.push((i, x));
            break;
        }
        x -= fx / dfx;
        rows.push((i, x));
    }
    rows
}

fn secant_iterations(x0: f64) -> Vec<(u32, f64)> {
    let mut rows = Vec::new();
    let (mut x1, mut x2) = (x0, x0 + 0.1);
    for i in 1..=MAX_ITERATIONS {
        let (fx1, fx2) = (f1(x1), f1(x2));
        if (fx2 - fx1).abs() < TOLERANCE {
            rows.push((i, x2));
            break;
        }
        let x3 = x2 - fx2 * (x2 - x1) / (fx2 - fx1);
        rows.push((i, x3));
        if f1(x3).abs() < TOLERANCE {
            break;
        }
        x1 = x2;
        x2 = x3;
    }
    rows
}

fn write_iterations(path: &Path, rows: &[(u32, f64)]) -> Result<()> {
    let mut w = csv::Writer::from_path(path)?;
    w.write_record(["Iteration", "Root"])?;
    for (i, root) in rows {
        w.write_record([i.to_string(), root.to_string()])?;
    }
    w.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Mesh statistics
// ---------------------------------------------------------------------------

fn write_values(path: &Path, values: impl IntoIterator<Item = f64>) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for v in values {
        writeln!(out, "{v}")?;
    }
    out.flush()?;
    Ok(())
}

fn write_mesh(dir: &Path, rng: &mut SimpleRng) -> Result<()> {
    // Log-normal-ish spread around a typical triangle size.
    let areas = (0..5000).map(|_| rng.gauss(-0.7, 0.35).exp());
    write_values(&dir.join("vertex_areas.txt"), areas.collect::<Vec<_>>())?;

    let lengths = (0..15000).map(|_| rng.gauss(1.0, 0.18).abs());
    write_values(&dir.join("edge_lengths.txt"), lengths.collect::<Vec<_>>())
}

// ---------------------------------------------------------------------------
// Polynomial built from its zeros
// ---------------------------------------------------------------------------

/// Coefficients, lowest degree first, of `∏ (x - z)`.
fn from_zeros(zeros: &[f64]) -> Vec<f64> {
    zeros.iter().fold(vec![1.0], |coeffs, &z| {
        let mut next = vec![0.0; coeffs.len() + 1];
        for (i, c) in coeffs.iter().enumerate() {
            next[i + 1] += c;
            next[i] -= z * c;
        }
        next
    })
}

fn differentiate(coeffs: &[f64]) -> Vec<f64> {
    coeffs
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, c)| i as f64 * c)
        .collect()
}

fn evaluate(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

fn write_polynomial(dir: &Path) -> Result<()> {
    let mut derivatives = vec![from_zeros(&[-0.86, -0.34, 0.34, 0.86])];
    for _ in 0..5 {
        let next = differentiate(derivatives.last().map(Vec::as_slice).unwrap_or(&[]));
        derivatives.push(next);
    }

    let mut out = BufWriter::new(File::create(dir.join("polynomial_evaluation.txt"))?);
    writeln!(out, "x P(x) P'(x) P''(x) P'''(x) P''''(x) P'''''(x)")?;
    for i in 0..=100 {
        let x = i as f64 * 0.01;
        let values: Vec<String> = derivatives.iter().map(|p| evaluate(p, x).to_string()).collect();
        writeln!(out, "{x} {}", values.join(" "))?;
    }
    out.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Integration benchmark
// ---------------------------------------------------------------------------

fn simpson(f: &dyn Fn(f64) -> f64, a: f64, b: f64, n: usize) -> f64 {
    let h = (b - a) / n as f64;
    let mut sum = f(a) + f(b);
    for i in 1..n {
        let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
        sum += weight * f(a + i as f64 * h);
    }
    sum * h / 3.0
}

/// Recursive trapezoid refinement; `evals` counts integrand calls.
fn adaptive_trapezoid(f: &dyn Fn(f64) -> f64, a: f64, b: f64, tol: f64, depth: u32, evals: &mut u64) -> f64 {
    let c = (a + b) / 2.0;
    let (fa, fb, fc) = (f(a), f(b), f(c));
    *evals += 3;
    let one = 0.5 * (b - a) * (fa + fb);
    let two = 0.5 * (c - a) * (fa + fc) + 0.5 * (b - c) * (fc + fb);
    if depth >= 12 || (two - one).abs() < tol {
        return two;
    }
    adaptive_trapezoid(f, a, c, tol / 2.0, depth + 1, evals) + adaptive_trapezoid(f, c, b, tol / 2.0, depth + 1, evals)
}

fn write_benchmark(dir: &Path) -> Result<()> {
    let integrands: [(&str, fn(f64) -> f64, f64); 3] = [
        ("sin(x)", f64::sin, 2.0),
        ("exp(-x^2) * sin(1000 * x)", |x| (-x * x).exp() * (1000.0 * x).sin(), 0.0),
        ("x^0.75 * log(1 + x^2)", |x| x.powf(0.75) * (1.0 + x * x).ln(), 0.0),
    ];

    let mut w = csv::Writer::from_path(dir.join("benchmark_results.csv"))?;
    w.write_record(["Method", "Function", "Result", "Exact", "Error", "ExecutionTime"])?;
    for (name, f, exact) in integrands {
        let start = Instant::now();
        let result = simpson(&f, 0.0, PI, 1000);
        let elapsed = start.elapsed().as_secs_f64();
        write_benchmark_row(&mut w, "Non-Adaptive Simpson", name, result, exact, elapsed)?;

        let start = Instant::now();
        let result = adaptive_trapezoid(&f, 0.0, PI, 1e-8, 0, &mut 0);
        let elapsed = start.elapsed().as_secs_f64();
        write_benchmark_row(&mut w, "Adaptive Trapezoidal", name, result, exact, elapsed)?;
    }
    w.flush()?;
    Ok(())
}

fn write_benchmark_row(
    w: &mut csv::Writer<File>,
    method: &str,
    function: &str,
    result: f64,
    exact: f64,
    elapsed: f64,
) -> Result<()> {
    w.write_record([
        method.to_string(),
        function.to_string(),
        result.to_string(),
        exact.to_string(),
        (result - exact).abs().to_string(),
        elapsed.to_string(),
    ])?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Thread scaling
// ---------------------------------------------------------------------------

const THREAD_COUNTS: [usize; 5] = [1, 2, 4, 8, 16];
const RUNS: usize = 5;

fn scaling_integrand(x: f64) -> f64 {
    x.sqrt() * (1.0 - x).powi(2)
}

/// Split `[0, 1]` into one slice per thread; returns integrand evaluations.
fn parallel_run(threads: usize, adaptive: bool) -> u64 {
    let width = 1.0 / threads as f64;
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|t| {
                scope.spawn(move || {
                    let (a, b) = (t as f64 * width, (t + 1) as f64 * width);
                    if adaptive {
                        let mut evals = 0;
                        adaptive_trapezoid(&scaling_integrand, a, b, 1e-3 / threads as f64, 0, &mut evals);
                        evals
                    } else {
                        let n = 1000 / threads;
                        simpson(&scaling_integrand, a, b, n.max(2));
                        n as u64 + 1
                    }
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap_or(0)).sum()
    })
}

fn mean_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}

fn write_scaling(path: &Path, label: &str, adaptive: bool) -> Result<()> {
    let mut w = csv::Writer::from_path(path)?;
    w.write_record(["Method", "Threads", "MeanEvaluations", "StdDevEvaluations", "MeanTime", "StdDevTime"])?;
    for threads in THREAD_COUNTS {
        let mut evaluations = Vec::with_capacity(RUNS);
        let mut times = Vec::with_capacity(RUNS);
        for _ in 0..RUNS {
            let start = Instant::now();
            evaluations.push(parallel_run(threads, adaptive) as f64);
            times.push(start.elapsed().as_secs_f64());
        }
        let (mean_eval, std_eval) = mean_std(&evaluations);
        let (mean_time, std_time) = mean_std(&times);
        w.write_record([
            label.to_string(),
            threads.to_string(),
            mean_eval.to_string(),
            std_eval.to_string(),
            mean_time.to_string(),
            std_time.to_string(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_data"));
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut rng = SimpleRng::new(42);

    write_heat(&dir).context("heat distribution")?;
    write_trajectory(&dir.join("traject_2d.txt"), 2).context("2D trajectory")?;
    write_trajectory(&dir.join("traject_3d.txt"), 3).context("3D trajectory")?;
    write_iterations(&dir.join("newton_function_1.csv"), &newton_iterations(0.5)).context("Newton iterations")?;
    write_iterations(&dir.join("secant_function_1.csv"), &secant_iterations(0.5)).context("secant iterations")?;
    write_mesh(&dir, &mut rng).context("mesh statistics")?;
    write_polynomial(&dir).context("polynomial evaluation")?;
    write_benchmark(&dir).context("integration benchmark")?;
    write_scaling(&dir.join("adaptive_results.csv"), "Adaptive", true).context("adaptive scaling")?;
    write_scaling(&dir.join("nonadaptive_results.csv"), "Non-Adaptive", false).context("non-adaptive scaling")?;

    println!("Wrote sample inputs for every assignment to {}", dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polynomial_from_zeros_vanishes_at_zeros() {
        let p = from_zeros(&[-0.86, -0.34, 0.34, 0.86]);
        assert_eq!(p.len(), 5);
        for z in [-0.86, -0.34, 0.34, 0.86] {
            assert!(evaluate(&p, z).abs() < 1e-12);
        }
        // Fifth derivative of a quartic is zero.
        let mut d = p;
        for _ in 0..5 {
            d = differentiate(&d);
        }
        assert!(d.is_empty());
        assert_eq!(evaluate(&d, 0.3), 0.0);
    }

    #[test]
    fn root_finders_converge_to_two_thirds() {
        let newton = newton_iterations(0.5);
        let secant = secant_iterations(0.5);
        let target = 2.0 / 3.0;
        assert!((newton.last().unwrap().1 - target).abs() < 1e-5);
        assert!((secant.last().unwrap().1 - target).abs() < 1e-5);
    }

    #[test]
    fn simpson_integrates_sine() {
        assert!((simpson(&f64::sin, 0.0, PI, 1000) - 2.0).abs() < 1e-9);
    }
}
