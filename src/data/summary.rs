use std::collections::HashSet;
use std::hash::Hash;

use super::error::DataError;

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by `n`, not `n - 1`).
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let mu = mean(values)?;
    let var = values.iter().map(|v| (v - mu).powi(2)).sum::<f64>() / values.len() as f64;
    Some(var.sqrt())
}

/// Smallest and largest finite value.
pub fn min_max(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Equal-width bin counts over the sample range.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `counts.len() + 1` ascending bin edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width bins spanning `[min, max]`.
    ///
    /// Every bin is half-open except the last, which also takes `max`.
    /// A constant sample is spread over `[v - 0.5, v + 0.5]`.
    /// Non-finite values are dropped.
    pub fn from_values(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let (lo, hi) = match min_max(values.iter().copied()) {
            Some((lo, hi)) if hi > lo => (lo, hi),
            Some((v, _)) => (v - 0.5, v + 0.5),
            None => (0.0, 1.0),
        };

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

        let mut counts = vec![0usize; bins];
        for &v in values.iter().filter(|v| v.is_finite()) {
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Histogram { edges, counts }
    }

    /// `(left edge, right edge, count)` for every bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(e, &c)| (e[0], e[1], c))
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

// ---------------------------------------------------------------------------
// Grouping & guards
// ---------------------------------------------------------------------------

/// Distinct keys in order of first appearance.
pub fn unique_in_order<T, K, F>(items: &[T], key: F) -> Vec<K>
where
    K: Clone + Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::new();
    items
        .iter()
        .map(key)
        .filter(|k| seen.insert(k.clone()))
        .collect()
}

/// Check that a parallel array has as many entries as the axis it belongs to.
pub fn ensure_same_length(what: &str, expected: usize, found: usize) -> Result<(), DataError> {
    if expected == found {
        Ok(())
    } else {
        Err(DataError::LengthMismatch {
            what: what.to_string(),
            expected,
            found,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_population_std() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&v), Some(5.0));
        assert_eq!(std_dev(&v), Some(2.0));
        assert_eq!(mean(&[]), None);
        assert_eq!(std_dev(&[]), None);
    }

    #[test]
    fn min_max_skips_non_finite() {
        let v = [3.0, f64::NAN, -1.0, f64::INFINITY, 2.0];
        assert_eq!(min_max(v), Some((-1.0, 3.0)));
        assert_eq!(min_max(Vec::<f64>::new()), None);
    }

    #[test]
    fn histogram_last_bin_includes_max() {
        let h = Histogram::from_values(&[0.0, 1.0, 2.0, 3.0, 4.0], 4);
        assert_eq!(h.edges, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(h.counts, vec![1, 1, 1, 2]);
        assert_eq!(h.total(), 5);
    }

    #[test]
    fn histogram_of_constant_sample_is_centred() {
        let h = Histogram::from_values(&[2.0, 2.0, 2.0], 2);
        assert_eq!(h.edges, vec![1.5, 2.0, 2.5]);
        assert_eq!(h.counts, vec![0, 3]);
    }

    #[test]
    fn histogram_bins_pair_edges_with_counts() {
        let h = Histogram::from_values(&[0.0, 0.1, 0.9, 1.0], 2);
        let bins: Vec<_> = h.bins().collect();
        assert_eq!(bins, vec![(0.0, 0.5, 2), (0.5, 1.0, 2)]);
    }

    #[test]
    fn unique_keeps_first_appearance_order() {
        let rows = ["b", "a", "b", "c", "a"];
        assert_eq!(unique_in_order(&rows, |s| s.to_string()), vec!["b", "a", "c"]);
    }

    #[test]
    fn length_guard() {
        assert!(ensure_same_length("timings", 4, 4).is_ok());
        let err = ensure_same_length("timings", 4, 3).unwrap_err();
        assert_eq!(err.to_string(), "timings: expected 4 values, found 3");
    }
}
