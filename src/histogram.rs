//! Histogram binning.

use anyhow::{anyhow, Result};
use serde::Deserialize;

/// How many bins to use when nobody asks for a specific number.
pub const DEFAULT_BIN_COUNT: usize = 10;

/// How to split our data into bins.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(untagged)]
pub enum Bins {
    /// Use [`DEFAULT_BIN_COUNT`] evenly spaced bins.
    #[default]
    Auto,
    /// Use this many evenly spaced bins spanning the data.
    Count(usize),
    /// Use exactly these bin edges.
    Edges(Vec<f64>),
}

/// A computed histogram. There is always one more edge than there are counts.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    edges: Vec<f64>,
    counts: Vec<u64>,
}

impl Histogram {
    /// Bin `data`. Non-finite values are skipped.
    pub fn compute(data: &[f64], bins: &Bins) -> Result<Self> {
        let edges = match bins {
            Bins::Auto => even_edges(data, DEFAULT_BIN_COUNT),
            Bins::Count(0) => {
                return Err(anyhow!("histogram needs at least one bin"));
            }
            Bins::Count(n) => even_edges(data, *n),
            Bins::Edges(edges) => {
                if edges.len() < 2 {
                    return Err(anyhow!(
                        "histogram needs at least 2 bin edges, got {}",
                        edges.len()
                    ));
                }
                if edges.iter().any(|e| !e.is_finite())
                    || edges.windows(2).any(|w| w[0] >= w[1])
                {
                    return Err(anyhow!(
                        "histogram bin edges must be finite and strictly \
                         increasing"
                    ));
                }
                edges.clone()
            }
        };

        let mut counts = vec![0; edges.len() - 1];
        for &value in data.iter().filter(|v| v.is_finite()) {
            if let Some(bin) = bin_index(&edges, value) {
                counts[bin] += 1;
            }
        }
        Ok(Self { edges, counts })
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }

    /// Iterate over `(left_edge, right_edge, count)` for every bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, u64)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(w, &c)| (w[0], w[1], c))
    }

    /// The largest count, or 0 for an empty histogram.
    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Evenly spaced edges covering the finite values in `data`.
fn even_edges(data: &[f64], n: usize) -> Vec<f64> {
    let (min, max) = data
        .iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .unwrap_or((0.0, 1.0));
    let (min, max) = if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };

    let width = (max - min) / n as f64;
    let mut edges = (0..n)
        .map(|i| {
            if width.is_finite() {
                min + width * i as f64
            } else {
                // The span overflows, so interpolate between the endpoints.
                let t = i as f64 / n as f64;
                min * (1.0 - t) + max * t
            }
        })
        .collect::<Vec<_>>();
    // Pin the last edge so the maximum always lands in the final bin.
    edges.push(max);
    edges
}

/// Which bin does `value` fall into? Bins are `[left, right)`, except for the
/// last bin, which also includes its right edge.
fn bin_index(edges: &[f64], value: f64) -> Option<usize> {
    let first = edges[0];
    let last = edges[edges.len() - 1];
    if value < first || value > last {
        return None;
    }
    if value == last {
        return Some(edges.len() - 2);
    }
    // `partition_point` finds the first edge strictly greater than `value`.
    edges.partition_point(|&e| e <= value).checked_sub(1)
}
