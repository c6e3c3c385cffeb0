//! Radius bin edges.
//!
//! Bins are half-open `[r_k, r_{k+1})` except the last one, which also
//! includes its upper edge `r_{M-1}`.

use std::f64::consts::PI;

use crate::error::PcfError;

/// Validated, strictly increasing, non-negative bin edges (at least two).
#[derive(Clone, Debug, PartialEq)]
pub struct BinEdges {
    edges: Vec<f64>,
}

impl BinEdges {
    pub fn new(edges: Vec<f64>) -> Result<Self, PcfError> {
        if edges.len() < 2 {
            return Err(PcfError::bins(format!(
                "need at least 2 edges, got {}",
                edges.len()
            )));
        }
        if let Some(i) = edges.iter().position(|e| !e.is_finite()) {
            return Err(PcfError::bins(format!("edge {i} is not finite")));
        }
        if let Some(i) = edges.iter().position(|&e| e < 0.0) {
            return Err(PcfError::bins(format!("edge {i} is negative ({})", edges[i])));
        }
        if let Some(i) = edges.windows(2).position(|w| w[1] <= w[0]) {
            return Err(PcfError::bins(format!(
                "edges must be strictly increasing, but edge {} ({}) <= edge {} ({})",
                i + 1,
                edges[i + 1],
                i,
                edges[i]
            )));
        }
        Ok(Self { edges })
    }

    /// `count` equal-width bins covering `[0, r_max]`.
    pub fn uniform(r_max: f64, count: usize) -> Result<Self, PcfError> {
        if count == 0 {
            return Err(PcfError::bins("need at least one bin"));
        }
        let step = r_max / count as f64;
        Self::new((0..=count).map(|k| k as f64 * step).collect())
    }

    #[inline]
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Number of bins (`M - 1`).
    #[inline]
    pub fn n_bins(&self) -> usize {
        self.edges.len() - 1
    }

    #[inline]
    pub fn inner(&self, k: usize) -> f64 {
        self.edges[k]
    }

    #[inline]
    pub fn outer(&self, k: usize) -> f64 {
        self.edges[k + 1]
    }

    /// Largest edge `r_{M-1}`.
    #[inline]
    pub fn r_max(&self) -> f64 {
        self.edges[self.edges.len() - 1]
    }

    /// Full annulus area `π (r_{k+1}² - r_k²)`.
    #[inline]
    pub fn nominal_area(&self, k: usize) -> f64 {
        let (a, b) = (self.inner(k), self.outer(k));
        PI * (b * b - a * a)
    }

    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect()
    }

    /// Bin index containing distance `d`, if any.
    pub fn bin_of(&self, d: f64) -> Option<usize> {
        let last = self.r_max();
        if !(d >= self.edges[0] && d <= last) {
            return None;
        }
        if d == last {
            return Some(self.n_bins() - 1);
        }
        Some(self.edges.partition_point(|&e| e <= d) - 1)
    }
}
