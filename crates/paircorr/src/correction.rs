//! Boundary correction: the fraction of each point's annulus inside the domain.
//!
//! `w[i][k] = area(annulus_k(p_i) ∩ domain) / (π (r_{k+1}² - r_k²))`.
//!
//! A bin whose outer radius does not exceed the point's distance to the
//! boundary has its whole annulus inside the domain, so its fraction is set to
//! exactly 1 without clipping. Only the remaining bins go through
//! `Domain::annulus_intersection_area`. Points are processed in parallel and
//! each worker owns one row of the table.

use nalgebra::Vector2;
use rayon::prelude::*;

use crate::bins::BinEdges;
use crate::geom2::Domain;

/// Row-major `n_points × n_bins` table of correction fractions in `[0, 1]`.
#[derive(Clone, Debug)]
pub struct CorrectionTable {
    n_points: usize,
    n_bins: usize,
    w: Vec<f64>,
}

impl CorrectionTable {
    /// `dist_to_boundary[i]` must be `domain.distance_to_boundary(points[i])`.
    pub fn compute(
        domain: &Domain,
        points: &[Vector2<f64>],
        dist_to_boundary: &[f64],
        bins: &BinEdges,
    ) -> Self {
        debug_assert_eq!(points.len(), dist_to_boundary.len());
        let n_bins = bins.n_bins();
        let mut w = vec![1.0; points.len() * n_bins];
        if n_bins > 0 {
            w.par_chunks_mut(n_bins)
                .zip(points.par_iter().zip(dist_to_boundary.par_iter()))
                .for_each(|(row, (&p, &clearance))| fill_row(row, domain, p, clearance, bins));
        }
        Self {
            n_points: points.len(),
            n_bins,
            w,
        }
    }

    /// Table of ones, for reference points that are all far from the boundary.
    pub fn unclipped(n_points: usize, n_bins: usize) -> Self {
        Self {
            n_points,
            n_bins,
            w: vec![1.0; n_points * n_bins],
        }
    }

    #[inline]
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    #[inline]
    pub fn n_bins(&self) -> usize {
        self.n_bins
    }

    #[inline]
    pub fn get(&self, i: usize, k: usize) -> f64 {
        self.w[i * self.n_bins + k]
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.w[i * self.n_bins..(i + 1) * self.n_bins]
    }

    /// `Σ_i w[i][k]` over the points selected by `mask` (all points if `None`).
    ///
    /// Summed sequentially in point order so the result is reproducible.
    pub fn column_sum(&self, k: usize, mask: Option<&[bool]>) -> f64 {
        (0..self.n_points)
            .filter(|&i| mask.map_or(true, |m| m[i]))
            .map(|i| self.get(i, k))
            .sum()
    }
}

fn fill_row(row: &mut [f64], domain: &Domain, p: Vector2<f64>, clearance: f64, bins: &BinEdges) {
    for (k, slot) in row.iter_mut().enumerate() {
        let r_out = bins.outer(k);
        if clearance >= r_out {
            continue;
        }
        let inside = domain.annulus_intersection_area(p, bins.inner(k), r_out);
        *slot = (inside / bins.nominal_area(k)).clamp(0.0, 1.0);
    }
}
