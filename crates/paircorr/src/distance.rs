//! Pairwise Euclidean distances over unordered point pairs.
//!
//! Storage is condensed (upper triangle, row-major): pair `(i, j)` with
//! `i < j` lives at `i*n - i*(i+1)/2 + (j - i - 1)`. Rows are filled in
//! parallel; each row writes its own contiguous slice.

use nalgebra::Vector2;
use rayon::prelude::*;

use crate::error::PcfError;

#[inline]
pub fn euclidean(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    (a - b).norm()
}

/// Symmetric distance table without the diagonal.
#[derive(Clone, Debug)]
pub struct DistanceTable {
    n: usize,
    data: Vec<f64>,
}

impl DistanceTable {
    /// Fails with `InsufficientData` when fewer than two points are given.
    pub fn compute(points: &[Vector2<f64>]) -> Result<Self, PcfError> {
        let n = points.len();
        if n < 2 {
            return Err(PcfError::InsufficientData { got: n });
        }
        let mut data = vec![0.0; n * (n - 1) / 2];
        let mut rows: Vec<(usize, &mut [f64])> = Vec::with_capacity(n - 1);
        let mut rest = data.as_mut_slice();
        for i in 0..n - 1 {
            let (row, tail) = rest.split_at_mut(n - 1 - i);
            rows.push((i, row));
            rest = tail;
        }
        rows.into_par_iter().for_each(|(i, row)| {
            let p = points[i];
            for (slot, q) in row.iter_mut().zip(&points[i + 1..]) {
                *slot = euclidean(p, *q);
            }
        });
        Ok(Self { n, data })
    }

    /// Number of points.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of unordered pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Distance between distinct points `i` and `j` (order irrelevant).
    pub fn get(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i != j, "diagonal is not stored");
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        self.data[self.offset(i) + (j - i - 1)]
    }

    /// Distances from `i` to every `j > i`.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        let start = self.offset(i);
        &self.data[start..start + (self.n - 1 - i)]
    }

    /// All `(i, j, d)` with `i < j`.
    pub fn iter_pairs(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.n.saturating_sub(1)).flat_map(move |i| {
            self.row(i)
                .iter()
                .enumerate()
                .map(move |(k, &d)| (i, i + 1 + k, d))
        })
    }

    #[inline]
    fn offset(&self, i: usize) -> usize {
        i * self.n - i * (i + 1) / 2
    }
}
