//! Distance histograms and the edge-corrected normalisation.
//!
//! For bin k with ordered neighbour observations `O_k` (counted from the
//! reference points), correction fractions `w[i][k]` and density `ρ`:
//!
//! ```text
//! D_k = ρ · Σ_{i ∈ ref} w[i][k] · π (r_{k+1}² - r_k²)
//! g_k = O_k / D_k
//! ```
//!
//! With every point as a reference, `O_k = 2 C_k` where `C_k` counts
//! unordered pairs.
//!
//! Distances are binned as they are computed, one row `i < j` at a time, so
//! memory stays linear in the number of points.

use nalgebra::Vector2;
use rayon::prelude::*;

use crate::bins::BinEdges;
use crate::correction::CorrectionTable;
use crate::distance::euclidean;
use crate::error::PcfError;

/// Unordered pairs per bin (`C_k`).
pub fn pair_counts(points: &[Vector2<f64>], bins: &BinEdges) -> Vec<u64> {
    accumulate(points, bins, |_, _| 1)
}

/// Ordered observations per bin: each pair `(i, j)` contributes once for
/// every endpoint that is a reference point. `None` means all points.
pub fn ordered_counts(
    points: &[Vector2<f64>],
    bins: &BinEdges,
    reference: Option<&[bool]>,
) -> Vec<u64> {
    match reference {
        None => accumulate(points, bins, |_, _| 2),
        Some(mask) => accumulate(points, bins, |i, j| u64::from(mask[i]) + u64::from(mask[j])),
    }
}

fn accumulate<F>(points: &[Vector2<f64>], bins: &BinEdges, weight: F) -> Vec<u64>
where
    F: Fn(usize, usize) -> u64 + Sync,
{
    let n_bins = bins.n_bins();
    (0..points.len().saturating_sub(1))
        .into_par_iter()
        .fold(
            || vec![0u64; n_bins],
            |mut acc, i| {
                let p = points[i];
                for (j, &q) in points.iter().enumerate().skip(i + 1) {
                    if let Some(k) = bins.bin_of(euclidean(p, q)) {
                        acc[k] += weight(i, j);
                    }
                }
                acc
            },
        )
        .reduce(
            || vec![0u64; n_bins],
            |mut a, b| {
                a.iter_mut().zip(b).for_each(|(x, y)| *x += y);
                a
            },
        )
}

/// Normalised curves for one computation.
#[derive(Clone, Debug, PartialEq)]
pub struct Normalized {
    /// Edge-corrected pair correlation per bin.
    pub g: Vec<f64>,
    /// Mean number of neighbours per reference point in each bin.
    pub pdf: Vec<f64>,
}

/// Combine ordered counts with correction fractions and density.
///
/// Fails with `ZeroExpectedCount` for the first bin whose expected count is
/// not a positive finite number.
pub fn normalize(
    counts: &[u64],
    correction: &CorrectionTable,
    reference: Option<&[bool]>,
    bins: &BinEdges,
    density: f64,
) -> Result<Normalized, PcfError> {
    debug_assert_eq!(counts.len(), bins.n_bins());
    let n_ref = match reference {
        Some(mask) => mask.iter().filter(|&&r| r).count(),
        None => correction.n_points(),
    };
    if n_ref == 0 {
        return Err(PcfError::InsufficientData { got: 0 });
    }

    let mut g = Vec::with_capacity(counts.len());
    let mut pdf = Vec::with_capacity(counts.len());
    for (k, &observed) in counts.iter().enumerate() {
        let available = correction.column_sum(k, reference) * bins.nominal_area(k);
        let expected = density * available;
        if !(expected > 0.0 && expected.is_finite()) {
            return Err(PcfError::ZeroExpectedCount {
                bin: k,
                r_inner: bins.inner(k),
                r_outer: bins.outer(k),
            });
        }
        g.push(observed as f64 / expected);
        pdf.push(observed as f64 / n_ref as f64);
    }
    Ok(Normalized { g, pdf })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceTable;
    use nalgebra::vector;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn corners() -> Vec<Vector2<f64>> {
        vec![
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![0.0, 1.0],
            vector![1.0, 1.0],
        ]
    }

    #[test]
    fn counts_unordered_and_ordered() {
        let t = corners();
        let bins = BinEdges::new(vec![0.0, 0.5, 1.5]).unwrap();
        assert_eq!(pair_counts(&t, &bins), vec![0, 6]);
        assert_eq!(ordered_counts(&t, &bins, None), vec![0, 12]);
        let mask = [true, false, false, false];
        // Point 0 sees its three neighbours.
        assert_eq!(ordered_counts(&t, &bins, Some(&mask[..])), vec![0, 3]);
    }

    #[test]
    fn top_edge_is_inclusive() {
        let t = corners();
        let bins = BinEdges::new(vec![0.0, 1.0]).unwrap();
        // The four unit sides land exactly on the top edge; diagonals exceed it.
        assert_eq!(pair_counts(&t, &bins), vec![4]);
        let bins = BinEdges::new(vec![0.0, 1.0, 2.0]).unwrap();
        assert_eq!(pair_counts(&t, &bins), vec![0, 6]);
    }

    #[test]
    fn streamed_counts_match_a_stored_table() {
        let mut rng = StdRng::seed_from_u64(11);
        let pts: Vec<_> = (0..300)
            .map(|_| vector![rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)])
            .collect();
        let bins = BinEdges::uniform(0.4, 8).unwrap();
        let table = DistanceTable::compute(&pts).unwrap();
        let mut expected = vec![0u64; 8];
        for (_, _, d) in table.iter_pairs() {
            if let Some(k) = bins.bin_of(d) {
                expected[k] += 1;
            }
        }
        assert_eq!(pair_counts(&pts, &bins), expected);

        let mask: Vec<bool> = (0..pts.len()).map(|i| i % 3 == 0).collect();
        let mut ordered = vec![0u64; 8];
        for (i, j, d) in table.iter_pairs() {
            if let Some(k) = bins.bin_of(d) {
                ordered[k] += u64::from(mask[i]) + u64::from(mask[j]);
            }
        }
        assert_eq!(ordered_counts(&pts, &bins, Some(mask.as_slice())), ordered);
    }

    #[test]
    fn normalize_uses_reference_fractions() {
        let bins = BinEdges::new(vec![0.0, 1.0]).unwrap();
        let corr = CorrectionTable::unclipped(2, 1);
        let out = normalize(&[4], &corr, None, &bins, 2.0 / std::f64::consts::PI).unwrap();
        // expected = ρ · 2 · π = 4
        assert!((out.g[0] - 1.0).abs() < 1e-12);
        assert!((out.pdf[0] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn zero_expected_count_names_the_bin() {
        let bins = BinEdges::new(vec![0.0, 1.0, 2.0]).unwrap();
        let corr = CorrectionTable::unclipped(2, 2);
        let err = normalize(&[1, 1], &corr, Some(&[false, false][..]), &bins, 1.0).unwrap_err();
        assert_eq!(err, PcfError::InsufficientData { got: 0 });
        let err = normalize(&[1, 1], &corr, None, &bins, 0.0).unwrap_err();
        assert!(matches!(err, PcfError::ZeroExpectedCount { bin: 0, .. }));
    }
}
