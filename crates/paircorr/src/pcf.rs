//! Edge-corrected pair correlation: validation, domain set-up and the
//! boundary distance → correction → histogram pipeline.
//!
//! All input checks (point count, finiteness, bin edges, domain validity,
//! containment) run before any distance or clipping work, so an error never
//! comes with a partial result. The only failure that can come out of the
//! normaliser is `ZeroExpectedCount`, which names its bin.

use std::time::Instant;

use nalgebra::Vector2;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::bins::BinEdges;
use crate::correction::CorrectionTable;
use crate::error::PcfError;
use crate::geom2::{convex_hull, Domain, GeomCfg};
use crate::histogram::{normalize, ordered_counts};

/// What to do with points that fall outside the domain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutsidePolicy {
    /// Fail with `PointOutsideDomain`.
    #[default]
    Reject,
    /// Drop them before computing; density uses the remaining count.
    Exclude,
}

/// How reference points and their correction fractions are chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CorrectionMethod {
    /// Every point is a reference point; annuli are clipped against the domain.
    #[default]
    Exact,
    /// Only points farther than the largest bin edge from the boundary are
    /// reference points (their annuli never reach it). All points still count
    /// as neighbours. Cheaper, but discards the boundary band.
    Guard,
}

/// Options for `pair_correlation_2d_with`.
#[derive(Clone, Debug, Default)]
pub struct PcfCfg {
    /// Explicit shell polygon; the convex hull of the positions when `None`.
    pub domain_polygon: Option<Vec<Vector2<f64>>>,
    /// Exclusion zones carved out of the domain.
    pub holes: Vec<Vec<Vector2<f64>>>,
    pub outside: OutsidePolicy,
    pub method: CorrectionMethod,
    pub geom: GeomCfg,
}

/// Full result of one computation.
#[derive(Clone, Debug)]
pub struct PairCorrelation {
    /// Edge-corrected g(r), one value per bin.
    pub g: Vec<f64>,
    /// Bin centres `(r_k + r_{k+1}) / 2`.
    pub r_centers: Vec<f64>,
    /// Mean neighbour count per reference point and bin.
    pub pdf: Vec<f64>,
    /// Ordered neighbour observations per bin (`2 C_k` in `Exact` mode).
    pub counts: Vec<u64>,
    /// Points actually used (after `OutsidePolicy::Exclude`).
    pub positions: Vec<Vector2<f64>>,
    pub dist_to_boundary: Vec<f64>,
    /// Correction fractions; rows of non-reference points are not clipped.
    pub correction: CorrectionTable,
    /// `reference[i]` is true if point i served as an observation window.
    pub reference: Vec<bool>,
    /// Points per unit area.
    pub density: f64,
    pub domain_area: f64,
}

impl PairCorrelation {
    pub fn n_reference(&self) -> usize {
        self.reference.iter().filter(|&&r| r).count()
    }
}

/// g(r) and bin centres with the default configuration (convex-hull domain,
/// exact correction, outside points rejected).
pub fn pair_correlation_2d(
    positions: &[Vector2<f64>],
    bin_edges: &[f64],
) -> Result<(Vec<f64>, Vec<f64>), PcfError> {
    let out = pair_correlation_2d_with(positions, bin_edges, &PcfCfg::default())?;
    Ok((out.g, out.r_centers))
}

/// Edge-corrected pair correlation of `positions` over `bin_edges`.
pub fn pair_correlation_2d_with(
    positions: &[Vector2<f64>],
    bin_edges: &[f64],
    cfg: &PcfCfg,
) -> Result<PairCorrelation, PcfError> {
    let t0 = Instant::now();
    if positions.len() < 2 {
        return Err(PcfError::InsufficientData {
            got: positions.len(),
        });
    }
    if let Some(index) = positions
        .iter()
        .position(|p| !(p.x.is_finite() && p.y.is_finite()))
    {
        return Err(PcfError::NonFinitePoint { index });
    }
    let bins = BinEdges::new(bin_edges.to_vec())?;

    let domain = build_domain(positions, cfg)?;
    let positions = select_inside(&domain, positions, cfg.outside)?;
    let n = positions.len();
    let density = n as f64 / domain.area();
    debug!(
        elapsed_ms = ms(t0),
        n_points = n,
        area = domain.area(),
        holes = domain.holes().len(),
        "domain_ready"
    );

    let t = Instant::now();
    let dist_to_boundary: Vec<f64> = positions
        .par_iter()
        .map(|&p| domain.distance_to_boundary(p))
        .collect();
    let reference: Vec<bool> = match cfg.method {
        CorrectionMethod::Exact => vec![true; n],
        CorrectionMethod::Guard => dist_to_boundary.iter().map(|&d| d > bins.r_max()).collect(),
    };
    let n_reference = reference.iter().filter(|&&r| r).count();
    if n_reference == 0 {
        return Err(PcfError::InsufficientData { got: 0 });
    }
    debug!(elapsed_ms = ms(t), n_reference, "boundary_distances");

    let t = Instant::now();
    let correction = match cfg.method {
        CorrectionMethod::Exact => {
            CorrectionTable::compute(&domain, &positions, &dist_to_boundary, &bins)
        }
        CorrectionMethod::Guard => CorrectionTable::unclipped(n, bins.n_bins()),
    };
    debug!(elapsed_ms = ms(t), "correction_fractions");

    let t = Instant::now();
    let mask = match cfg.method {
        CorrectionMethod::Exact => None,
        CorrectionMethod::Guard => Some(reference.as_slice()),
    };
    let counts = ordered_counts(&positions, &bins, mask);
    let curves = normalize(&counts, &correction, mask, &bins, density)?;
    debug!(elapsed_ms = ms(t), pairs = n * (n - 1) / 2, "histogram");

    info!(
        n_points = n,
        n_reference,
        n_bins = bins.n_bins(),
        density,
        elapsed_ms = ms(t0),
        "pair_correlation"
    );
    Ok(PairCorrelation {
        g: curves.g,
        r_centers: bins.centers(),
        pdf: curves.pdf,
        counts,
        positions,
        dist_to_boundary,
        correction,
        reference,
        density,
        domain_area: domain.area(),
    })
}

fn build_domain(positions: &[Vector2<f64>], cfg: &PcfCfg) -> Result<Domain, PcfError> {
    let shell = match &cfg.domain_polygon {
        Some(shell) => shell.clone(),
        None => convex_hull(positions)
            .ok_or_else(|| PcfError::domain("convex hull of the points has no area"))?,
    };
    Domain::new(shell, cfg.holes.clone(), cfg.geom)
}

fn select_inside(
    domain: &Domain,
    positions: &[Vector2<f64>],
    policy: OutsidePolicy,
) -> Result<Vec<Vector2<f64>>, PcfError> {
    match policy {
        OutsidePolicy::Reject => {
            if let Some(index) = positions.iter().position(|&p| !domain.contains(p)) {
                let p = positions[index];
                return Err(PcfError::PointOutsideDomain {
                    index,
                    x: p.x,
                    y: p.y,
                });
            }
            Ok(positions.to_vec())
        }
        OutsidePolicy::Exclude => {
            let kept: Vec<_> = positions
                .iter()
                .copied()
                .filter(|&p| domain.contains(p))
                .collect();
            if kept.len() < 2 {
                return Err(PcfError::InsufficientData { got: kept.len() });
            }
            Ok(kept)
        }
    }
}

#[inline]
fn ms(t: Instant) -> f64 {
    t.elapsed().as_secs_f64() * 1e3
}
