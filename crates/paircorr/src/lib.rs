//! Edge-corrected two-dimensional pair correlation function g(r).
//!
//! Points near the boundary of a finite domain have less room for neighbours
//! at a given radius than interior points, so a plain histogram of pair
//! distances underestimates g(r). This crate clips each point's annulus
//! against the domain polygon and normalises by the area each point actually
//! has available.
//!
//! Layout (leaf-first)
//! - `geom2`: domain polygons, holes, convex hull, circle clipping.
//! - `distance`: pairwise distance table.
//! - `bins`: validated radius bins.
//! - `correction`: per-point, per-bin annulus fractions.
//! - `histogram`: pair counts and normalisation.
//! - `pcf`: the end-to-end entry points.
//! - `sample`: reproducible uniform point clouds.

pub mod bins;
pub mod correction;
pub mod distance;
pub mod error;
pub mod geom2;
pub mod histogram;
pub mod pcf;
pub mod sample;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::PcfError;
pub use nalgebra::Vector2 as Vec2;
pub use pcf::{
    pair_correlation_2d, pair_correlation_2d_with, CorrectionMethod, OutsidePolicy,
    PairCorrelation, PcfCfg,
};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::bins::BinEdges;
    pub use crate::correction::CorrectionTable;
    pub use crate::distance::DistanceTable;
    pub use crate::error::PcfError;
    pub use crate::geom2::{convex_hull, disk_polygon_area, Domain, GeomCfg, Location, Polygon};
    pub use crate::pcf::{
        pair_correlation_2d, pair_correlation_2d_with, CorrectionMethod, OutsidePolicy,
        PairCorrelation, PcfCfg,
    };
    pub use crate::sample::{rectangle, sample_uniform, ReplayToken};
    pub use nalgebra::Vector2 as Vec2;
}
