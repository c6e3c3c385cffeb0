//! Error taxonomy for the pair correlation pipeline.
//!
//! Everything except `ZeroExpectedCount` is raised during eager validation,
//! before any distance or clipping work starts, so a caller never sees a
//! partial result.

use thiserror::Error;

/// Errors surfaced by `pair_correlation_2d` and its building blocks.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PcfError {
    /// Fewer than two points (or reference points) are available.
    #[error("need at least 2 points, got {got}")]
    InsufficientData { got: usize },

    /// Bin edges are too few, non-finite, negative or not strictly increasing.
    #[error("invalid bin edges: {reason}")]
    InvalidBinEdges { reason: String },

    /// The derived or supplied domain has no usable area or is not simple.
    #[error("degenerate domain: {reason}")]
    DegenerateDomain { reason: String },

    /// A point lies outside an explicitly supplied domain polygon.
    #[error("point {index} at ({x}, {y}) lies outside the domain")]
    PointOutsideDomain { index: usize, x: f64, y: f64 },

    /// A point has a NaN or infinite coordinate.
    #[error("point {index} has a non-finite coordinate")]
    NonFinitePoint { index: usize },

    /// The expected neighbour count of a bin is zero, so g(r) is undefined there.
    #[error("expected count is zero for bin {bin} [{r_inner}, {r_outer})")]
    ZeroExpectedCount {
        bin: usize,
        r_inner: f64,
        r_outer: f64,
    },
}

impl PcfError {
    pub(crate) fn bins(reason: impl Into<String>) -> Self {
        PcfError::InvalidBinEdges {
            reason: reason.into(),
        }
    }

    pub(crate) fn domain(reason: impl Into<String>) -> Self {
        PcfError::DegenerateDomain {
            reason: reason.into(),
        }
    }
}
