//! Planar domain model: polygon rings, holes, containment and circle clipping.
//!
//! Purpose
//! - Represent the bounded region that contains the point cloud as plain
//!   ordered vertex rings (CCW shell, optional CCW holes).
//! - Answer the two questions the correction engine asks: how large is the
//!   domain, and how much of a disk/annulus centred at a point lies inside it.
//!
//! Conventions
//! - Rings are stored counter-clockwise with first != last; the closing edge
//!   is implicit.
//! - Tolerances live in `GeomCfg` and are scaled by the shell's bounding-box
//!   diagonal, so results are invariant under uniform rescaling.
//!
//! Code cross-refs: `Polygon`, `Domain`, `disk_polygon_area`, `convex_hull`

mod clip;
mod hull;
mod polygon;
mod types;

pub use clip::disk_polygon_area;
pub use hull::convex_hull;
pub use polygon::{Domain, Location, Polygon};
pub use types::GeomCfg;

#[cfg(test)]
mod tests;
