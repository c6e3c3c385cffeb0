//! Simple polygon rings and the domain built from them.
//!
//! Invariants (checked by the constructors)
//! - Every ring has >= 3 distinct vertices, finite coordinates, no
//!   self-intersections and |area| above the area tolerance.
//! - Rings are stored CCW; the shell's signed area is positive.
//! - Holes lie inside the shell and do not overlap each other: no hole
//!   vertex is outside the shell or inside another hole, and no hole edge
//!   properly crosses a shell edge or another hole's edge.

use nalgebra::Vector2;

use super::clip::disk_polygon_area;
use super::hull::convex_hull;
use super::types::{orient, segment_distance, GeomCfg};
use crate::error::PcfError;

/// Where a point sits relative to a ring or domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    Inside,
    Boundary,
    Outside,
}

/// A simple closed polygon stored as a CCW vertex ring.
#[derive(Clone, Debug)]
pub struct Polygon {
    verts: Vec<Vector2<f64>>,
    area: f64,
}

impl Polygon {
    /// Validate and normalise a vertex ring.
    ///
    /// A repeated closing vertex and consecutive duplicates are dropped; CW
    /// input is reversed.
    pub fn new(vertices: Vec<Vector2<f64>>, cfg: GeomCfg) -> Result<Self, PcfError> {
        if vertices.iter().any(|v| !(v.x.is_finite() && v.y.is_finite())) {
            return Err(PcfError::domain("vertex with non-finite coordinate"));
        }
        let mut verts = vertices;
        verts.dedup();
        while verts.len() > 1 && verts.first() == verts.last() {
            verts.pop();
        }
        if verts.len() < 3 {
            return Err(PcfError::domain(format!(
                "ring needs at least 3 distinct vertices, got {}",
                verts.len()
            )));
        }

        let diag = bbox_diagonal(&verts);
        let signed = Self::signed_area(&verts);
        if signed.abs() <= cfg.eps_area * diag * diag {
            return Err(PcfError::domain(format!(
                "ring area {signed} is not positive (collinear vertices?)"
            )));
        }
        if let Some((i, j)) = first_self_intersection(&verts) {
            return Err(PcfError::domain(format!(
                "ring is self-intersecting (edges {i} and {j} cross)"
            )));
        }
        if signed < 0.0 {
            verts.reverse();
        }
        Ok(Self {
            verts,
            area: signed.abs(),
        })
    }

    /// Shoelace formula; positive for CCW order.
    pub fn signed_area(vertices: &[Vector2<f64>]) -> f64 {
        let n = vertices.len();
        if n < 3 {
            return 0.0;
        }
        let twice: f64 = (0..n)
            .map(|k| {
                let a = vertices[k];
                let b = vertices[(k + 1) % n];
                a.x * b.y - a.y * b.x
            })
            .sum();
        0.5 * twice
    }

    #[inline]
    pub fn vertices(&self) -> &[Vector2<f64>] {
        &self.verts
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Edges `(v_k, v_{k+1})`, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Vector2<f64>, Vector2<f64>)> + '_ {
        let n = self.verts.len();
        (0..n).map(move |k| (self.verts[k], self.verts[(k + 1) % n]))
    }

    /// Distance from `p` to the nearest edge.
    pub fn distance_to_boundary(&self, p: Vector2<f64>) -> f64 {
        self.edges()
            .map(|(a, b)| segment_distance(p, a, b))
            .fold(f64::INFINITY, f64::min)
    }

    /// Crossing-number test; points within `tol` of an edge are `Boundary`.
    pub fn locate(&self, p: Vector2<f64>, tol: f64) -> Location {
        if self.distance_to_boundary(p) <= tol {
            return Location::Boundary;
        }
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > p.y) != (b.y > p.y) {
                let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if p.x < x {
                    inside = !inside;
                }
            }
        }
        if inside {
            Location::Inside
        } else {
            Location::Outside
        }
    }

    /// Inside or within `tol` of an edge.
    #[inline]
    pub fn contains(&self, p: Vector2<f64>, tol: f64) -> bool {
        self.locate(p, tol) != Location::Outside
    }

    /// Area of `disk(center, r) ∩ self`.
    #[inline]
    pub fn disk_intersection_area(&self, center: Vector2<f64>, r: f64) -> f64 {
        disk_polygon_area(center, r, &self.verts)
    }
}

/// Bounded planar region: a shell polygon minus non-overlapping holes.
#[derive(Clone, Debug)]
pub struct Domain {
    shell: Polygon,
    holes: Vec<Polygon>,
    area: f64,
    tol: f64,
}

impl Domain {
    /// Build a domain from an explicit shell and optional holes.
    pub fn new(
        shell: Vec<Vector2<f64>>,
        holes: Vec<Vec<Vector2<f64>>>,
        cfg: GeomCfg,
    ) -> Result<Self, PcfError> {
        let shell = Polygon::new(shell, cfg)?;
        let tol = cfg.eps_boundary * bbox_diagonal(shell.vertices());
        let holes = holes
            .into_iter()
            .map(|h| Polygon::new(h, cfg))
            .collect::<Result<Vec<_>, _>>()?;

        for (hi, hole) in holes.iter().enumerate() {
            if hole.vertices().iter().any(|&v| !shell.contains(v, tol)) {
                return Err(PcfError::domain(format!("hole {hi} extends outside the shell")));
            }
            if let Some((e, f)) = first_crossing(hole, &shell) {
                return Err(PcfError::domain(format!("hole {hi} crosses the shell ({e}, {f})")));
            }
            for (hj, other) in holes.iter().enumerate() {
                if hi != hj
                    && other
                        .vertices()
                        .iter()
                        .any(|&v| hole.locate(v, tol) == Location::Inside)
                {
                    return Err(PcfError::domain(format!("holes {hi} and {hj} overlap")));
                }
                if hi < hj {
                    if let Some((e, f)) = first_crossing(hole, other) {
                        return Err(PcfError::domain(format!(
                            "hole {hi} edge {e} crosses hole {hj} edge {f}"
                        )));
                    }
                }
            }
        }

        let area = shell.area() - holes.iter().map(Polygon::area).sum::<f64>();
        let diag = bbox_diagonal(shell.vertices());
        if !(area > cfg.eps_area * diag * diag) {
            return Err(PcfError::domain(format!(
                "domain area {area} is not positive after removing holes"
            )));
        }
        Ok(Self {
            shell,
            holes,
            area,
            tol,
        })
    }

    /// Convex hull of `points` as a hole-free domain.
    ///
    /// This is a simplification: for markedly non-convex clouds the hull
    /// includes empty regions and the boundary correction is underestimated.
    pub fn convex_hull_of(points: &[Vector2<f64>], cfg: GeomCfg) -> Result<Self, PcfError> {
        let hull = convex_hull(points)
            .ok_or_else(|| PcfError::domain("convex hull of the points has no area"))?;
        Self::new(hull, Vec::new(), cfg)
    }

    /// Enclosed area (shell minus holes); always positive.
    #[inline]
    pub fn area(&self) -> f64 {
        self.area
    }

    #[inline]
    pub fn shell(&self) -> &Polygon {
        &self.shell
    }

    #[inline]
    pub fn holes(&self) -> &[Polygon] {
        &self.holes
    }

    /// Absolute on-boundary tolerance used by `locate`.
    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tol
    }

    pub fn locate(&self, p: Vector2<f64>) -> Location {
        match self.shell.locate(p, self.tol) {
            Location::Outside => Location::Outside,
            shell_loc => {
                let mut loc = shell_loc;
                for hole in &self.holes {
                    match hole.locate(p, self.tol) {
                        Location::Inside => return Location::Outside,
                        Location::Boundary => loc = Location::Boundary,
                        Location::Outside => {}
                    }
                }
                loc
            }
        }
    }

    /// Inside or on the boundary.
    #[inline]
    pub fn contains(&self, p: Vector2<f64>) -> bool {
        self.locate(p) != Location::Outside
    }

    /// Distance to the nearest shell or hole edge.
    pub fn distance_to_boundary(&self, p: Vector2<f64>) -> f64 {
        self.holes
            .iter()
            .map(|h| h.distance_to_boundary(p))
            .fold(self.shell.distance_to_boundary(p), f64::min)
    }

    /// Area of `disk(center, r) ∩ domain`.
    pub fn disk_intersection_area(&self, center: Vector2<f64>, r: f64) -> f64 {
        let carved: f64 = self
            .holes
            .iter()
            .map(|h| h.disk_intersection_area(center, r))
            .sum();
        self.shell.disk_intersection_area(center, r) - carved
    }

    /// Area of `(disk(r_outer) \ disk(r_inner)) ∩ domain`, clamped at zero.
    pub fn annulus_intersection_area(
        &self,
        center: Vector2<f64>,
        r_inner: f64,
        r_outer: f64,
    ) -> f64 {
        let outer = self.disk_intersection_area(center, r_outer);
        let inner = self.disk_intersection_area(center, r_inner);
        (outer - inner).max(0.0)
    }
}

fn bbox_diagonal(verts: &[Vector2<f64>]) -> f64 {
    let (mut lo, mut hi) = (verts[0], verts[0]);
    for v in verts {
        lo = lo.inf(v);
        hi = hi.sup(v);
    }
    (hi - lo).norm()
}

/// First pair of non-adjacent edges that touch or cross, if any.
fn first_self_intersection(verts: &[Vector2<f64>]) -> Option<(usize, usize)> {
    let n = verts.len();
    for i in 0..n {
        let (a, b) = (verts[i], verts[(i + 1) % n]);
        for j in (i + 1)..n {
            if j == i + 1 || (i == 0 && j == n - 1) {
                continue;
            }
            let (c, d) = (verts[j], verts[(j + 1) % n]);
            if segments_intersect(a, b, c, d) {
                return Some((i, j));
            }
        }
    }
    None
}

/// First pair of edges of two rings that properly cross. Shared vertices
/// and collinear overlaps do not count.
fn first_crossing(a: &Polygon, b: &Polygon) -> Option<(usize, usize)> {
    a.edges().enumerate().find_map(|(i, (p, q))| {
        b.edges()
            .position(|(r, s)| segments_cross(p, q, r, s))
            .map(|j| (i, j))
    })
}

/// Interiors of `[a, b]` and `[c, d]` meet in a single point.
fn segments_cross(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>, d: Vector2<f64>) -> bool {
    orient(a, b, c) * orient(a, b, d) < 0.0 && orient(c, d, a) * orient(c, d, b) < 0.0
}

fn segments_intersect(
    a: Vector2<f64>,
    b: Vector2<f64>,
    c: Vector2<f64>,
    d: Vector2<f64>,
) -> bool {
    if segments_cross(a, b, c, d) {
        return true;
    }
    let o1 = orient(a, b, c);
    let o2 = orient(a, b, d);
    let o3 = orient(c, d, a);
    let o4 = orient(c, d, b);
    (o1 == 0.0 && on_segment(a, b, c))
        || (o2 == 0.0 && on_segment(a, b, d))
        || (o3 == 0.0 && on_segment(c, d, a))
        || (o4 == 0.0 && on_segment(c, d, b))
}

/// `p` collinear with `[a, b]` lies within its bounding box.
fn on_segment(a: Vector2<f64>, b: Vector2<f64>, p: Vector2<f64>) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}
