//! Tolerances and small vector helpers shared by the domain model.

use nalgebra::Vector2;

/// Geometry configuration (tolerances).
///
/// Both values are relative: `eps_boundary` is multiplied by the shell's
/// bounding-box diagonal, `eps_area` by its square.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    /// Points closer than this to an edge count as lying on the boundary.
    pub eps_boundary: f64,
    /// Rings with |area| below this are rejected as degenerate.
    pub eps_area: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_boundary: 1e-9,
            eps_area: 1e-12,
        }
    }
}

/// z-component of `a × b`.
#[inline]
pub(crate) fn cross(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Orientation of the triple (a, b, c): > 0 for a left turn.
#[inline]
pub(crate) fn orient(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    cross(b - a, c - a)
}

/// Euclidean distance from `p` to the closed segment `[a, b]`.
pub(crate) fn segment_distance(p: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    let t = if len2 > 0.0 {
        ((p - a).dot(&ab) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (a + ab * t - p).norm()
}
