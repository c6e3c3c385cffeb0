//! Circle–polygon clipping by signed-area accumulation.
//!
//! The area of `disk ∩ polygon` is the sum, over the polygon's edges, of the
//! signed area of `disk ∩ triangle(center, a, b)`. Each edge is split where it
//! crosses the circle; a piece inside the disk contributes its triangle
//! `½ (p × q)`, a piece outside contributes the circular sector `½ r² θ(p, q)`.
//! Signs cancel outside the polygon, so convex and non-convex rings are both
//! handled, and the two trivial cases (disk inside ring, ring inside disk)
//! fall out without special-casing.

use nalgebra::Vector2;

use super::types::cross;

/// Signed area of `disk(center, r) ∩ ring`; positive for a CCW ring.
///
/// `r <= 0` (or a ring with fewer than three vertices) yields `0.0`.
pub fn disk_polygon_area(center: Vector2<f64>, r: f64, ring: &[Vector2<f64>]) -> f64 {
    if !(r > 0.0) || ring.len() < 3 {
        return 0.0;
    }
    let r2 = r * r;
    let n = ring.len();
    let twice: f64 = (0..n)
        .map(|k| edge_term(ring[k] - center, ring[(k + 1) % n] - center, r2))
        .sum();
    0.5 * twice
}

/// Twice the signed area of `disk(0, √r2) ∩ triangle(0, a, b)`.
fn edge_term(a: Vector2<f64>, b: Vector2<f64>, r2: f64) -> f64 {
    let d = b - a;
    let dd = d.norm_squared();
    if dd == 0.0 {
        return 0.0;
    }
    // |a + t d|² = r²  ⇔  dd t² + 2 ad t + (|a|² - r²) = 0
    let ad = a.dot(&d);
    let disc = ad * ad - dd * (a.norm_squared() - r2);

    let mut cuts = [0.0f64; 4];
    let mut m = 1;
    if disc > 0.0 {
        let s = disc.sqrt();
        for t in [(-ad - s) / dd, (-ad + s) / dd] {
            if t > 0.0 && t < 1.0 {
                cuts[m] = t;
                m += 1;
            }
        }
    }
    cuts[m] = 1.0;
    m += 1;

    cuts[..m]
        .windows(2)
        .map(|w| {
            let p = a + d * w[0];
            let q = a + d * w[1];
            let mid = a + d * (0.5 * (w[0] + w[1]));
            if mid.norm_squared() <= r2 {
                cross(p, q)
            } else {
                r2 * cross(p, q).atan2(p.dot(&q))
            }
        })
        .sum()
}
