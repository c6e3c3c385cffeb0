use nalgebra::Vector2;

use super::types::orient;

/// Andrew's monotone chain convex hull.
///
/// Returns the hull vertices in CCW order without collinear points, or `None`
/// when fewer than three non-collinear points exist.
pub fn convex_hull(points: &[Vector2<f64>]) -> Option<Vec<Vector2<f64>>> {
    let mut pts: Vec<Vector2<f64>> = points
        .iter()
        .copied()
        .filter(|p| p.x.is_finite() && p.y.is_finite())
        .collect();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup();
    if pts.len() < 3 {
        return None;
    }

    let mut lower: Vec<Vector2<f64>> = Vec::with_capacity(pts.len());
    for &p in &pts {
        push_turning_left(&mut lower, p);
    }
    let mut upper: Vec<Vector2<f64>> = Vec::with_capacity(pts.len());
    for &p in pts.iter().rev() {
        push_turning_left(&mut upper, p);
    }
    // Each chain ends where the other begins.
    lower.pop();
    upper.pop();
    lower.extend(upper);
    (lower.len() >= 3).then_some(lower)
}

fn push_turning_left(chain: &mut Vec<Vector2<f64>>, p: Vector2<f64>) {
    while chain.len() >= 2 && orient(chain[chain.len() - 2], chain[chain.len() - 1], p) <= 0.0 {
        chain.pop();
    }
    chain.push(p);
}
