use super::*;
use crate::error::PcfError;
use nalgebra::{vector, Vector2};
use std::f64::consts::PI;

fn square(side: f64) -> Vec<Vector2<f64>> {
    vec![
        vector![0.0, 0.0],
        vector![side, 0.0],
        vector![side, side],
        vector![0.0, side],
    ]
}

/// L-shape: unit-2 square with the upper-right unit quadrant removed.
/// Reflex corner at (1, 1).
fn l_shape() -> Vec<Vector2<f64>> {
    vec![
        vector![0.0, 0.0],
        vector![2.0, 0.0],
        vector![2.0, 1.0],
        vector![1.0, 1.0],
        vector![1.0, 2.0],
        vector![0.0, 2.0],
    ]
}

#[test]
fn ring_area_and_orientation() {
    let cfg = GeomCfg::default();
    let mut cw = square(2.0);
    cw.reverse();
    let p = Polygon::new(cw, cfg).unwrap();
    assert!((p.area() - 4.0).abs() < 1e-12);
    assert!(Polygon::signed_area(p.vertices()) > 0.0);

    let l = Polygon::new(l_shape(), cfg).unwrap();
    assert!((l.area() - 3.0).abs() < 1e-12);
}

#[test]
fn closing_vertex_is_dropped() {
    let mut ring = square(1.0);
    ring.push(vector![0.0, 0.0]);
    let p = Polygon::new(ring, GeomCfg::default()).unwrap();
    assert_eq!(p.vertices().len(), 4);
}

#[test]
fn degenerate_rings_are_rejected() {
    let cfg = GeomCfg::default();
    let collinear = vec![vector![0.0, 0.0], vector![1.0, 1.0], vector![2.0, 2.0]];
    assert!(matches!(
        Polygon::new(collinear, cfg),
        Err(PcfError::DegenerateDomain { .. })
    ));
    let bow_tie = vec![
        vector![0.0, 0.0],
        vector![0.0, 1.0],
        vector![1.0, 0.0],
        vector![1.0, 1.0],
    ];
    assert!(matches!(
        Polygon::new(bow_tie, cfg),
        Err(PcfError::DegenerateDomain { .. })
    ));
    let two = vec![vector![0.0, 0.0], vector![1.0, 0.0]];
    assert!(Polygon::new(two, cfg).is_err());
    let nan = vec![vector![0.0, 0.0], vector![f64::NAN, 0.0], vector![0.0, 1.0]];
    assert!(Polygon::new(nan, cfg).is_err());
}

#[test]
fn locate_inside_boundary_outside() {
    let d = Domain::new(l_shape(), vec![], GeomCfg::default()).unwrap();
    assert_eq!(d.locate(vector![0.5, 0.5]), Location::Inside);
    assert_eq!(d.locate(vector![1.5, 0.5]), Location::Inside);
    assert_eq!(d.locate(vector![1.5, 1.5]), Location::Outside);
    assert_eq!(d.locate(vector![0.0, 0.0]), Location::Boundary);
    assert_eq!(d.locate(vector![1.0, 1.5]), Location::Boundary);
    assert!(d.contains(vector![2.0, 0.5]));
    assert!(!d.contains(vector![-0.1, 0.5]));
}

#[test]
fn distance_to_boundary_uses_nearest_edge() {
    let hole: Vec<_> = square(1.0).into_iter().map(|v| v + vector![2.5, 2.5]).collect();
    let d = Domain::new(square(4.0), vec![hole], GeomCfg::default()).unwrap();
    // Between the shell's left edge and the hole's left edge.
    assert!((d.distance_to_boundary(vector![1.0, 3.0]) - 1.0).abs() < 1e-12);
    assert!((d.distance_to_boundary(vector![2.0, 3.0]) - 0.5).abs() < 1e-12);
    assert!((d.area() - 15.0).abs() < 1e-12);
    assert!(!d.contains(vector![3.0, 3.0]));
    assert_eq!(d.locate(vector![2.5, 3.0]), Location::Boundary);
}

#[test]
fn invalid_holes_are_rejected() {
    let cfg = GeomCfg::default();
    let outside: Vec<_> = square(1.0).into_iter().map(|v| v + vector![3.5, 0.0]).collect();
    assert!(Domain::new(square(4.0), vec![outside], cfg).is_err());
    let a: Vec<_> = square(1.0).into_iter().map(|v| v + vector![1.0, 1.0]).collect();
    let b: Vec<_> = square(1.0).into_iter().map(|v| v + vector![1.5, 1.5]).collect();
    assert!(Domain::new(square(4.0), vec![a, b], cfg).is_err());
    assert!(Domain::new(square(1.0), vec![square(1.0)], cfg).is_err());
}

#[test]
fn hole_crossing_a_reflex_corner_is_rejected() {
    // Every vertex lies in the L, but the hypotenuse cuts through the notch.
    let hole = vec![vector![0.5, 1.8], vector![0.5, 0.5], vector![1.8, 0.5]];
    assert!(matches!(
        Domain::new(l_shape(), vec![hole], GeomCfg::default()),
        Err(PcfError::DegenerateDomain { .. })
    ));
}

#[test]
fn crossing_holes_are_rejected() {
    // A plus sign: neither rectangle has a vertex inside the other.
    let bar = |x0: f64, y0: f64, x1: f64, y1: f64| {
        vec![
            vector![x0, y0],
            vector![x1, y0],
            vector![x1, y1],
            vector![x0, y1],
        ]
    };
    let cfg = GeomCfg::default();
    let across = bar(0.5, 1.5, 3.5, 2.5);
    let down = bar(1.5, 0.5, 2.5, 3.5);
    assert!(matches!(
        Domain::new(square(4.0), vec![across.clone(), down], cfg),
        Err(PcfError::DegenerateDomain { .. })
    ));
    // Side by side, sharing an edge segment, is still a valid domain.
    let beside = bar(3.5, 1.5, 3.8, 2.5);
    let d = Domain::new(square(4.0), vec![across, beside], cfg).unwrap();
    assert!((d.area() - (16.0 - 3.0 - 0.3)).abs() < 1e-12);
}

#[test]
fn polygon_contains_includes_boundary() {
    let l = Polygon::new(l_shape(), GeomCfg::default()).unwrap();
    assert!(l.contains(vector![0.5, 1.5], 1e-9));
    assert!(l.contains(vector![1.0, 1.5], 1e-9));
    assert!(!l.contains(vector![1.5, 1.5], 1e-9));
}

#[test]
fn disk_inside_ring_is_full_disk() {
    let ring = square(10.0);
    let a = disk_polygon_area(vector![5.0, 5.0], 2.0, &ring);
    assert!((a - PI * 4.0).abs() < 1e-10);
}

#[test]
fn ring_inside_disk_is_ring_area() {
    let ring = square(1.0);
    let a = disk_polygon_area(vector![0.5, 0.5], 5.0, &ring);
    assert!((a - 1.0).abs() < 1e-12);
}

#[test]
fn disk_at_corner_and_edge() {
    let ring = square(4.0);
    let corner = disk_polygon_area(vector![0.0, 0.0], 1.0, &ring);
    assert!((corner - PI / 4.0).abs() < 1e-10);
    let edge = disk_polygon_area(vector![2.0, 0.0], 1.0, &ring);
    assert!((edge - PI / 2.0).abs() < 1e-10);
    assert_eq!(disk_polygon_area(vector![2.0, 2.0], 0.0, &ring), 0.0);
}

#[test]
fn disk_at_reflex_corner_of_l_shape() {
    let d = Domain::new(l_shape(), vec![], GeomCfg::default()).unwrap();
    let a = d.disk_intersection_area(vector![1.0, 1.0], 0.5);
    assert!((a - 0.75 * PI * 0.25).abs() < 1e-10);
}

#[test]
fn disk_partially_clipped_matches_segment_formula() {
    // Disk of radius 1 centred at distance h = 0.5 inside a long edge:
    // area = πr² - segment, segment = r² acos(h/r) - h √(r² - h²).
    let ring = square(10.0);
    let h: f64 = 0.5;
    let seg = h.acos() - h * (1.0 - h * h).sqrt();
    let a = disk_polygon_area(vector![5.0, h], 1.0, &ring);
    assert!((a - (PI - seg)).abs() < 1e-10);
}

#[test]
fn disk_inside_hole_has_no_area() {
    let hole: Vec<_> = square(2.0).into_iter().map(|v| v + vector![1.0, 1.0]).collect();
    let d = Domain::new(square(4.0), vec![hole], GeomCfg::default()).unwrap();
    assert!(d.disk_intersection_area(vector![2.0, 2.0], 0.5).abs() < 1e-12);
    // Annulus straddling the hole's boundary keeps only the outer part.
    let ann = d.annulus_intersection_area(vector![2.0, 2.0], 0.5, 1.5);
    let expected = PI * 1.5 * 1.5 - 4.0;
    assert!((ann - expected).abs() < 1e-10);
}

#[test]
fn annulus_with_zero_inner_radius() {
    let d = Domain::new(square(4.0), vec![], GeomCfg::default()).unwrap();
    let ann = d.annulus_intersection_area(vector![2.0, 2.0], 0.0, 1.0);
    assert!((ann - PI).abs() < 1e-10);
    let ring = d.annulus_intersection_area(vector![2.0, 2.0], 1.0, 1.5);
    assert!((ring - PI * (2.25 - 1.0)).abs() < 1e-10);
}

#[test]
fn hull_drops_interior_and_collinear_points() {
    let pts = vec![
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![2.0, 0.0],
        vector![2.0, 2.0],
        vector![0.0, 2.0],
        vector![1.0, 1.0],
    ];
    let hull = convex_hull(&pts).unwrap();
    assert_eq!(hull.len(), 4);
    assert!(Polygon::signed_area(&hull) > 0.0);
    let d = Domain::convex_hull_of(&pts, GeomCfg::default()).unwrap();
    assert!((d.area() - 4.0).abs() < 1e-12);
}

#[test]
fn hull_of_collinear_points_is_degenerate() {
    let pts = vec![vector![0.0, 0.0], vector![1.0, 1.0], vector![3.0, 3.0]];
    assert!(convex_hull(&pts).is_none());
    assert!(matches!(
        Domain::convex_hull_of(&pts, GeomCfg::default()),
        Err(PcfError::DegenerateDomain { .. })
    ));
}
