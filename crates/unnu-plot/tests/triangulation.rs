use std::collections::BTreeSet;

use proptest::prelude::*;
use unnu_plot::delaunay;

fn cross(o: (i64, i64), a: (i64, i64), b: (i64, i64)) -> i128 {
    ((a.0 - o.0) as i128) * ((b.1 - o.1) as i128) - ((a.1 - o.1) as i128) * ((b.0 - o.0) as i128)
}

/// Twice the area of the convex hull (monotone chain).
fn hull_area2(points: &[(i64, i64)]) -> i128 {
    let mut pts: Vec<(i64, i64)> = points.to_vec();
    pts.sort();
    pts.dedup();
    let mut hull: Vec<(i64, i64)> = Vec::new();
    for pass in 0..2 {
        let start = hull.len();
        let iter: Box<dyn Iterator<Item = &(i64, i64)>> = if pass == 0 {
            Box::new(pts.iter())
        } else {
            Box::new(pts.iter().rev())
        };
        for &p in iter {
            while hull.len() >= start + 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
                hull.pop();
            }
            hull.push(p);
        }
        hull.pop();
    }
    (0..hull.len())
        .map(|i| {
            let (a, b) = (hull[i], hull[(i + 1) % hull.len()]);
            (a.0 as i128) * (b.1 as i128) - (b.0 as i128) * (a.1 as i128)
        })
        .sum()
}

fn strictly_in_circle(a: (i64, i64), b: (i64, i64), c: (i64, i64), d: (i64, i64)) -> bool {
    let (adx, ady) = ((a.0 - d.0) as i128, (a.1 - d.1) as i128);
    let (bdx, bdy) = ((b.0 - d.0) as i128, (b.1 - d.1) as i128);
    let (cdx, cdy) = ((c.0 - d.0) as i128, (c.1 - d.1) as i128);
    let det = (adx * adx + ady * ady) * (bdx * cdy - cdx * bdy)
        + (bdx * bdx + bdy * bdy) * (cdx * ady - adx * cdy)
        + (cdx * cdx + cdy * cdy) * (adx * bdy - bdx * ady);
    det > 0
}

#[test]
fn sweep_grid_triangulates_into_lattice_halves() {
    let values: Vec<f64> = (0..10).map(|k| 1.0 + 1000.0 * f64::from(k)).collect();
    let mut points = Vec::new();
    for &n in &values {
        for &m in &values {
            if n <= m {
                points.push((n, m));
            }
        }
    }
    assert_eq!(points.len(), 55);
    let tri = delaunay(&points).expect("triangulate");
    assert_eq!(tri.triangles.len(), 81);
    let unique: BTreeSet<[usize; 3]> = tri.triangles.iter().copied().collect();
    assert_eq!(unique.len(), 81);
}

fn covered_area(points: &[(f64, f64)], triangles: &[[usize; 3]]) -> f64 {
    triangles
        .iter()
        .map(|&[a, b, c]| {
            let (pa, pb, pc) = (points[a], points[b], points[c]);
            ((pb.0 - pa.0) * (pc.1 - pa.1) - (pb.1 - pa.1) * (pc.0 - pa.0)) / 2.0
        })
        .sum()
}

#[test]
fn nearly_collinear_hull_chain_keeps_its_sliver() {
    let points = [(0.0, 0.0), (1.0, 0.0), (0.5, 1e-5), (0.0, 1.0), (1.0, 1.0)];
    let tri = delaunay(&points).expect("triangulate");
    assert_eq!(tri.triangles.len(), 4);
    assert!(tri.triangles.contains(&[0, 1, 2]));
    assert!((covered_area(&points, &tri.triangles) - 1.0).abs() < 1e-12);
}

#[test]
fn convex_fan_is_fully_covered() {
    // Every point of a parabolic arc is a hull vertex, and the closing
    // chord forms triangles with very large circumcircles.
    let points: Vec<(f64, f64)> = (0..=64).map(|i| (f64::from(i), f64::from(i * i))).collect();
    let tri = delaunay(&points).expect("triangulate");
    assert_eq!(tri.triangles.len(), points.len() - 2);
    let int_points: Vec<(i64, i64)> = (0..=64).map(|i| (i, i * i)).collect();
    let area2: i128 = tri
        .triangles
        .iter()
        .map(|&[a, b, c]| cross(int_points[a], int_points[b], int_points[c]))
        .sum();
    assert_eq!(area2, hull_area2(&int_points));
}

#[test]
fn collinear_extension_of_the_hull_is_triangulated() {
    let points = [(0.0, 0.0), (4.0, 0.0), (2.0, 2.0), (6.0, 0.0), (3.0, 0.0)];
    let tri = delaunay(&points).expect("triangulate");
    assert!((covered_area(&points, &tri.triangles) - 6.0).abs() < 1e-12);
    assert!(tri.triangles.iter().all(|&[a, b, c]| {
        let (pa, pb, pc) = (points[a], points[b], points[c]);
        (pb.0 - pa.0) * (pc.1 - pa.1) - (pb.1 - pa.1) * (pc.0 - pa.0) > 0.0
    }));
}

#[test]
fn duplicates_are_collapsed() {
    let points = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 0.0)];
    let tri = delaunay(&points).expect("triangulate");
    assert_eq!(tri.duplicates, 1);
    assert_eq!(tri.triangles, vec![[0, 1, 2]]);
}

#[test]
fn collinear_points_are_degenerate() {
    let points = [(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)];
    let err = delaunay(&points).expect_err("collinear");
    assert_eq!(err.code(), "degenerate-points");

    let constant_x = [(1.0, 0.0), (1.0, 1.0), (1.0, 2.0)];
    assert_eq!(delaunay(&constant_x).expect_err("flat").code(), "degenerate-points");
}

#[test]
fn too_few_points_are_degenerate() {
    let err = delaunay(&[(0.0, 0.0), (1.0, 1.0)]).expect_err("two points");
    assert_eq!(err.code(), "degenerate-points");
}

#[test]
fn non_finite_points_are_rejected() {
    let err = delaunay(&[(0.0, 0.0), (f64::NAN, 1.0), (1.0, 0.0)]).expect_err("nan");
    assert_eq!(err.code(), "non-finite");
    assert_eq!(err.info().context["row"], "1");
}

proptest! {
    #[test]
    fn triangulation_is_delaunay_and_covers_hull(raw in prop::collection::vec((0i64..=4096, 0i64..=4096), 1..40)) {
        let mut int_points = vec![(0i64, 0i64), (4096, 4096), (0, 4096)];
        int_points.extend(raw);
        check_delaunay_cover(&int_points)?;
    }

    #[test]
    fn thin_bands_are_delaunay_and_cover_hull(raw in prop::collection::vec((0i64..=4096, 0i64..=3), 1..40)) {
        // Points crowd a narrow band along the bottom edge, giving long,
        // nearly collinear hull chains.
        let mut int_points = vec![(0i64, 0i64), (4096, 4096), (0, 4096)];
        int_points.extend(raw);
        check_delaunay_cover(&int_points)?;
    }
}

fn check_delaunay_cover(int_points: &[(i64, i64)]) -> Result<(), TestCaseError> {
    let points: Vec<(f64, f64)> = int_points.iter().map(|&(x, y)| (x as f64, y as f64)).collect();
    let tri = delaunay(&points).expect("triangulate");

    let mut area2: i128 = 0;
    for &[a, b, c] in &tri.triangles {
        let (pa, pb, pc) = (int_points[a], int_points[b], int_points[c]);
        let orientation = cross(pa, pb, pc);
        prop_assert!(orientation > 0);
        area2 += orientation;
        for &d in int_points {
            prop_assert!(!strictly_in_circle(pa, pb, pc, d));
        }
    }
    prop_assert_eq!(area2, hull_area2(int_points));
    Ok(())
}
