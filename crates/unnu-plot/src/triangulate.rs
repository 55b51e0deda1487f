//! Delaunay triangulation of scattered `(x, y)` points.
//!
//! Points are first mapped onto an integer lattice spanning
//! `[0, LATTICE]` on both axes. Orientation and in-circle predicates then
//! run in exact `i128` arithmetic, so the regular, heavily cocircular grids a
//! parameter sweep produces triangulate without numerical ties going wrong.
//!
//! Insertion is Bowyer-Watson with a single vertex at infinity instead of a
//! finite super triangle. Each hull edge carries a ghost triangle closed by
//! that vertex, whose "circumcircle" is the open half-plane outside the edge
//! plus the edge itself. Hull triangles with huge circumcircles (nearly
//! collinear hull chains) are therefore never lost.

use std::collections::{HashMap, HashSet};

use tracing::debug;
use unnu_core::{BenchError, ErrorInfo};

/// Lattice resolution per axis; in-circle terms stay below 2^110.
const LATTICE: i64 = 1 << 24;
/// Index of the vertex at infinity.
const GHOST: usize = usize::MAX;

/// Triangles over the input points, as counter-clockwise index triples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triangulation {
    pub triangles: Vec<[usize; 3]>,
    /// Input points dropped because they coincide with an earlier point.
    pub duplicates: usize,
}

/// Triangulates `points`; triangle indices refer to positions in `points`.
pub fn delaunay(points: &[(f64, f64)]) -> Result<Triangulation, BenchError> {
    if let Some(idx) = points.iter().position(|(x, y)| !x.is_finite() || !y.is_finite()) {
        return Err(BenchError::Render(
            ErrorInfo::new("non-finite", "point coordinates must be finite")
                .with_context("row", idx.to_string()),
        ));
    }
    let lattice = to_lattice(points)?;

    let mut seen: HashMap<(i64, i64), usize> = HashMap::new();
    let mut vertices: Vec<(i64, i64)> = Vec::new();
    let mut source: Vec<usize> = Vec::new();
    for (idx, point) in lattice.iter().enumerate() {
        if let Some(first) = seen.get(point) {
            debug!(row = idx, first = *first, "dropping duplicate point");
            continue;
        }
        seen.insert(*point, idx);
        vertices.push(*point);
        source.push(idx);
    }
    let duplicates = points.len() - vertices.len();
    if vertices.len() < 3 {
        return Err(degenerate(vertices.len()));
    }

    // Seed with the first two vertices and the first one off their line.
    let Some(third) = (2..vertices.len()).find(|&c| orient(vertices[0], vertices[1], vertices[c]) != 0)
    else {
        return Err(degenerate(vertices.len()));
    };
    let (a, b) = if orient(vertices[0], vertices[1], vertices[third]) > 0 {
        (0, 1)
    } else {
        (1, 0)
    };
    let mut triangles: Vec<[usize; 3]> = vec![
        [a, b, third],
        [b, a, GHOST],
        [third, b, GHOST],
        [a, third, GHOST],
    ];

    for p in (0..vertices.len()).filter(|&p| p > 1 && p != third) {
        let point = vertices[p];
        let (bad, kept): (Vec<[usize; 3]>, Vec<[usize; 3]>) = triangles
            .into_iter()
            .partition(|tri| in_conflict(&vertices, tri, point));
        triangles = kept;

        let edges: HashSet<(usize, usize)> = bad
            .iter()
            .flat_map(|&[a, b, c]| [(a, b), (b, c), (c, a)])
            .collect();
        for &(a, b) in &edges {
            if !edges.contains(&(b, a)) {
                triangles.push(close_edge(a, b, p));
            }
        }
    }

    let mut result: Vec<[usize; 3]> = triangles
        .into_iter()
        .filter(|tri| tri[2] != GHOST)
        .map(|[a, b, c]| lowest_first([source[a], source[b], source[c]]))
        .collect();
    result.sort_unstable();
    Ok(Triangulation {
        triangles: result,
        duplicates,
    })
}

/// Rotates a triangle so its lowest index comes first, keeping orientation.
fn lowest_first(tri: [usize; 3]) -> [usize; 3] {
    let [a, b, c] = tri;
    if a <= b && a <= c {
        [a, b, c]
    } else if b <= c {
        [b, c, a]
    } else {
        [c, a, b]
    }
}

/// Triangle joining cavity edge `a -> b` to the new vertex `p`, with the
/// vertex at infinity rotated into the last slot.
fn close_edge(a: usize, b: usize, p: usize) -> [usize; 3] {
    if a == GHOST {
        [b, p, GHOST]
    } else if b == GHOST {
        [p, a, GHOST]
    } else {
        [a, b, p]
    }
}

/// Whether inserting `d` destroys `tri`.
///
/// A ghost triangle `[u, v, GHOST]` lies outside the hull edge `v -> u`; it
/// conflicts with points strictly beyond that edge or on its interior.
fn in_conflict(vertices: &[(i64, i64)], tri: &[usize; 3], d: (i64, i64)) -> bool {
    let [a, b, c] = *tri;
    if c == GHOST {
        let (u, v) = (vertices[a], vertices[b]);
        match orient(u, v, d) {
            side if side > 0 => true,
            0 => strictly_between(u, v, d),
            _ => false,
        }
    } else {
        in_circle(vertices, tri, d) > 0
    }
}

/// For `d` on the line through `u` and `v`: whether it lies strictly inside
/// the segment.
fn strictly_between(u: (i64, i64), v: (i64, i64), d: (i64, i64)) -> bool {
    let along = |p: (i64, i64), q: (i64, i64)| {
        ((q.0 - p.0) as i128) * ((v.0 - u.0) as i128) + ((q.1 - p.1) as i128) * ((v.1 - u.1) as i128)
    };
    along(u, d) > 0 && along(d, v) > 0
}

fn to_lattice(points: &[(f64, f64)]) -> Result<Vec<(i64, i64)>, BenchError> {
    let (x_min, x_max) = min_max(points.iter().map(|p| p.0));
    let (y_min, y_max) = min_max(points.iter().map(|p| p.1));
    let x_span = x_max - x_min;
    let y_span = y_max - y_min;
    if !(x_span > 0.0 && y_span > 0.0) {
        return Err(degenerate(points.len()));
    }
    let scale = LATTICE as f64;
    Ok(points
        .iter()
        .map(|&(x, y)| {
            (
                ((x - x_min) / x_span * scale).round() as i64,
                ((y - y_min) / y_span * scale).round() as i64,
            )
        })
        .collect())
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// Twice the signed area of `abc`; positive when counter-clockwise.
fn orient(a: (i64, i64), b: (i64, i64), c: (i64, i64)) -> i128 {
    let (abx, aby) = ((b.0 - a.0) as i128, (b.1 - a.1) as i128);
    let (acx, acy) = ((c.0 - a.0) as i128, (c.1 - a.1) as i128);
    abx * acy - aby * acx
}

/// Positive iff `d` lies strictly inside the circumcircle of the
/// counter-clockwise triangle `tri`.
fn in_circle(vertices: &[(i64, i64)], tri: &[usize; 3], d: (i64, i64)) -> i128 {
    let [a, b, c] = tri.map(|idx| vertices[idx]);
    let (adx, ady) = ((a.0 - d.0) as i128, (a.1 - d.1) as i128);
    let (bdx, bdy) = ((b.0 - d.0) as i128, (b.1 - d.1) as i128);
    let (cdx, cdy) = ((c.0 - d.0) as i128, (c.1 - d.1) as i128);
    (adx * adx + ady * ady) * (bdx * cdy - cdx * bdy)
        + (bdx * bdx + bdy * bdy) * (cdx * ady - adx * cdy)
        + (cdx * cdx + cdy * cdy) * (adx * bdy - bdx * ady)
}

fn degenerate(points: usize) -> BenchError {
    BenchError::Render(
        ErrorInfo::new("degenerate-points", "points do not span a surface")
            .with_context("distinct_points", points.to_string())
            .with_hint("a trisurf needs at least three points that are not all collinear"),
    )
}
