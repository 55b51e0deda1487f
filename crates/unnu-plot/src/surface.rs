use serde::{Deserialize, Serialize};
use unnu_core::{BenchError, ErrorInfo};

use crate::triangulate::{delaunay, Triangulation};

/// How the scattered points become a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceMode {
    /// One face per Delaunay triangle.
    #[default]
    Trisurf,
    /// Regular mesh resampled from the triangulation by linear interpolation.
    Grid,
}

/// Planar face of the rendered surface in data coordinates `[x, y, z]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub vertices: Vec<[f64; 3]>,
    /// Mean `z` of the vertices, used for coloring.
    pub level: f64,
}

impl Face {
    fn new(vertices: Vec<[f64; 3]>) -> Self {
        let level = vertices.iter().map(|v| v[2]).sum::<f64>() / vertices.len() as f64;
        Self { vertices, level }
    }
}

/// Axis-aligned extent of a point cloud.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub x: (f64, f64),
    pub y: (f64, f64),
    pub z: (f64, f64),
}

impl Bounds {
    pub fn of(x: &[f64], y: &[f64], z: &[f64]) -> Self {
        Self {
            x: extent(x),
            y: extent(y),
            z: extent(z),
        }
    }
}

fn extent(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// Builds the faces of the surface `z = f(x, y)` sampled at the given points.
pub fn build_surface(
    x: &[f64],
    y: &[f64],
    z: &[f64],
    mode: SurfaceMode,
    grid_lines: usize,
) -> Result<Vec<Face>, BenchError> {
    if x.len() != y.len() || x.len() != z.len() {
        return Err(BenchError::Render(
            ErrorInfo::new("column-lengths", "x, y and z columns differ in length")
                .with_context("x", x.len().to_string())
                .with_context("y", y.len().to_string())
                .with_context("z", z.len().to_string()),
        ));
    }
    let points: Vec<(f64, f64)> = x.iter().copied().zip(y.iter().copied()).collect();
    let triangulation = delaunay(&points)?;
    Ok(match mode {
        SurfaceMode::Trisurf => trisurf_faces(&triangulation, x, y, z),
        SurfaceMode::Grid => grid_faces(&triangulation, x, y, z, grid_lines.max(2)),
    })
}

fn trisurf_faces(tri: &Triangulation, x: &[f64], y: &[f64], z: &[f64]) -> Vec<Face> {
    tri.triangles
        .iter()
        .map(|corners| Face::new(corners.iter().map(|&i| [x[i], y[i], z[i]]).collect()))
        .collect()
}

fn grid_faces(tri: &Triangulation, x: &[f64], y: &[f64], z: &[f64], max_lines: usize) -> Vec<Face> {
    let xs = mesh_lines(x, max_lines);
    let ys = mesh_lines(y, max_lines);
    let heights: Vec<Vec<Option<f64>>> = ys
        .iter()
        .map(|&gy| {
            xs.iter()
                .map(|&gx| interpolate(tri, x, y, z, gx, gy))
                .collect()
        })
        .collect();

    let mut faces = Vec::new();
    for j in 0..ys.len().saturating_sub(1) {
        for i in 0..xs.len().saturating_sub(1) {
            let corners = [
                (i, j),
                (i + 1, j),
                (i + 1, j + 1),
                (i, j + 1),
            ];
            let vertices: Option<Vec<[f64; 3]>> = corners
                .iter()
                .map(|&(ci, cj)| heights[cj][ci].map(|h| [xs[ci], ys[cj], h]))
                .collect();
            if let Some(vertices) = vertices {
                faces.push(Face::new(vertices));
            }
        }
    }
    faces
}

/// Distinct sorted values, or evenly spaced lines when there are too many.
fn mesh_lines(values: &[f64], max_lines: usize) -> Vec<f64> {
    let mut distinct = values.to_vec();
    distinct.sort_by(f64::total_cmp);
    distinct.dedup();
    if distinct.len() <= max_lines {
        return distinct;
    }
    let (lo, hi) = (distinct[0], distinct[distinct.len() - 1]);
    let step = (hi - lo) / (max_lines - 1) as f64;
    (0..max_lines).map(|k| lo + step * k as f64).collect()
}

/// Linear interpolation of `z` at `(px, py)`; `None` outside the hull.
fn interpolate(
    tri: &Triangulation,
    x: &[f64],
    y: &[f64],
    z: &[f64],
    px: f64,
    py: f64,
) -> Option<f64> {
    const TOLERANCE: f64 = 1e-9;
    tri.triangles.iter().find_map(|&[a, b, c]| {
        let det = (y[b] - y[c]) * (x[a] - x[c]) + (x[c] - x[b]) * (y[a] - y[c]);
        if det == 0.0 {
            return None;
        }
        let l1 = ((y[b] - y[c]) * (px - x[c]) + (x[c] - x[b]) * (py - y[c])) / det;
        let l2 = ((y[c] - y[a]) * (px - x[c]) + (x[a] - x[c]) * (py - y[c])) / det;
        let l3 = 1.0 - l1 - l2;
        if l1 >= -TOLERANCE && l2 >= -TOLERANCE && l3 >= -TOLERANCE {
            Some(l1 * z[a] + l2 * z[b] + l3 * z[c])
        } else {
            None
        }
    })
}
