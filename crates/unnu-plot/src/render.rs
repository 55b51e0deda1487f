use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use unnu_core::{BenchError, ErrorInfo};

use crate::colormap::{jet, normalize};
use crate::surface::{Bounds, Face};

const COLORBAR_STEPS: usize = 64;
const COLORBAR_WIDTH: u32 = 110;

/// Presentation settings of a rendered figure.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureStyle {
    pub width: u32,
    pub height: u32,
    pub x_label: String,
    pub y_label: String,
    pub z_label: String,
    /// Fraction of the figure height the color bar occupies.
    pub colorbar_shrink: f64,
    pub yaw: f64,
    pub pitch: f64,
}

impl Default for FigureStyle {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            x_label: "n".into(),
            y_label: "max".into(),
            z_label: "unnu".into(),
            colorbar_shrink: 0.5,
            yaw: 0.6,
            pitch: 0.35,
        }
    }
}

/// Image formats the renderer can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
    Bitmap,
}

impl ImageFormat {
    /// Picks the format from the output file extension.
    pub fn from_path(path: &Path) -> Result<Self, BenchError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("svg") => Ok(ImageFormat::Svg),
            Some("png") | Some("bmp") | Some("jpg") | Some("jpeg") => Ok(ImageFormat::Bitmap),
            _ => Err(BenchError::Render(
                ErrorInfo::new("output-format", "unsupported image extension")
                    .with_path(path)
                    .with_hint("use .svg, .png, .bmp or .jpg"),
            )),
        }
    }
}

/// Renders `faces` into an image file whose format follows its extension.
pub fn render_to_file(
    faces: &[Face],
    bounds: &Bounds,
    style: &FigureStyle,
    path: &Path,
) -> Result<(), BenchError> {
    let size = (style.width, style.height);
    match ImageFormat::from_path(path)? {
        ImageFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_figure(&root, faces, bounds, style)?;
            root.present().map_err(|err| render_error("present", err))
        }
        ImageFormat::Bitmap => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_figure(&root, faces, bounds, style)?;
            root.present().map_err(|err| render_error("present", err))
        }
    }
}

/// Renders `faces` into an in-memory SVG document.
pub fn render_svg(faces: &[Face], bounds: &Bounds, style: &FigureStyle) -> Result<String, BenchError> {
    let mut document = String::new();
    {
        let root = SVGBackend::with_string(&mut document, (style.width, style.height))
            .into_drawing_area();
        draw_figure(&root, faces, bounds, style)?;
        root.present().map_err(|err| render_error("present", err))?;
    }
    Ok(document)
}

/// Renders `faces` into a packed RGB buffer of `width * height` pixels.
pub fn render_rgb(faces: &[Face], bounds: &Bounds, style: &FigureStyle) -> Result<Vec<u8>, BenchError> {
    let mut pixels = vec![0u8; style.width as usize * style.height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, (style.width, style.height))
            .into_drawing_area();
        draw_figure(&root, faces, bounds, style)?;
        root.present().map_err(|err| render_error("present", err))?;
    }
    Ok(pixels)
}

/// Draws the surface and its color bar onto `root`.
pub fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    faces: &[Face],
    bounds: &Bounds,
    style: &FigureStyle,
) -> Result<(), BenchError> {
    root.fill(&WHITE).map_err(|err| render_error("fill", err))?;
    let plot_width = style.width.saturating_sub(COLORBAR_WIDTH).max(1);
    let (plot_area, bar_area) = root.split_horizontally(plot_width);
    draw_surface(&plot_area, faces, bounds, style)?;
    draw_colorbar(&bar_area, bounds, style)
}

fn draw_surface<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    faces: &[Face],
    bounds: &Bounds,
    style: &FigureStyle,
) -> Result<(), BenchError> {
    let (z_min, z_max) = bounds.z;
    let caption = format!(
        "{} over ({}, {})",
        style.z_label, style.x_label, style.y_label
    );
    // The vertical chart axis carries the measured value.
    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 22))
        .margin(20)
        .build_cartesian_3d(padded(bounds.x), padded(bounds.z), padded(bounds.y))
        .map_err(|err| render_error("chart", err))?;
    let (yaw, pitch) = (style.yaw, style.pitch);
    chart.with_projection(|mut pb| {
        pb.yaw = yaw;
        pb.pitch = pitch;
        pb.scale = 0.85;
        pb.into_matrix()
    });
    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.12))
        .max_light_lines(4)
        .draw()
        .map_err(|err| render_error("axes", err))?;

    let to_chart = |v: &[f64; 3]| (v[0], v[2], v[1]);
    // Painter's order: each face is filled and outlined before nearer ones.
    let coord = chart.as_coord_spec();
    let depths: Vec<i32> = faces
        .iter()
        .map(|face| {
            let (x, y, z) = centroid(face.vertices.iter().map(to_chart));
            coord.projected_depth(&x, &y, &z)
        })
        .collect();
    let ordered: Vec<&Face> = back_to_front(&depths).into_iter().map(|idx| &faces[idx]).collect();
    chart
        .draw_series(ordered.iter().flat_map(|face| {
            let color = jet(normalize(face.level, z_min, z_max));
            let mut outline: Vec<_> = face.vertices.iter().map(to_chart).collect();
            let fill = Polygon::new(outline.clone(), color.filled());
            if let Some(first) = outline.first().copied() {
                outline.push(first);
            }
            let edge = PathElement::new(outline, BLACK.mix(0.25).stroke_width(1));
            [fill.into_dyn(), edge.into_dyn()]
        }))
        .map_err(|err| render_error("faces", err))?;
    Ok(())
}

/// Face indices ordered from the largest projected depth (farthest) to the
/// smallest; ties keep input order.
fn back_to_front(depths: &[i32]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..depths.len()).collect();
    order.sort_by_key(|&idx| std::cmp::Reverse(depths[idx]));
    order
}

fn centroid(points: impl Iterator<Item = (f64, f64, f64)>) -> (f64, f64, f64) {
    let (mut sum, mut count) = ((0.0, 0.0, 0.0), 0.0);
    for (x, y, z) in points {
        sum = (sum.0 + x, sum.1 + y, sum.2 + z);
        count += 1.0;
    }
    if count == 0.0 {
        return sum;
    }
    (sum.0 / count, sum.1 / count, sum.2 / count)
}

fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    bounds: &Bounds,
    style: &FigureStyle,
) -> Result<(), BenchError> {
    let z_range = padded(bounds.z);
    let (z_min, z_max) = (z_range.start, z_range.end);
    let shrink = style.colorbar_shrink.clamp(0.05, 1.0);
    let pad = ((1.0 - shrink) / 2.0 * f64::from(style.height)).round() as u32;
    let mut chart = ChartBuilder::on(area)
        .margin_top(pad)
        .margin_bottom(pad)
        .margin_right(16)
        .y_label_area_size(70)
        .build_cartesian_2d(0f64..1f64, z_min..z_max)
        .map_err(|err| render_error("colorbar", err))?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .disable_x_axis()
        .y_labels(6)
        .y_label_formatter(&|v: &f64| format!("{v:.3}"))
        .draw()
        .map_err(|err| render_error("colorbar-axis", err))?;
    let step = (z_max - z_min) / COLORBAR_STEPS as f64;
    chart
        .draw_series((0..COLORBAR_STEPS).map(|k| {
            let lo = z_min + step * k as f64;
            let hi = lo + step;
            let color = jet(normalize((lo + hi) / 2.0, bounds.z.0, bounds.z.1));
            Rectangle::new([(0.0, lo), (1.0, hi)], color.filled())
        }))
        .map_err(|err| render_error("colorbar-fill", err))?;
    Ok(())
}

/// Widens flat ranges so the chart coordinates stay well defined.
fn padded((lo, hi): (f64, f64)) -> std::ops::Range<f64> {
    if hi > lo {
        lo..hi
    } else {
        let delta = if lo == 0.0 { 1.0 } else { lo.abs() * 0.05 };
        (lo - delta)..(hi + delta)
    }
}

fn render_error(stage: &str, err: impl std::fmt::Display) -> BenchError {
    BenchError::Render(
        ErrorInfo::new("draw", "failed to render figure")
            .with_context("stage", stage)
            .with_hint(err.to_string()),
    )
}
