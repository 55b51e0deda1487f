//! Loads unnu result files and renders one measured column as a 3D surface
//! over two input columns.

pub mod colormap;
pub mod render;
pub mod surface;
pub mod table;
pub mod triangulate;
pub mod window;

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;
use unnu_core::BenchError;

pub use render::{draw_figure, render_rgb, render_svg, render_to_file, FigureStyle, ImageFormat};
pub use surface::{build_surface, Bounds, Face, SurfaceMode};
pub use table::ResultTable;
pub use triangulate::{delaunay, Triangulation};
pub use window::show_figure;

/// Columns and surface settings of one plot.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOptions {
    pub x: String,
    pub y: String,
    pub z: String,
    pub surface: SurfaceMode,
    /// Upper bound on mesh lines per axis in [`SurfaceMode::Grid`].
    pub grid_lines: usize,
    pub style: FigureStyle,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            x: "n".into(),
            y: "max".into(),
            z: "unnu".into(),
            surface: SurfaceMode::Trisurf,
            grid_lines: 64,
            style: FigureStyle::default(),
        }
    }
}

/// Where a plot goes: an image file, a blocking window, or both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotTarget {
    pub output: Option<PathBuf>,
    pub show: bool,
}

impl PlotTarget {
    /// Interactive window only, with no file output.
    pub fn window() -> Self {
        Self {
            output: None,
            show: true,
        }
    }

    /// Image file only.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            output: Some(path.into()),
            show: false,
        }
    }

    /// Resolves command line flags: without an output file the figure is
    /// always shown.
    pub fn from_flags(output: Option<PathBuf>, show: bool) -> Self {
        let show = show || output.is_none();
        Self { output, show }
    }
}

/// What a plot run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotReport {
    pub rows: usize,
    pub faces: usize,
    pub bounds: Bounds,
    pub output: Option<PathBuf>,
    pub shown: bool,
}

/// Faces and bounds of the surface described by `options` over `table`.
pub fn surface_for(table: &ResultTable, options: &PlotOptions) -> Result<(Vec<Face>, Bounds), BenchError> {
    let x = table.column(&options.x)?;
    let y = table.column(&options.y)?;
    let z = table.column(&options.z)?;
    let faces = build_surface(&x, &y, &z, options.surface, options.grid_lines)?;
    Ok((faces, Bounds::of(&x, &y, &z)))
}

/// Loads `input`, builds the surface, writes the image file if one is
/// requested and then shows the window, blocking until it is closed.
pub fn plot(input: &Path, target: &PlotTarget, options: &PlotOptions) -> Result<PlotReport, BenchError> {
    let table = ResultTable::from_path(input)?;
    info!(path = %input.display(), rows = table.len(), columns = %table.columns().join(","), "loaded result file");
    let z = table.column(&options.z)?;
    info!(column = %options.z, values = ?z, "measured values");

    let (faces, bounds) = surface_for(&table, options)?;
    let style = FigureStyle {
        x_label: options.x.clone(),
        y_label: options.y.clone(),
        z_label: options.z.clone(),
        ..options.style.clone()
    };
    if let Some(output) = &target.output {
        render_to_file(&faces, &bounds, &style, output)?;
        info!(path = %output.display(), faces = faces.len(), "figure written");
    }
    if target.show {
        info!(faces = faces.len(), "showing figure until the window is closed");
        show_figure(&faces, &bounds, &style)?;
    }
    Ok(PlotReport {
        rows: table.len(),
        faces: faces.len(),
        bounds,
        output: target.output.clone(),
        shown: target.show,
    })
}

/// Writes the figure of `input` to `output` without opening a window.
pub fn plot_result_file(
    input: &Path,
    output: &Path,
    options: &PlotOptions,
) -> Result<PlotReport, BenchError> {
    plot(input, &PlotTarget::file(output), options)
}
