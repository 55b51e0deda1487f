use std::fs;

use unnu_plot::{
    build_surface, plot_result_file, render_rgb, render_svg, render_to_file, Bounds, FigureStyle,
    PlotOptions, PlotTarget, SurfaceMode,
};

const SAMPLE: &str = "# Sampling = 10\nn, max, unnu\n1, 1, 0.1\n1, 2, 0.2\n1, 3, 0.3\n2, 2, 0.4\n2, 3, 0.5\n3, 3, 0.9\n";

#[test]
fn svg_document_contains_faces() {
    let x = [0.0, 1.0, 0.0, 1.0];
    let y = [0.0, 0.0, 1.0, 1.0];
    let z = [0.0, 1.0, 1.0, 2.0];
    let faces = build_surface(&x, &y, &z, SurfaceMode::Trisurf, 8).expect("surface");
    let style = FigureStyle {
        width: 480,
        height: 360,
        ..FigureStyle::default()
    };
    let svg = render_svg(&faces, &Bounds::of(&x, &y, &z), &style).expect("render");
    assert!(svg.contains("<svg"));
    assert!(svg.contains("<polygon"));
}

#[test]
fn flat_measurements_still_render() {
    let x = [0.0, 1.0, 0.0];
    let y = [0.0, 0.0, 1.0];
    let z = [0.5, 0.5, 0.5];
    let faces = build_surface(&x, &y, &z, SurfaceMode::Trisurf, 8).expect("surface");
    let svg = render_svg(&faces, &Bounds::of(&x, &y, &z), &FigureStyle::default()).expect("render");
    assert!(svg.contains("<polygon"));
}

#[test]
fn plots_result_file_to_svg() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let input = dir.path().join("19-10-2026_10:00:00.result");
    fs::write(&input, SAMPLE).expect("write");
    let output = dir.path().join("figure.svg");

    let report = plot_result_file(&input, &output, &PlotOptions::default()).expect("plot");
    assert_eq!(report.output.as_deref(), Some(output.as_path()));
    assert!(!report.shown);
    assert_eq!(report.rows, 6);
    assert_eq!(report.faces, 4);
    assert_eq!(report.bounds.z, (0.1, 0.9));
    let svg = fs::read_to_string(&output).expect("read svg");
    assert!(svg.contains("unnu"));
}

#[test]
fn grid_surface_plots_quads() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let input = dir.path().join("run.result");
    fs::write(&input, SAMPLE).expect("write");
    let output = dir.path().join("run-grid.svg");
    let options = PlotOptions {
        surface: SurfaceMode::Grid,
        ..PlotOptions::default()
    };
    let report = plot_result_file(&input, &output, &options).expect("plot");
    assert_eq!(report.faces, 1);
    assert!(output.exists());
}

#[test]
fn missing_column_fails_before_rendering() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let input = dir.path().join("run.result");
    fs::write(&input, "n,max,other\n1,1,0.1\n1,2,0.2\n2,2,0.3\n").expect("write");
    let output = dir.path().join("run.svg");
    let err = plot_result_file(&input, &output, &PlotOptions::default()).expect_err("missing");
    assert_eq!(err.code(), "missing-column");
    assert!(!output.exists());
}

#[test]
fn unsupported_extension_is_rejected() {
    let faces = build_surface(&[0.0, 1.0, 0.0], &[0.0, 0.0, 1.0], &[1.0, 2.0, 3.0], SurfaceMode::Trisurf, 8)
        .expect("surface");
    let bounds = Bounds::of(&[0.0, 1.0, 0.0], &[0.0, 0.0, 1.0], &[1.0, 2.0, 3.0]);
    let dir = tempfile::tempdir().expect("tmp dir");
    let err = render_to_file(&faces, &bounds, &FigureStyle::default(), &dir.path().join("out.pdf"))
        .expect_err("pdf");
    assert_eq!(err.code(), "output-format");
}

#[test]
fn bitmap_buffer_holds_colored_faces() {
    let x = [0.0, 1.0, 0.0, 1.0];
    let y = [0.0, 0.0, 1.0, 1.0];
    let z = [0.0, 1.0, 1.0, 2.0];
    let faces = build_surface(&x, &y, &z, SurfaceMode::Trisurf, 8).expect("surface");
    let style = FigureStyle {
        width: 320,
        height: 240,
        ..FigureStyle::default()
    };
    let pixels = render_rgb(&faces, &Bounds::of(&x, &y, &z), &style).expect("render");
    assert_eq!(pixels.len(), 320 * 240 * 3);
    assert!(pixels.chunks(3).any(|px| px[0] != px[1] || px[1] != px[2]));
}

#[test]
fn plot_target_shows_window_unless_a_file_is_requested() {
    assert_eq!(PlotTarget::from_flags(None, false), PlotTarget::window());
    let file = PlotTarget::from_flags(Some("out.svg".into()), false);
    assert_eq!(file, PlotTarget::file("out.svg"));
    let both = PlotTarget::from_flags(Some("out.svg".into()), true);
    assert!(both.show);
    assert_eq!(both.output.as_deref(), Some(std::path::Path::new("out.svg")));
}
