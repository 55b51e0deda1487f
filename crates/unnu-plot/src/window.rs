//! Blocking on-screen display of a rendered figure.

use unnu_core::{BenchError, ErrorInfo};

use crate::render::FigureStyle;
use crate::surface::{Bounds, Face};

/// Opens a window showing the figure and returns once it is closed.
#[cfg(feature = "window")]
pub fn show_figure(faces: &[Face], bounds: &Bounds, style: &FigureStyle) -> Result<(), BenchError> {
    use eframe::egui;

    let pixels = crate::render::render_rgb(faces, bounds, style)?;
    let image = egui::ColorImage::from_rgb([style.width as usize, style.height as usize], &pixels);
    let title = format!("{} over ({}, {})", style.z_label, style.x_label, style.y_label);
    let legend = format!(
        "{}: {:.4} .. {:.4}   {}: {} .. {}   {}: {} .. {}",
        style.z_label,
        bounds.z.0,
        bounds.z.1,
        style.x_label,
        bounds.x.0,
        bounds.x.1,
        style.y_label,
        bounds.y.0,
        bounds.y.1
    );
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title.clone())
            .with_inner_size([style.width as f32, style.height as f32 + 72.0]),
        ..Default::default()
    };
    let app_name = title.clone();
    eframe::run_native(
        &app_name,
        options,
        Box::new(move |cc| Ok(Box::new(FigureWindow::new(cc, image, title, legend)))),
    )
    .map_err(|err| {
        BenchError::Render(
            ErrorInfo::new("window", "failed to open plot window")
                .with_hint(format!("{err}; pass --out <path> to write an image instead")),
        )
    })
}

#[cfg(not(feature = "window"))]
pub fn show_figure(_faces: &[Face], _bounds: &Bounds, _style: &FigureStyle) -> Result<(), BenchError> {
    Err(BenchError::Render(
        ErrorInfo::new("window-unavailable", "built without the plot window")
            .with_hint("enable the `window` feature or pass --out <path>"),
    ))
}

#[cfg(feature = "window")]
struct FigureWindow {
    texture: eframe::egui::TextureHandle,
    title: String,
    legend: String,
}

#[cfg(feature = "window")]
impl FigureWindow {
    fn new(
        cc: &eframe::CreationContext<'_>,
        image: eframe::egui::ColorImage,
        title: String,
        legend: String,
    ) -> Self {
        let texture = cc
            .egui_ctx
            .load_texture("figure", image, eframe::egui::TextureOptions::LINEAR);
        Self {
            texture,
            title,
            legend,
        }
    }
}

#[cfg(feature = "window")]
impl eframe::App for FigureWindow {
    fn update(&mut self, ctx: &eframe::egui::Context, _frame: &mut eframe::Frame) {
        use eframe::egui::{CentralPanel, TopBottomPanel};

        TopBottomPanel::top("title").show(ctx, |ui| {
            ui.heading(&self.title);
        });
        TopBottomPanel::bottom("legend").show(ctx, |ui| {
            ui.label(&self.legend);
        });
        CentralPanel::default().show(ctx, |ui| {
            let size = self.texture.size_vec2();
            let available = ui.available_size();
            let scale = (available.x / size.x).min(available.y / size.y).clamp(0.1, 1.0);
            ui.centered_and_justified(|ui| {
                ui.image((self.texture.id(), size * scale));
            });
        });
    }
}
