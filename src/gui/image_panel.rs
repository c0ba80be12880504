use eframe::egui;
use std::path::PathBuf;

/// Preview of the last saved snapshot, zoomable and scrollable.
pub struct ImagePanel {
    path: PathBuf,
    texture: Option<egui::TextureHandle>,
    load_error: Option<String>,
    zoom: f32,
}

impl ImagePanel {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            texture: None,
            load_error: None,
            zoom: 1.0,
        }
    }

    fn load_texture(&mut self, ctx: &egui::Context) {
        if self.texture.is_some() || self.load_error.is_some() {
            return;
        }
        match image::open(&self.path) {
            Ok(img) => {
                let size = [img.width() as usize, img.height() as usize];
                let rgba = img.to_rgba8();
                let tex = ctx.load_texture(
                    self.path
                        .file_name()
                        .and_then(|s| s.to_str())
                        .unwrap_or("snapshot"),
                    egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()),
                    egui::TextureOptions::LINEAR,
                );
                self.texture = Some(tex);
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to load preview");
                self.load_error = Some(e.to_string());
            }
        }
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) {
        self.load_texture(ui.ctx());
        ui.horizontal(|ui| {
            ui.add(egui::Slider::new(&mut self.zoom, 0.1..=5.0).text("Zoom"));
            if ui.button("Open in Default Viewer").clicked() {
                if let Err(e) = open::that(&self.path) {
                    tracing::warn!(error = %e, "failed to open snapshot");
                }
            }
        });
        if let Some(tex) = &self.texture {
            let size = tex.size_vec2() * self.zoom;
            egui::ScrollArea::both().show(ui, |ui| {
                ui.add(egui::Image::new(tex).fit_to_exact_size(size));
            });
        } else if let Some(error) = &self.load_error {
            ui.colored_label(egui::Color32::RED, format!("Failed to load image: {error}"));
        }
    }
}
