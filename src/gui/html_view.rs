use crate::error::Result;
use eframe::egui;
use std::path::{Path, PathBuf};

pub fn save_html(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    tracing::info!(path = %path.display(), "saved html");
    Ok(())
}

pub fn open_in_browser(path: &Path) {
    if let Err(e) = open::that(path) {
        tracing::warn!(path = %path.display(), error = %e, "failed to open html");
    }
}

/// Window showing the HTML returned for the last sent sketch.
pub struct HtmlView {
    pub open: bool,
    html: String,
    path: PathBuf,
}

impl HtmlView {
    pub fn new(html: String, path: PathBuf) -> Self {
        Self {
            open: true,
            html,
            path,
        }
    }

    /// Write `html` to `path`, then hand the file to `opener`. The opener is
    /// skipped when the file could not be written; the view is returned
    /// either way so the source stays visible.
    pub fn publish<O>(html: String, path: PathBuf, opener: O) -> (Self, Result<()>)
    where
        O: FnOnce(&Path),
    {
        let saved = save_html(&path, &html);
        if saved.is_ok() {
            opener(&path);
        }
        (Self::new(html, path), saved)
    }

    pub fn open_in_browser(&self) {
        open_in_browser(&self.path);
    }

    pub fn ui(&mut self, ctx: &egui::Context) {
        if !self.open {
            return;
        }
        let mut open = self.open;
        egui::Window::new("Generated HTML")
            .open(&mut open)
            .resizable(true)
            .default_size([640.0, 480.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(self.path.display().to_string());
                    if ui.button("Open in Browser").clicked() {
                        self.open_in_browser();
                    }
                    if ui.button("Copy").clicked() {
                        ui.output_mut(|o| o.copied_text = self.html.clone());
                    }
                });
                egui::ScrollArea::both().show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut self.html.as_str())
                            .code_editor()
                            .desired_width(f32::INFINITY),
                    );
                });
            });
        self.open = open;
    }
}
