mod html_view;
mod image_panel;
mod send_job;
mod settings_dialog;

pub use html_view::{open_in_browser, save_html, HtmlView};
pub use image_panel::ImagePanel;
pub use send_job::SendJob;
pub use settings_dialog::{SettingsDialog, SettingsDraft};

use crate::board::export::{load_png_bytes, save_canvas};
use crate::board::model::{Color, Point};
use crate::board::scene::SceneCache;
use crate::board::surface::{HoverTracker, PointerFrame, PointerSurface, SurfaceCursor};
use crate::board::SharedCanvas;
use crate::settings::{ApiConfig, Settings};
use crate::transport::{HttpTransport, ImageTransport};
use eframe::egui::{self, Color32, Pos2, Sense};
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use std::path::PathBuf;

/// Settings file in the working directory, as loaded by `main`.
pub const SETTINGS_FILE: &str = "settings.json";

fn to_color32(color: Color) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

/// Pixel size of a board rect. Negative extents collapse to zero so export
/// reports them as invalid dimensions.
pub fn board_dimensions(size: egui::Vec2) -> (u32, u32) {
    (size.x.max(0.0).floor() as u32, size.y.max(0.0).floor() as u32)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Board,
    Preview,
}

pub struct WhiteboardApp {
    canvas: SharedCanvas,
    scene: SceneCache,
    hover: HoverTracker,
    settings: Settings,
    settings_path: String,
    api: ApiConfig,
    view: View,
    board_size: egui::Vec2,
    preview: Option<ImagePanel>,
    settings_dialog: SettingsDialog,
    html_view: Option<HtmlView>,
    pending_send: Option<SendJob>,
    toasts: Toasts,
}

impl WhiteboardApp {
    pub fn new(settings: Settings, settings_path: String, api: ApiConfig) -> Self {
        let canvas = SharedCanvas::new(settings.pen_style());
        let board_size = egui::vec2(settings.canvas_size.0, settings.canvas_size.1);
        Self {
            canvas,
            scene: SceneCache::default(),
            hover: HoverTracker::default(),
            settings,
            settings_path,
            api,
            view: View::Board,
            board_size,
            preview: None,
            settings_dialog: SettingsDialog::default(),
            html_view: None,
            pending_send: None,
            toasts: Toasts::new().anchor(egui::Align2::RIGHT_TOP, [10.0, 10.0]),
        }
    }

    pub fn canvas(&self) -> &SharedCanvas {
        &self.canvas
    }

    fn toast(&mut self, kind: ToastKind, text: String) {
        if !self.settings.enable_toasts {
            return;
        }
        self.toasts.add(Toast {
            text: text.into(),
            kind,
            options: ToastOptions::default()
                .duration_in_seconds(self.settings.toast_duration as f64),
        });
    }

    fn snapshot_path(&self) -> PathBuf {
        PathBuf::from(&self.settings.snapshot_path)
    }

    fn export_snapshot(&mut self) -> Option<PathBuf> {
        let (width, height) = board_dimensions(self.board_size);
        let path = self.snapshot_path();
        match save_canvas(&self.canvas, &path, width, height) {
            Ok(()) => Some(path),
            Err(e) => {
                tracing::error!(error = %e, "failed to save snapshot");
                self.toast(ToastKind::Error, format!("Failed to save PNG: {e}"));
                None
            }
        }
    }

    fn save_png(&mut self) {
        if let Some(path) = self.export_snapshot() {
            self.toast(ToastKind::Success, format!("Saved {}", path.display()));
            self.preview = Some(ImagePanel::new(path));
            self.view = View::Preview;
        }
    }

    fn send(&mut self, ctx: &egui::Context) {
        if self.pending_send.is_some() {
            return;
        }
        let Some(path) = self.export_snapshot() else {
            return;
        };
        let png = match load_png_bytes(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.toast(ToastKind::Error, format!("Failed to read PNG: {e}"));
                return;
            }
        };

        let api = self.api.clone();
        let prompts = self.settings.prompts();
        let ctx = ctx.clone();
        self.pending_send = Some(SendJob::spawn(
            png,
            move || {
                HttpTransport::new(&api, prompts)
                    .map(|t| Box::new(t) as Box<dyn ImageTransport>)
            },
            move || ctx.request_repaint(),
        ));
        self.toast(ToastKind::Info, "Sending sketch...".into());
    }

    fn poll_send(&mut self) {
        let Some(result) = self.pending_send.as_ref().and_then(SendJob::poll) else {
            return;
        };
        self.pending_send = None;
        match result {
            Ok(html) => {
                let path = PathBuf::from(&self.settings.html_path);
                let (view, saved) = HtmlView::publish(html, path, open_in_browser);
                self.html_view = Some(view);
                match saved {
                    Ok(()) => self.toast(ToastKind::Success, "HTML received".into()),
                    Err(e) => self.toast(ToastKind::Error, format!("Failed to save HTML: {e}")),
                }
            }
            Err(e) => {
                self.toast(ToastKind::Error, format!("Send failed: {e}"));
            }
        }
    }

    fn apply_settings(&mut self, draft: SettingsDraft) {
        draft.apply_to(&mut self.settings);
        let style = self.settings.pen_style();
        self.canvas.set_color(style.color);
        self.canvas.set_width(style.width);
        if let Err(e) = self.settings.save(&self.settings_path) {
            tracing::warn!(error = %e, path = %self.settings_path, "failed to save settings");
        }
    }

    fn header_ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Whiteboard App").strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Settings").clicked() {
                    self.settings_dialog.open(&self.settings);
                }
                let sending = self.pending_send.is_some();
                let label = if sending { "Sending..." } else { "Send" };
                if ui.add_enabled(!sending, egui::Button::new(label)).clicked() {
                    self.send(ui.ctx());
                }
                if ui.button("Back to Drawing").clicked() {
                    self.view = View::Board;
                }
                if ui.button("Save PNG").clicked() {
                    self.save_png();
                }
                if ui.button("Clear").clicked() {
                    self.canvas.clear();
                }
            });
        });
    }

    fn board_ui(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::drag());
        let rect = response.rect;
        self.board_size = rect.size();
        let origin = rect.min;
        let to_canvas = |pos: Pos2| Point::new(pos.x - origin.x, pos.y - origin.y);
        let to_screen = |p: Point| Pos2::new(origin.x + p.x, origin.y + p.y);

        let surface: &dyn PointerSurface = &self.canvas;
        let (pressed, released, moved, press_origin, pointer_pos) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.delta() != egui::Vec2::ZERO,
                i.pointer.press_origin(),
                i.pointer.interact_pos(),
            )
        });
        let frame = PointerFrame {
            press: press_origin
                .filter(|pos| pressed && rect.contains(*pos) && response.hovered())
                .map(to_canvas),
            motion: pointer_pos
                .filter(|_| moved && response.is_pointer_button_down_on())
                .map(to_canvas),
            release: released,
        };
        let changed = frame.dispatch(surface);
        self.hover.update(surface, response.hover_pos().map(to_canvas));
        if response.hovered() && surface.cursor() == SurfaceCursor::Crosshair {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Crosshair);
        }
        if changed {
            ui.ctx().request_repaint();
        }

        let revision = self.canvas.revision();
        if self.scene.is_stale(revision) {
            self.scene.refresh(&self.canvas.snapshot());
        }

        painter.rect_filled(rect, 0.0, Color32::WHITE);
        for segment in self.scene.segments() {
            let color = to_color32(segment.color);
            let start = to_screen(segment.start);
            let end = to_screen(segment.end);
            painter.line_segment([start, end], egui::Stroke::new(segment.width, color));
            let cap = segment.width / 2.0;
            painter.circle_filled(start, cap, color);
            painter.circle_filled(end, cap, color);
        }
    }
}

impl eframe::App for WhiteboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        self.poll_send();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            self.header_ui(ui);
        });
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| match self.view {
                View::Board => self.board_ui(ui),
                View::Preview => match self.preview.as_mut() {
                    Some(panel) => panel.ui(ui),
                    None => self.view = View::Board,
                },
            });

        if let Some(draft) = self.settings_dialog.ui(ctx) {
            self.apply_settings(draft);
        }
        if let Some(view) = self.html_view.as_mut() {
            view.ui(ctx);
            if !view.open {
                self.html_view = None;
            }
        }
        self.toasts.show(ctx);
    }
}
