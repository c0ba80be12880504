use crate::board::model::PenColor;
use crate::settings::{Settings, MAX_PEN_WIDTH};
use eframe::egui;

/// Editable copy of the pen and prompt settings. Nothing reaches the
/// whiteboard until the user presses Apply.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsDraft {
    pub pen_color: PenColor,
    pub pen_width: f32,
    pub system_prompt: String,
    pub user_prompt: String,
}

impl SettingsDraft {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            pen_color: settings.pen_color,
            pen_width: settings.pen_width.clamp(1.0, MAX_PEN_WIDTH),
            system_prompt: settings.system_prompt.clone(),
            user_prompt: settings.user_prompt.clone(),
        }
    }

    pub fn apply_to(&self, settings: &mut Settings) {
        settings.pen_color = self.pen_color;
        settings.pen_width = self.pen_width.clamp(1.0, MAX_PEN_WIDTH);
        settings.system_prompt = self.system_prompt.clone();
        settings.user_prompt = self.user_prompt.clone();
    }
}

#[derive(Default)]
pub struct SettingsDialog {
    pub open: bool,
    draft: Option<SettingsDraft>,
}

impl SettingsDialog {
    pub fn open(&mut self, settings: &Settings) {
        self.draft = Some(SettingsDraft::from_settings(settings));
        self.open = true;
    }

    /// Returns the draft when the user applies it.
    pub fn ui(&mut self, ctx: &egui::Context) -> Option<SettingsDraft> {
        if !self.open {
            return None;
        }
        let Some(draft) = self.draft.as_mut() else {
            self.open = false;
            return None;
        };

        let mut open = self.open;
        let mut applied = None;
        let mut close = false;
        egui::Window::new("Settings")
            .open(&mut open)
            .resizable(true)
            .default_width(420.0)
            .show(ctx, |ui| {
                egui::Grid::new("pen_settings").num_columns(2).show(ui, |ui| {
                    ui.label("Pen Color");
                    egui::ComboBox::from_id_source("pen_color")
                        .selected_text(draft.pen_color.label())
                        .show_ui(ui, |ui| {
                            for color in PenColor::ALL {
                                ui.selectable_value(&mut draft.pen_color, color, color.label());
                            }
                        });
                    ui.end_row();

                    ui.label("Pen Width");
                    ui.add(
                        egui::Slider::new(&mut draft.pen_width, 1.0..=MAX_PEN_WIDTH)
                            .step_by(1.0)
                            .fixed_decimals(0),
                    );
                    ui.end_row();
                });

                ui.separator();
                ui.label("System Prompt");
                ui.add(
                    egui::TextEdit::multiline(&mut draft.system_prompt)
                        .desired_rows(3)
                        .desired_width(f32::INFINITY),
                );
                ui.label("User Prompt");
                ui.add(
                    egui::TextEdit::multiline(&mut draft.user_prompt)
                        .desired_rows(6)
                        .desired_width(f32::INFINITY),
                );

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Apply").clicked() {
                        applied = Some(draft.clone());
                        close = true;
                    }
                    if ui.button("Cancel").clicked() {
                        close = true;
                    }
                });
            });

        self.open = open && !close;
        if !self.open {
            self.draft = None;
        }
        applied
    }
}
