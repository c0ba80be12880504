use whiteboard::gui::{WhiteboardApp, SETTINGS_FILE};
use whiteboard::logging;
use whiteboard::settings::{ApiConfig, Settings, ENV_API_KEY};

use eframe::egui;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let settings = Settings::load(SETTINGS_FILE)?;
    logging::init(settings.debug_logging, settings.log_file.as_ref().map(PathBuf::from));

    let api = ApiConfig::from_env();
    if api.api_key.is_none() {
        tracing::warn!("{ENV_API_KEY} is not set; sending sketches will fail");
    }

    let (width, height) = settings.canvas_size;
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Whiteboard")
            .with_inner_size([width, height + 100.0])
            .with_min_inner_size([300.0, 200.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Whiteboard",
        native_options,
        Box::new(move |_cc| Box::new(WhiteboardApp::new(settings, SETTINGS_FILE.into(), api))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start the whiteboard window: {e}"))
}
