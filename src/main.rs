#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use text_canvas::{CanvasApp, EditorConfig};

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match EditorConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    };

    // Leave room for the tools panel next to the canvas
    let window_size = [config.canvas_width + 280.0, config.canvas_height.max(420.0) + 40.0];
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Text Canvas")
            .with_inner_size(window_size)
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Text Canvas",
        native_options,
        Box::new(|cc| Ok(Box::new(CanvasApp::new(cc, config)))),
    )
}
