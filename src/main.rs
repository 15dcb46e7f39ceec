mod app;
mod config;
mod edges;
mod export;
mod image;
mod session;
mod util;

use app::EdgeVisionApp;
use config::AppConfig;
use std::path::PathBuf;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let initial_image_path: Option<PathBuf> = std::env::args_os().nth(1).map(PathBuf::from);
    let config = AppConfig::load();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Edge Vision")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        "Edge Vision",
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(EdgeVisionApp::new(
                &cc.egui_ctx,
                config,
                initial_image_path.as_deref(),
            )))
        }),
    )
}
