mod app;
mod config;
mod data;
mod error;
mod gui;
mod log;
mod viewer;

use app::SpectralViewerApp;
use config::ViewerConfig;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    ::log::info!("Starting Spectral Viewer v{}", env!("CARGO_PKG_VERSION"));

    let config = ViewerConfig::load_or_default();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 500.0])
            .with_title("Spectral Viewer")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Spectral Viewer",
        options,
        Box::new(|cc| Ok(Box::new(SpectralViewerApp::new(cc, config)))),
    )
}
