mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::LasViewerApp;
use config::ViewerConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    log::info!("Starting LAS viewer v{}", env!("CARGO_PKG_VERSION"));

    let config = ViewerConfig::load().unwrap_or_else(|e| {
        log::warn!("Falling back to default settings: {e:#}");
        ViewerConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "LAS Viewer – Well Log Intervals",
        options,
        Box::new(|cc| Ok(Box::new(LasViewerApp::new(cc, config)))),
    )
}
