mod app;
mod color;
mod config;
mod data;
mod error;
mod predict;
mod state;
mod ui;

use app::HousePriceApp;
use config::ArtifactConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = ArtifactConfig::load().unwrap_or_else(|e| {
        log::warn!("Ignoring unreadable configuration, using defaults: {e:#}");
        ArtifactConfig::default()
    });
    log::debug!("Artifact configuration: {config:?}");
    let loaded = data::loader::load_artifacts(&config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([600.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "House Price Predictor",
        options,
        Box::new(move |_cc| Ok(Box::new(HousePriceApp::new(loaded)))),
    )
}
