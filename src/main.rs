mod app;
mod color;
mod config;
mod data;
mod error;
mod predict;
mod regression;
mod state;
mod ui;

use anyhow::Context;
use app::EstimatorApp;
use config::Settings;
use eframe::egui;
use regression::provider::ModelContext;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let settings = Settings::load();

    // Both models must be usable before the window opens.
    let models = ModelContext::load(&settings.models)
        .inspect_err(|e| log::error!("Startup failed: {e}"))
        .context("cannot start without both regression models")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Preservative Predictor",
        options,
        Box::new(move |_cc| Ok(Box::new(EstimatorApp::new(models, settings)))),
    )
    .map_err(|e| anyhow::anyhow!("window error: {e}"))
}
