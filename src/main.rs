mod app;
mod charts;
mod color;
mod config;
mod data;
mod state;
mod stats;
mod ui;

use anyhow::{Context, Result};
use eframe::egui;

use app::DashboardApp;
use config::Config;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::from_env().inspect_err(|e| log::error!("{e}"))?;

    // Load once; every later query borrows this dataset.
    let dataset = data::loader::load_file(&config.data_path)
        .inspect_err(|e| log::error!("Failed to load dataset: {e}"))
        .with_context(|| format!("loading {}", config.data_path.display()))?;

    let state = AppState::new(dataset, &config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Air Quality Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("UI error: {e}"))
}
