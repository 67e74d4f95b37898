mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use app::CollectiveApp;
use config::{DashboardConfig, CONFIG_FILE};
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE))?;

    // Read the spreadsheet once, before the UI starts; every frame after
    // this only reads the shared table.
    let mut state = AppState::new(config.clone());
    match data::loader::load_dashboard_data(&config.data_path, &config.sheet) {
        Ok(data) => state.set_data(Arc::new(data)),
        Err(e) => {
            log::error!("Failed to load {}: {e:#}", config.data_path.display());
            state.set_load_error(format!(
                "Could not load doctor data from {}: {e:#}",
                config.data_path.display()
            ));
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Transmen Collective")
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Transmen Collective",
        options,
        Box::new(|_cc| Ok(Box::new(CollectiveApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the UI: {e}"))?;
    Ok(())
}
