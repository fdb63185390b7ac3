mod app;
mod callbacks;
mod color;
mod data;
mod figure;
mod handlers;
mod layout;
mod state;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use app::ExplorerApp;
use data::columns::Dataset;
use eframe::egui;
use state::DashboardState;

/// Loaded when no path is given on the command line.
const DEFAULT_DATASET: &str = "./airbnb-dataset.csv";

fn main() -> eframe::Result {
    env_logger::init();

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET));

    let table = match data::loader::load_file(&path) {
        Ok(table) => table,
        Err(e) => {
            log::error!("Failed to load {}: {e:#}", path.display());
            std::process::exit(1);
        }
    };
    log::info!(
        "Loaded {} listings ({} columns) from {}",
        table.len(),
        table.column_names.len(),
        path.display()
    );

    if table.is_empty() {
        log::warn!("{} has a header but no listings", path.display());
    }

    let state = DashboardState::new(Arc::new(Dataset::new(table)), &path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        layout::PAGE_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(ExplorerApp::new(state)))),
    )
}
