mod app;
mod color;
mod config;
mod data;
mod export;
mod state;
mod ui;

use app::WorkPlanApp;
use config::Config;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = Config::from_env();
    log::info!("Starting with work plan {}", config.csv_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    eframe::run_native(
        "Piano di Lavoro Dottorato",
        options,
        Box::new(move |cc| {
            // Year tints are designed for a light background.
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Ok(Box::new(WorkPlanApp::new(&config)))
        }),
    )
}
