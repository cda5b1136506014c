mod app;
mod color;
mod config;
mod data;
mod error;
mod explain;
mod pipeline;
mod report;
mod session;
mod state;
mod ui;

#[cfg(test)]
mod fixtures;

use app::ExplainerApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // Artifacts are looked up next to where the app is started.
    let artifact_dir = std::env::current_dir().unwrap_or_default();
    log::info!("Looking for model artifacts in {}", artifact_dir.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Attrition Explainer",
        options,
        Box::new(move |_cc| Ok(Box::new(ExplainerApp::new(&artifact_dir)))),
    )
}
