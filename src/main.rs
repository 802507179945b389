use anyhow::Context;
use eframe::egui;
use haraz_explorer::app::HarazExplorerApp;
use haraz_explorer::config::ExplorerConfig;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = ExplorerConfig::load().context("loading explorer configuration")?;
    let title = config.title.clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(HarazExplorerApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("running the explorer window: {e}"))
}
