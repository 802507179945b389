use eframe::egui;

use crate::config::ExplorerConfig;
use crate::state::AppState;
use crate::ui::{panels, plot, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HarazExplorerApp {
    pub state: AppState,
}

impl HarazExplorerApp {
    /// Build the app and open the configured data file if present.
    pub fn new(config: ExplorerConfig) -> Self {
        let data_path = config.data_path.clone();
        let mut state = AppState::new(config);
        if data_path.exists() {
            // A failed startup load leaves the error in the top bar.
            let _ = state.open(&data_path);
        } else {
            log::warn!(
                "{} not found; use File → Open… to pick a log table",
                data_path.display()
            );
        }
        Self { state }
    }
}

impl eframe::App for HarazExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: statistics and preview ----
        if self.state.table.is_some() {
            egui::TopBottomPanel::bottom("tables_panel")
                .resizable(true)
                .default_height(320.0)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        tables::stats_table(ui, &self.state);
                        ui.separator();
                        tables::preview_table(ui, &self.state);
                    });
                });
        }

        // ---- Central panel: depth tracks ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::depth_tracks(ui, &self.state);
        });
    }
}
