use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Options");
    ui.separator();

    let Some((lo, hi)) = state.depth_bounds() else {
        ui.label(placeholder(state));
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Depth interval ----
            let mut depth_min = state.filters.depth_min;
            let mut depth_max = state.filters.depth_max;
            let min_changed = ui
                .add(egui::Slider::new(&mut depth_min, lo..=hi).text("Min Depth"))
                .changed();
            let max_changed = ui
                .add(egui::Slider::new(&mut depth_max, lo..=hi).text("Max Depth"))
                .changed();
            if min_changed || max_changed {
                state.set_depth_range(depth_min, depth_max);
            }
            if state.filters.depth_min > state.filters.depth_max {
                ui.colored_label(Color32::YELLOW, "Min Depth exceeds Max Depth: nothing to show.");
            }
            ui.separator();

            // ---- Cluster selection ----
            let clusters = state.all_clusters();
            ui.strong(format!(
                "Select Clusters  ({}/{})",
                state.filters.clusters.len(),
                clusters.len()
            ));
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all();
                }
                if ui.small_button("None").clicked() {
                    state.select_none();
                }
            });

            for cluster in clusters {
                let mut checked = state.filters.clusters.contains(&cluster);
                let text = RichText::new(format!("Cluster {cluster}"))
                    .color(state.cluster_colors.color_for(&cluster));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_cluster(cluster);
                }
            }
            if state.filters.clusters.is_empty() {
                ui.weak("No cluster selected: showing all clusters.");
            }

            ui.add_space(12.0);
            ui.label(
                RichText::new("Use the filters to explore zones of interest.")
                    .color(Color32::LIGHT_GREEN),
            );
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(table), Some(path)) = (&state.table, &state.source_path) {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            ui.label(format!(
                "{name}: {} samples loaded, {} visible",
                table.len(),
                state.view.table.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

/// Shown instead of the filter widgets when there is no depth range to pick.
fn placeholder(state: &AppState) -> &'static str {
    if state.table.is_some() {
        "Table has no rows."
    } else {
        "No dataset loaded."
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open well-log table")
        .add_filter("Delimited text", &["csv", "txt", "tsv"])
        .pick_file();

    if let Some(path) = file {
        // Failures are already logged and surfaced through the status message.
        let _ = state.open(&path);
    }
}
