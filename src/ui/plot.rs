use eframe::egui::{Color32, Ui};
use egui_plot::{Line, Plot, PlotPoints};

use crate::data::model::LogTable;
use crate::state::AppState;

/// Link group shared by every track so zoom / pan on depth stays in sync.
const DEPTH_LINK: &str = "depth_tracks";

// ---------------------------------------------------------------------------
// Track geometry
// ---------------------------------------------------------------------------

/// Points of one track as `[value, -depth]` so depth increases downward.
///
/// A NaN sample ends the current segment: missing readings show as gaps
/// rather than being bridged by a straight line.
pub fn track_segments(table: &LogTable, column: &str) -> Vec<Vec<[f64; 2]>> {
    let Some(col) = table.column(column) else {
        return Vec::new();
    };

    let mut segments = Vec::new();
    let mut current: Vec<[f64; 2]> = Vec::new();
    for record in &table.records {
        let value = col.get(record);
        if value.is_nan() {
            if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push([value, -record.depth]);
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

// ---------------------------------------------------------------------------
// Depth tracks (central panel)
// ---------------------------------------------------------------------------

/// Render one plot per configured track, side by side.
pub fn depth_tracks(ui: &mut Ui, state: &AppState) {
    if state.table.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a log file to view tracks  (File → Open…)");
        });
        return;
    }

    ui.heading("Multi-track Log Visualization");
    let tracks = state.tracks();
    if tracks.is_empty() {
        return;
    }
    let height = ui.available_height();

    ui.columns(tracks.len(), |columns: &mut [Ui]| {
        for (i, (ui, track)) in columns.iter_mut().zip(tracks).enumerate() {
            let color = state.track_colors.color_for(track);
            track_plot(ui, &state.view.table, track, color, height, i == 0);
        }
    });
}

fn track_plot(
    ui: &mut Ui,
    table: &LogTable,
    track: &str,
    color: Color32,
    height: f32,
    first: bool,
) {
    Plot::new(format!("track_{track}"))
        .height(height)
        .x_axis_label(track)
        .y_axis_label(if first { "DEPTH" } else { "" })
        .y_axis_formatter(|mark, _range| format!("{:.0}", -mark.value))
        .label_formatter(|_name, point| format!("{:.3}\nDEPTH {:.1}", point.x, -point.y))
        .link_axis(DEPTH_LINK, [false, true])
        .link_cursor(DEPTH_LINK, [false, true])
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for segment in track_segments(table, track) {
                let points = PlotPoints::new(segment);
                plot_ui.line(Line::new(points).name(track).color(color).width(1.5));
            }
        });
}
