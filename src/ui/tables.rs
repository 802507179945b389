use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::stats::DescriptiveStats;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;
const HEADER_HEIGHT: f32 = 20.0;

const STATS_HEADERS: [&str; 10] = [
    "Cluster", "Column", "count", "mean", "std", "min", "25%", "50%", "75%", "max",
];
const PREVIEW_HEADERS: [&str; 4] = ["DEPTH", "Porosity", "Vshale", "HC_Zone"];

/// Fixed-precision cell text; NaN shows as `NaN`.
pub fn fmt_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else {
        format!("{v:.4}")
    }
}

/// The numeric cells of one statistics row, in header order.
pub fn stats_cells(s: &DescriptiveStats) -> [String; 8] {
    [
        s.count.to_string(),
        fmt_value(s.mean),
        fmt_value(s.std),
        fmt_value(s.min),
        fmt_value(s.q25),
        fmt_value(s.q50),
        fmt_value(s.q75),
        fmt_value(s.max),
    ]
}

// ---------------------------------------------------------------------------
// Cluster-wise statistics
// ---------------------------------------------------------------------------

pub fn stats_table(ui: &mut Ui, state: &AppState) {
    ui.heading("Cluster-wise Lithology Statistics");
    if state.view.summary.is_empty() {
        ui.label("No rows in the current selection.");
        return;
    }

    ui.push_id("stats_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .columns(Column::auto().at_least(56.0), STATS_HEADERS.len())
            .header(HEADER_HEIGHT, |mut header| {
                for h in STATS_HEADERS {
                    header.col(|ui: &mut Ui| {
                        ui.strong(h);
                    });
                }
            })
            .body(|mut body| {
                for (cluster, summary) in &state.view.summary {
                    let color = state.cluster_colors.color_for(cluster);
                    for (column, stats) in summary {
                        body.row(ROW_HEIGHT, |mut row| {
                            row.col(|ui: &mut Ui| {
                                ui.label(RichText::new(cluster.to_string()).color(color));
                            });
                            row.col(|ui: &mut Ui| {
                                ui.label(column);
                            });
                            for cell in stats_cells(stats) {
                                row.col(|ui: &mut Ui| {
                                    ui.monospace(cell);
                                });
                            }
                        });
                    }
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Hydrocarbon zone preview
// ---------------------------------------------------------------------------

pub fn preview_table(ui: &mut Ui, state: &AppState) {
    ui.heading("Hydrocarbon Zone Estimation");
    let rule = &state.config.hc_rule;
    ui.weak(format!(
        "Hydrocarbon when Porosity > {} and Vshale < {}",
        rule.porosity_min, rule.vshale_max
    ));

    let rows = state.preview_rows();
    if rows.is_empty() {
        ui.label("No rows in the current selection.");
        return;
    }

    ui.push_id("preview_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .columns(Column::auto().at_least(80.0), PREVIEW_HEADERS.len())
            .header(HEADER_HEIGHT, |mut header| {
                for h in PREVIEW_HEADERS {
                    header.col(|ui: &mut Ui| {
                        ui.strong(h);
                    });
                }
            })
            .body(|mut body| {
                for r in rows {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.monospace(format!("{:.2}", r.depth));
                        });
                        row.col(|ui: &mut Ui| {
                            ui.monospace(fmt_value(r.porosity));
                        });
                        row.col(|ui: &mut Ui| {
                            ui.monospace(fmt_value(r.vshale));
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(r.zone.as_str());
                        });
                    });
                }
            });
    });

    let counts = state.view.zone_counts;
    if let Some(fraction) = counts.hydrocarbon_fraction() {
        ui.label(format!(
            "{} of {} visible samples flagged Hydrocarbon ({:.1}%)",
            counts.hydrocarbon,
            counts.total(),
            fraction * 100.0
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_value() {
        assert_eq!(fmt_value(0.2), "0.2000");
        assert_eq!(fmt_value(f64::NAN), "NaN");
    }

    #[test]
    fn test_stats_cells_single_sample() {
        let s = DescriptiveStats::from_values(&[0.16]);
        let cells = stats_cells(&s);
        assert_eq!(cells[0], "1");
        assert_eq!(cells[1], "0.1600");
        assert_eq!(cells[2], "NaN");
        assert_eq!(cells[7], "0.1600");
    }
}
