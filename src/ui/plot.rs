use eframe::egui::{Color32, Ui};

use crate::render::histogram3d::{self, HistogramLayout};
use crate::render::{bar, timeline, ChartKind};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Chart view (central panel)
// ---------------------------------------------------------------------------

/// Draw the selected chart for the current series.
pub fn chart_view(ui: &mut Ui, state: &AppState) {
    let series = match &state.series {
        Some(series) => series,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a file to chart it  (File → Open CSV…)");
            });
            return;
        }
    };

    let result = match state.chart {
        ChartKind::Bar => bar::show(ui, series, &state.spec).map(|_| ()),
        ChartKind::Timeline => timeline::show(ui, series, &state.spec),
        ChartKind::Histogram3d => HistogramLayout::build(series, &state.spec).map(|layout| {
            histogram3d::paint(ui, &layout, &state.spec);
        }),
    };

    if let Err(e) = result {
        log::warn!("Cannot draw {}: {e}", state.chart.label());
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.colored_label(Color32::RED, e.to_string());
        });
    }
}
