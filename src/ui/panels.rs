use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::delimited::DelimitedFileSource;
use crate::pipeline;
use crate::render::ChartKind;
use crate::state::AppState;
use crate::theme::ThemePreset;

pub const CSV_NO_DATA: &str = "No valid data found in CSV file.";

// ---------------------------------------------------------------------------
// Left side panel – render settings
// ---------------------------------------------------------------------------

/// Render the left settings panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Chart");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Title");
            ui.text_edit_singleline(&mut state.spec.title);
            ui.add_space(4.0);

            ui.strong("Theme");
            let current = state.spec.theme.preset;
            egui::ComboBox::from_id_salt("theme_preset")
                .selected_text(current.name())
                .show_ui(ui, |ui: &mut Ui| {
                    for preset in ThemePreset::ALL {
                        if ui.selectable_label(current == preset, preset.name()).clicked() {
                            state.set_theme(preset);
                        }
                    }
                });
            ui.separator();

            if state.chart == ChartKind::Histogram3d {
                histogram_controls(ui, state);
                ui.separator();
            }

            dropped_rows(ui, state);
        });
}

fn histogram_controls(ui: &mut Ui, state: &mut AppState) {
    let hist = &mut state.spec.histogram;

    ui.strong("3D histogram");
    ui.checkbox(&mut hist.gradient, "Gradient colouring");
    ui.checkbox(&mut hist.shadow, "Shadow bars");
    ui.checkbox(&mut hist.annotate, "Value annotations");

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Highlight top");
        ui.add(egui::DragValue::new(&mut hist.top_n).range(0..=50));
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Thin labels above");
        ui.add(egui::DragValue::new(&mut hist.label_threshold).range(0..=500));
    });

    ui.add(egui::Slider::new(&mut hist.elevation, 0.0..=90.0).text("Elevation"));
    ui.add(egui::Slider::new(&mut hist.azimuth, -180.0..=180.0).text("Azimuth"));
    ui.add(egui::Slider::new(&mut hist.bar_width, 0.1..=1.0).text("Bar width"));
    ui.add(egui::Slider::new(&mut hist.bar_depth, 0.1..=1.0).text("Bar depth"));
}

fn dropped_rows(ui: &mut Ui, state: &AppState) {
    let dropped = &state.diagnostics.dropped;
    let header = format!("Dropped rows  ({})", dropped.len());
    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt("dropped_rows")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            if dropped.is_empty() {
                ui.label("None.");
            }
            for row in dropped {
                ui.label(format!("row {}: {}", row.position, row.reason));
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        for &kind in state.available_charts() {
            if ui.selectable_label(state.chart == kind, kind.label()).clicked() {
                state.chart = kind;
            }
        }

        ui.separator();

        if let Some(series) = &state.series {
            ui.label(format!(
                "{} records from {}, {} dropped",
                series.len(),
                state.source,
                state.diagnostics.dropped_count()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open casualty data")
        .add_filter("Delimited text", &["csv", "txt", "tsv"])
        .pick_file();

    if let Some(path) = file {
        let source = DelimitedFileSource::new(&path);
        match pipeline::run(&source) {
            Ok(outcome) => {
                log::info!(
                    "Loaded {} with {} dropped row(s)",
                    path.display(),
                    outcome.diagnostics().dropped_count()
                );
                state.apply_outcome(path.display().to_string(), outcome, CSV_NO_DATA);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
