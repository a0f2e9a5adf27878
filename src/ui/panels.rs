use eframe::egui::{self, Color32, DragValue, RichText, ScrollArea, Ui};

use crate::color::SeriesColors;
use crate::config::Settings;
use crate::data::export::DEFAULT_EXPORT_NAME;
use crate::state::{AppState, Status};

use super::{plot, table};

// ---------------------------------------------------------------------------
// Left side panel – manual single-sample input
// ---------------------------------------------------------------------------

/// Render the manual input panel.
pub fn manual_input_panel(ui: &mut Ui, state: &mut AppState, settings: &Settings) {
    ui.heading("Manual UV Absorbance Input");
    ui.label("Enter UV absorbance readings to predict preservative concentrations (ppm)");
    ui.separator();

    egui::Grid::new("manual_inputs")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            let mut changed = false;
            let inputs = &mut state.inputs;
            for (label, value) in [
                ("Absorbance at 280 nm", &mut inputs.abs_280),
                ("Absorbance at 320 nm", &mut inputs.abs_320),
                ("Absorbance at 400 nm", &mut inputs.abs_400),
            ] {
                ui.label(label);
                changed |= ui
                    .add(DragValue::new(value).speed(0.01).min_decimals(2))
                    .changed();
                ui.end_row();
            }
            if changed {
                state.inputs_changed();
            }
        });

    ui.add_space(6.0);
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Predict Benzoate & Sorbate").clicked() {
            state.predict_single();
        }
        if ui.small_button("Reset").clicked() {
            state.reset_inputs(settings);
        }
    });

    if let Some(p) = &state.single {
        ui.add_space(6.0);
        let colors = SeriesColors::default();
        ui.label(RichText::new(p.benzoate_label()).strong().color(colors.benzoate));
        ui.label(RichText::new(p.sorbate_label()).strong().color(colors.sorbate));
        ui.label(
            RichText::new(format!("280/320 ratio: {:.4}", p.features.ratio()))
                .small()
                .weak(),
        );
        if state.thresholds.is_unsafe(p.benzoate_ppm, p.sorbate_ppm) {
            ui.label(RichText::new("Above safety limit").color(Color32::RED));
        }
    }
}

// ---------------------------------------------------------------------------
// Central panel – batch upload, results, chart, download
// ---------------------------------------------------------------------------

/// Render the batch section.
pub fn batch_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Upload Sensor Data (CSV)");
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Choose a CSV file…").clicked() {
            open_file_dialog(state);
        }
        if let Some(name) = &state.batch_source {
            ui.label(RichText::new(name).monospace());
        }
    });
    ui.separator();

    let Some(prediction) = &state.batch else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("Upload a CSV with abs_280, abs_320 and abs_400 columns.");
        });
        return;
    };

    let mut download = false;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if !prediction.dropped.is_empty() {
                let header = RichText::new(format!("{} rows dropped", prediction.dropped.len()))
                    .color(Color32::from_rgb(0xd0, 0x80, 0x00));
                egui::CollapsingHeader::new(header)
                    .id_salt("dropped_rows")
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        for d in &prediction.dropped {
                            ui.label(format!("line {}: {}", d.line, d.reason));
                        }
                    });
            }

            if prediction.table.is_empty() {
                ui.label("No rows left to predict.");
                return;
            }

            table::results_table(ui, prediction);
            ui.add_space(12.0);

            ui.heading("Preservative Levels Comparison");
            plot::preservative_chart(ui, prediction, &state.thresholds);
            ui.add_space(8.0);

            download = ui.button("Download Predictions").clicked();
        });

    if download {
        save_file_dialog(state);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Upload CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.batch.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Download Predictions…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(RichText::new("Benzoate & Sorbate Estimator").strong());
        ui.separator();

        match &state.status_message {
            Some(Status::Error(msg)) => {
                ui.label(RichText::new(msg).color(Color32::RED));
            }
            Some(Status::Info(msg)) => {
                ui.label(RichText::new(msg).color(Color32::from_rgb(0x2e, 0x9e, 0x4f)));
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Upload sensor data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_batch(&path);
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    if state.batch.is_none() {
        return;
    }
    let file = rfd::FileDialog::new()
        .set_title("Download predictions")
        .add_filter("CSV", &["csv"])
        .set_file_name(DEFAULT_EXPORT_NAME)
        .save_file();

    if let Some(path) = file {
        state.export_batch(&path);
    }
}
