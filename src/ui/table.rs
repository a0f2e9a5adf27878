use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::UNSAFE_ROW;
use crate::predict::batch::BatchPrediction;

// ---------------------------------------------------------------------------
// Results table
// ---------------------------------------------------------------------------

/// Render the augmented batch; rows above a safety limit get a red background.
pub fn results_table(ui: &mut Ui, prediction: &BatchPrediction) {
    let table = &prediction.table;

    ui.push_id("results_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .columns(Column::auto().at_least(70.0), table.headers.len())
            .max_scroll_height(320.0)
            .header(22.0, |mut header| {
                for name in &table.headers {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(20.0, table.len(), |mut row| {
                    let idx = row.index();
                    let flagged = prediction.unsafe_rows.get(idx).copied().unwrap_or(false);
                    for cell in &table.rows[idx].cells {
                        row.col(|ui: &mut Ui| {
                            let mut text = RichText::new(cell.to_string());
                            if flagged {
                                ui.painter().rect_filled(ui.max_rect(), 0.0, UNSAFE_ROW);
                                text = text.color(Color32::BLACK);
                            }
                            ui.label(text);
                        });
                    }
                });
            });
    });
}
