use eframe::egui;

use crate::config::Settings;
use crate::regression::provider::ModelContext;
use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct EstimatorApp {
    pub state: AppState,
    settings: Settings,
}

impl EstimatorApp {
    pub fn new(models: ModelContext, settings: Settings) -> Self {
        Self {
            state: AppState::new(models, &settings),
            settings,
        }
    }
}

impl eframe::App for EstimatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar + status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: manual input ----
        egui::SidePanel::left("manual_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::manual_input_panel(ui, &mut self.state, &self.settings);
            });

        // ---- Central panel: batch upload, table, chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::batch_panel(ui, &mut self.state);
        });
    }
}
