use std::path::Path;

use crate::config::Settings;
use crate::data::export;
use crate::data::features::AbsorbanceReadings;
use crate::predict::batch::{self, BatchPrediction};
use crate::predict::safety::SafetyThresholds;
use crate::predict::single::{self, SinglePrediction};
use crate::regression::provider::ModelContext;

// ---------------------------------------------------------------------------
// Status line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Info(String),
    Error(String),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Both regressors, loaded before the window opened.
    pub models: ModelContext,

    pub thresholds: SafetyThresholds,

    /// Current values of the three manual input widgets.
    pub inputs: AbsorbanceReadings,

    /// Last manual prediction (None until the button is pressed).
    pub single: Option<SinglePrediction>,

    /// Last successful batch (None while idle).
    pub batch: Option<BatchPrediction>,

    /// File name of the batch currently shown.
    pub batch_source: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<Status>,
}

impl AppState {
    pub fn new(models: ModelContext, settings: &Settings) -> Self {
        Self {
            models,
            thresholds: settings.thresholds,
            inputs: settings.defaults.into(),
            single: None,
            batch: None,
            batch_source: None,
            status_message: None,
        }
    }

    /// Predict button.
    pub fn predict_single(&mut self) {
        let prediction = single::predict_single(&self.models, self.inputs);
        log::info!("{prediction}");
        self.single = Some(prediction);
    }

    /// Run an uploaded file. On failure the batch view returns to idle.
    pub fn load_batch(&mut self, path: &Path) {
        match batch::predict_file(&self.models, path, &self.thresholds) {
            Ok(prediction) => {
                self.status_message = Some(Status::Info(prediction.summary()));
                self.batch_source = path.file_name().map(|n| n.to_string_lossy().into_owned());
                self.batch = Some(prediction);
            }
            Err(e) => {
                log::error!("Batch upload failed: {e}");
                self.status_message = Some(Status::Error(format!("Error: {e}")));
                self.batch = None;
                self.batch_source = None;
            }
        }
    }

    /// Write the current batch to `path`.
    pub fn export_batch(&mut self, path: &Path) {
        let Some(prediction) = &self.batch else {
            return;
        };
        match export::save_csv(&prediction.table, path) {
            Ok(()) => {
                log::info!("Exported {} rows to {}", prediction.table.len(), path.display());
                self.status_message = Some(Status::Info(format!(
                    "Saved predictions to {}",
                    path.display()
                )));
            }
            Err(e) => {
                log::error!("Export failed: {e}");
                self.status_message = Some(Status::Error(format!("Error: {e}")));
            }
        }
    }

    /// An input widget changed; the shown result no longer matches it.
    pub fn inputs_changed(&mut self) {
        self.single = None;
    }

    pub fn reset_inputs(&mut self, settings: &Settings) {
        self.inputs = settings.defaults.into();
        self.single = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predict::testing::{context, RecordingRegressor};

    fn state(benzoate: &RecordingRegressor, sorbate: &RecordingRegressor) -> AppState {
        AppState::new(context(benzoate, sorbate), &Settings::default())
    }

    #[test]
    fn starts_with_default_inputs_and_no_results() {
        let (b, s) = (RecordingRegressor::constant(1.0), RecordingRegressor::constant(2.0));
        let st = state(&b, &s);
        assert_eq!(st.inputs.abs_280, 0.42);
        assert_eq!(st.inputs.abs_320, 0.35);
        assert_eq!(st.inputs.abs_400, 0.28);
        assert!(st.single.is_none() && st.batch.is_none());
        assert!(b.seen().is_empty());
    }

    #[test]
    fn predict_button_stores_result() {
        let (b, s) = (RecordingRegressor::constant(151.0), RecordingRegressor::constant(2.0));
        let mut st = state(&b, &s);
        st.predict_single();
        let p = st.single.unwrap();
        assert_eq!(p.benzoate_label(), "Benzoate: 151.00 ppm");
        assert_eq!(p.sorbate_label(), "Sorbate: 2.00 ppm");
    }

    #[test]
    fn editing_an_input_clears_stale_result() {
        let (b, s) = (RecordingRegressor::constant(1.0), RecordingRegressor::constant(2.0));
        let mut st = state(&b, &s);
        st.predict_single();
        assert!(st.single.is_some());

        st.inputs.abs_320 = 0.5;
        st.inputs_changed();
        assert!(st.single.is_none());

        st.predict_single();
        assert_eq!(b.seen().len(), 2);
        assert_eq!(b.seen()[1][1], 0.5);
    }

    #[test]
    fn failed_upload_clears_previous_batch() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.csv");
        let bad = dir.path().join("bad.csv");
        std::fs::write(&good, "abs_280,abs_320,abs_400\n0.4,0.2,0.25\n").unwrap();
        std::fs::write(&bad, "abs_280,abs_400\n0.4,0.25\n").unwrap();

        let (b, s) = (RecordingRegressor::constant(1.0), RecordingRegressor::constant(2.0));
        let mut st = state(&b, &s);

        st.load_batch(&good);
        assert!(st.batch.is_some());
        assert_eq!(st.batch_source.as_deref(), Some("good.csv"));

        st.load_batch(&bad);
        assert!(st.batch.is_none());
        match &st.status_message {
            Some(Status::Error(msg)) => assert!(msg.starts_with("Error: CSV must contain")),
            other => panic!("unexpected status: {other:?}"),
        }
    }

    #[test]
    fn export_writes_augmented_table() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        std::fs::write(&input, "abs_280,abs_320,abs_400\n0.5,0.0,0.3\n0.4,0.2,0.25\n").unwrap();

        let (b, s) = (RecordingRegressor::constant(3.0), RecordingRegressor::constant(4.0));
        let mut st = state(&b, &s);
        st.load_batch(&input);
        st.export_batch(&output);

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(
            written,
            "abs_280,abs_320,abs_400,abs_280_320_ratio,benzoate_ppm,sorbate_ppm\n\
             0.4,0.2,0.25,2,3,4\n"
        );
        assert!(matches!(st.status_message, Some(Status::Info(_))));
    }
}
