use std::fmt;

use crate::data::features::{AbsorbanceReadings, FeatureVector};
use crate::regression::provider::ModelContext;

/// Result of one manual prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinglePrediction {
    pub features: FeatureVector,
    pub benzoate_ppm: f64,
    pub sorbate_ppm: f64,
}

impl SinglePrediction {
    pub fn benzoate_label(&self) -> String {
        format_ppm("Benzoate", self.benzoate_ppm)
    }

    pub fn sorbate_label(&self) -> String {
        format_ppm("Sorbate", self.sorbate_ppm)
    }
}

impl fmt::Display for SinglePrediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.benzoate_label(), self.sorbate_label())
    }
}

pub fn format_ppm(name: &str, ppm: f64) -> String {
    format!("{name}: {ppm:.2} ppm")
}

/// Predict both preservatives for manually entered readings.
///
/// A zero `abs_320` gives a ratio of `0.0` rather than an error.
pub fn predict_single(models: &ModelContext, readings: AbsorbanceReadings) -> SinglePrediction {
    let features = FeatureVector::manual(readings);

    let benzoate_ppm = models.benzoate.predict(&features);
    let sorbate_ppm = models.sorbate.predict(&features);
    log::debug!("Single prediction for {features:?}: {benzoate_ppm} / {sorbate_ppm}");

    SinglePrediction {
        features,
        benzoate_ppm,
        sorbate_ppm,
    }
}
