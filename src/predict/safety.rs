use serde::{Deserialize, Serialize};

/// Concentrations above which a sample is flagged. Strictly greater-than.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyThresholds {
    pub benzoate_ppm: f64,
    pub sorbate_ppm: f64,
}

impl Default for SafetyThresholds {
    fn default() -> Self {
        Self {
            benzoate_ppm: 150.0,
            sorbate_ppm: 250.0,
        }
    }
}

impl SafetyThresholds {
    pub fn is_unsafe(&self, benzoate_ppm: f64, sorbate_ppm: f64) -> bool {
        benzoate_ppm > self.benzoate_ppm || sorbate_ppm > self.sorbate_ppm
    }
}
