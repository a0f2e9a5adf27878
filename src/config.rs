use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::features::AbsorbanceReadings;
use crate::predict::safety::SafetyThresholds;

/// Optional settings file, looked up in the working directory.
pub const CONFIG_FILE: &str = "preservative-estimator.json";

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelPaths {
    pub benzoate: PathBuf,
    pub sorbate: PathBuf,
}

impl Default for ModelPaths {
    fn default() -> Self {
        Self {
            benzoate: PathBuf::from("models/regression/benzoate_model.json"),
            sorbate: PathBuf::from("models/regression/sorbate_model.json"),
        }
    }
}

/// Initial values of the manual input widgets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputDefaults {
    pub abs_280: f64,
    pub abs_320: f64,
    pub abs_400: f64,
}

impl Default for InputDefaults {
    fn default() -> Self {
        Self {
            abs_280: 0.42,
            abs_320: 0.35,
            abs_400: 0.28,
        }
    }
}

impl From<InputDefaults> for AbsorbanceReadings {
    fn from(d: InputDefaults) -> Self {
        AbsorbanceReadings {
            abs_280: d.abs_280,
            abs_320: d.abs_320,
            abs_400: d.abs_400,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub models: ModelPaths,
    pub thresholds: SafetyThresholds,
    pub defaults: InputDefaults,
}

impl Settings {
    /// Load settings from `path`, falling back to defaults.
    ///
    /// A missing file is normal; an unreadable or malformed one is logged.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("No {} found, using default settings", path.display());
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("Error parsing {}: {e}; using default settings", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Error reading {}: {e}; using default settings", path.display());
                Self::default()
            }
        }
    }

    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }
}
