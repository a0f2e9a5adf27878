use std::path::Path;

use crate::config::ModelPaths;
use crate::error::ModelError;

use super::regressor::{ModelArtifact, Regressor};

/// The two fitted regressors, loaded once and never mutated.
pub struct ModelContext {
    pub benzoate: Box<dyn Regressor>,
    pub sorbate: Box<dyn Regressor>,
}

impl ModelContext {
    pub fn new(benzoate: Box<dyn Regressor>, sorbate: Box<dyn Regressor>) -> Self {
        Self { benzoate, sorbate }
    }

    /// Load both artifacts. Any failure is fatal for the caller.
    pub fn load(paths: &ModelPaths) -> Result<Self, ModelError> {
        let benzoate = load_model("benzoate", &paths.benzoate)?;
        let sorbate = load_model("sorbate", &paths.sorbate)?;
        Ok(Self::new(benzoate, sorbate))
    }
}

/// Read and validate one JSON model artifact.
pub fn load_model(model: &'static str, path: &Path) -> Result<Box<dyn Regressor>, ModelError> {
    let text = std::fs::read_to_string(path).map_err(|source| ModelError::Read {
        model,
        path: path.to_path_buf(),
        source,
    })?;
    let artifact: ModelArtifact =
        serde_json::from_str(&text).map_err(|source| ModelError::Decode {
            model,
            path: path.to_path_buf(),
            source,
        })?;
    let fitted = artifact.into_regressor(model)?;
    log::info!("Loaded {model} model from {}", path.display());
    Ok(Box::new(fitted))
}
