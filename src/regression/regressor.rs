use serde::{Deserialize, Serialize};

use crate::data::features::{FeatureVector, FEATURE_NAMES};
use crate::error::ModelError;

// ---------------------------------------------------------------------------
// Regressor – the only thing the predictors know about a model
// ---------------------------------------------------------------------------

/// A fitted model mapping one feature vector to one prediction (ppm).
pub trait Regressor {
    fn predict(&self, features: &FeatureVector) -> f64;

    /// Predict every vector, preserving order.
    fn predict_many(&self, features: &[FeatureVector]) -> Vec<f64> {
        features.iter().map(|f| self.predict(f)).collect()
    }
}

// ---------------------------------------------------------------------------
// JSON artifacts produced by the training side
// ---------------------------------------------------------------------------

/// A linear model: `intercept + Σ coefficients[i] * features[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearModel {
    fn evaluate(&self, features: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(features)
            .fold(self.intercept, |acc, (w, x)| acc + w * x)
    }
}

/// Serialized model, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear {
        #[serde(default)]
        feature_names: Option<Vec<String>>,
        #[serde(flatten)]
        model: LinearModel,
    },
    /// Bagged linear members; the prediction is their mean.
    Ensemble {
        #[serde(default)]
        feature_names: Option<Vec<String>>,
        members: Vec<LinearModel>,
    },
}

impl ModelArtifact {
    /// Check the artifact against the fixed feature order and turn it into
    /// a ready regressor.
    pub fn into_regressor(self, model: &'static str) -> Result<FittedModel, ModelError> {
        let (feature_names, members) = match self {
            ModelArtifact::Linear {
                feature_names,
                model: linear,
            } => (feature_names, vec![linear]),
            ModelArtifact::Ensemble {
                feature_names,
                members,
            } => (feature_names, members),
        };

        if let Some(found) = feature_names {
            if found.iter().map(String::as_str).ne(FEATURE_NAMES) {
                return Err(ModelError::FeatureMismatch {
                    model,
                    expected: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
                    found,
                });
            }
        }
        if members.is_empty() {
            return Err(ModelError::EmptyEnsemble { model });
        }
        if let Some(bad) = members
            .iter()
            .find(|m| m.coefficients.len() != FEATURE_NAMES.len())
        {
            return Err(ModelError::CoefficientCount {
                model,
                expected: FEATURE_NAMES.len(),
                found: bad.coefficients.len(),
            });
        }

        Ok(FittedModel { members })
    }
}

/// A validated artifact: one or more linear members averaged.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedModel {
    members: Vec<LinearModel>,
}

impl Regressor for FittedModel {
    fn predict(&self, features: &FeatureVector) -> f64 {
        let x = features.as_slice();
        let sum: f64 = self.members.iter().map(|m| m.evaluate(x)).sum();
        sum / self.members.len() as f64
    }
}
