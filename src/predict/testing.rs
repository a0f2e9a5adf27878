use std::cell::RefCell;
use std::rc::Rc;

use crate::data::features::FeatureVector;
use crate::regression::provider::ModelContext;
use crate::regression::regressor::Regressor;

#[derive(Clone, Copy)]
enum Output {
    Constant(f64),
    Ratio,
    Scaled(f64),
}

/// Mock regressor that records every feature vector it is asked about.
/// Clones share the same log.
#[derive(Clone)]
pub struct RecordingRegressor {
    output: Output,
    seen: Rc<RefCell<Vec<Vec<f64>>>>,
}

impl RecordingRegressor {
    fn with(output: Output) -> Self {
        Self {
            output,
            seen: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn constant(v: f64) -> Self {
        Self::with(Output::Constant(v))
    }

    /// Predicts the ratio feature itself.
    pub fn ratio() -> Self {
        Self::with(Output::Ratio)
    }

    /// Predicts `factor * abs_280`.
    pub fn scaled(factor: f64) -> Self {
        Self::with(Output::Scaled(factor))
    }

    pub fn seen(&self) -> Vec<Vec<f64>> {
        self.seen.borrow().clone()
    }
}

impl Regressor for RecordingRegressor {
    fn predict(&self, features: &FeatureVector) -> f64 {
        let x = features.as_slice();
        self.seen.borrow_mut().push(x.to_vec());
        match self.output {
            Output::Constant(v) => v,
            Output::Ratio => features.ratio(),
            Output::Scaled(k) => k * x[0],
        }
    }
}

pub fn context(benzoate: &RecordingRegressor, sorbate: &RecordingRegressor) -> ModelContext {
    ModelContext::new(Box::new(benzoate.clone()), Box::new(sorbate.clone()))
}
