// ---------------------------------------------------------------------------
// Column names shared by both prediction paths
// ---------------------------------------------------------------------------

pub const ABS_280: &str = "abs_280";
pub const ABS_320: &str = "abs_320";
pub const ABS_400: &str = "abs_400";
pub const RATIO: &str = "abs_280_320_ratio";

/// Raw readings every batch must carry.
pub const REQUIRED_COLUMNS: [&str; 3] = [ABS_280, ABS_320, ABS_400];

/// Order the regressors were fitted on.
pub const FEATURE_NAMES: [&str; 4] = [ABS_280, ABS_320, ABS_400, RATIO];

// ---------------------------------------------------------------------------
// Readings and the derived feature vector
// ---------------------------------------------------------------------------

/// Three raw UV absorbance readings for one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbsorbanceReadings {
    pub abs_280: f64,
    pub abs_320: f64,
    pub abs_400: f64,
}

/// Manual-entry ratio: a zero `abs_320` gives the sentinel `0.0`.
pub fn sentinel_ratio(abs_280: f64, abs_320: f64) -> f64 {
    if abs_320 == 0.0 {
        return 0.0;
    }
    abs_280 / abs_320
}

/// Batch ratio: undefined when `abs_320` is zero or the quotient is NaN
/// (`inf / inf`); the row is dropped downstream. Infinite ratios are kept.
pub fn batch_ratio(abs_280: f64, abs_320: f64) -> Option<f64> {
    if abs_320 == 0.0 {
        return None;
    }
    let ratio = abs_280 / abs_320;
    (!ratio.is_nan()).then_some(ratio)
}

/// Fixed-order model input: `[abs_280, abs_320, abs_400, abs_280_320_ratio]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; 4]);

impl FeatureVector {
    pub fn new(readings: AbsorbanceReadings, ratio: f64) -> Self {
        FeatureVector([
            readings.abs_280,
            readings.abs_320,
            readings.abs_400,
            ratio,
        ])
    }

    /// Feature vector for a manually entered sample.
    pub fn manual(readings: AbsorbanceReadings) -> Self {
        Self::new(readings, sentinel_ratio(readings.abs_280, readings.abs_320))
    }

    /// Feature vector for a batch row, `None` when the ratio is undefined.
    pub fn batch(readings: AbsorbanceReadings) -> Option<Self> {
        batch_ratio(readings.abs_280, readings.abs_320).map(|r| Self::new(readings, r))
    }

    pub fn ratio(&self) -> f64 {
        self.0[3]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}
