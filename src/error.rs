use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Startup: model artifacts
// ---------------------------------------------------------------------------

/// Failure to bring a regressor online. Always fatal at startup.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{model} model: cannot read {}", path.display())]
    Read {
        model: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{model} model: {} is not a valid model artifact", path.display())]
    Decode {
        model: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{model} model: expected features {expected:?}, artifact declares {found:?}")]
    FeatureMismatch {
        model: &'static str,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("{model} model: {found} coefficients for {expected} features")]
    CoefficientCount {
        model: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{model} model: ensemble has no members")]
    EmptyEnsemble { model: &'static str },
}

// ---------------------------------------------------------------------------
// Batch requests
// ---------------------------------------------------------------------------

/// Failure of a single batch upload. The request is abandoned, nothing is shown.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("could not open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0} (expected .csv)")]
    UnsupportedExtension(String),

    #[error("could not parse CSV: {0}")]
    Parse(#[from] csv::Error),

    #[error("CSV must contain: {}. Missing: {}", required.join(", "), missing.join(", "))]
    MissingColumns {
        required: Vec<String>,
        missing: Vec<String>,
    },
}

/// Failure to write the augmented table.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not encode CSV: {0}")]
    Csv(#[from] csv::Error),
}
