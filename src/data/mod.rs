/// Data layer: table types, feature derivation, CSV in and out.
///
/// Architecture:
/// ```text
///   upload.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → BatchTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ features  │  readings → FeatureVector (ratio policy)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  augmented BatchTable → predicted_preservatives.csv
///   └──────────┘
/// ```

pub mod export;
pub mod features;
pub mod loader;
pub mod model;
