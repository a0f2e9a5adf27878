//! Request handlers behind the two user actions.
//!
//! ```text
//!   Predict button ──► single::predict_single ──► SinglePrediction
//!   CSV upload     ──► batch::predict_file    ──► BatchPrediction | BatchError
//! ```
//!
//! Both share one read-only `ModelContext` and nothing else.

pub mod batch;
pub mod safety;
pub mod single;

#[cfg(test)]
pub(crate) mod testing;
