//! Fitted regressors and the context that owns them.

pub mod provider;
pub mod regressor;
