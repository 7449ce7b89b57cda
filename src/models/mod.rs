//! Linear regression model: fit and prediction.
//!
//! Kept as small, pure functions so the pipeline, the exports and the charts
//! all evaluate the model the same way.

pub mod regression;

pub use regression::*;
