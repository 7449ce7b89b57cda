//! Input/output helpers.
//!
//! - CSV upload ingest + validation (`ingest`)
//! - dataset CSV and model JSON exports (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
