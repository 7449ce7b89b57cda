//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - dataset rows and their provenance (`WasteRow`, `Dataset`, `DatasetSource`)
//! - the prediction scenario entered by the user (`ScenarioInput`)
//! - fit outputs (`LinearModel`, `FitQuality`, `FitResult`)

pub mod types;

pub use types::*;
