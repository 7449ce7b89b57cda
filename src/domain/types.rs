//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting and rendering
//! - exported to JSON/CSV
//! - compared in tests without extra plumbing

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Header of the occupant-count column ("number of occupants").
pub const COL_OCCUPANTS: &str = "Jumlah Penghuni";
/// Header of the per-person food consumption column, kg/day.
pub const COL_CONSUMPTION: &str = "Konsumsi Makanan (kg)";
/// Header of the household waste column, kg/day.
pub const COL_WASTE: &str = "Sampah (kg)";

/// Required columns, in canonical order.
pub const REQUIRED_COLUMNS: [&str; 3] = [COL_OCCUPANTS, COL_CONSUMPTION, COL_WASTE];

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_SAMPLE_ROWS: usize = 100;

pub const DEFAULT_OCCUPANTS: u32 = 3;
pub const DEFAULT_CONSUMPTION: f64 = 1.5;
pub const MIN_OCCUPANTS: u32 = 1;
pub const MIN_CONSUMPTION: f64 = 0.1;

/// Number of dataset rows shown in the preview table.
pub const PREVIEW_ROWS: usize = 20;

/// Occupant range swept by the regression line in the chart.
pub const LINE_OCCUPANTS_MIN: u32 = 1;
pub const LINE_OCCUPANTS_MAX: u32 = 10;

/// One household observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WasteRow {
    #[serde(rename = "Jumlah Penghuni")]
    pub occupants: u32,
    /// Food consumed per person per day (kg).
    #[serde(rename = "Konsumsi Makanan (kg)")]
    pub consumption: f64,
    /// Household waste per day (kg).
    #[serde(rename = "Sampah (kg)")]
    pub waste: f64,
}

/// Where the active dataset came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DatasetSource {
    /// Parsed from a user-supplied delimited file.
    Uploaded { name: String },
    /// Produced by the seeded generator.
    Synthetic { seed: u64, rows: usize },
}

impl DatasetSource {
    pub fn is_synthetic(&self) -> bool {
        matches!(self, DatasetSource::Synthetic { .. })
    }
}

/// The active training table, in load/generation order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub rows: Vec<WasteRow>,
    pub source: DatasetSource,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First `n` rows (or all of them when the table is shorter).
    pub fn head(&self, n: usize) -> &[WasteRow] {
        &self.rows[..self.rows.len().min(n)]
    }
}

/// The scenario typed into the input widgets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    pub occupants: u32,
    pub consumption: f64,
}

impl Default for ScenarioInput {
    fn default() -> Self {
        Self {
            occupants: DEFAULT_OCCUPANTS,
            consumption: DEFAULT_CONSUMPTION,
        }
    }
}

impl ScenarioInput {
    /// Build an input, enforcing the widget minimums.
    pub fn new(occupants: u32, consumption: f64) -> Result<Self, AppError> {
        if occupants < MIN_OCCUPANTS {
            return Err(AppError::usage(format!(
                "Occupants must be >= {MIN_OCCUPANTS} (got {occupants})."
            )));
        }
        if !(consumption.is_finite() && consumption >= MIN_CONSUMPTION) {
            return Err(AppError::usage(format!(
                "Consumption must be >= {MIN_CONSUMPTION} kg/day (got {consumption})."
            )));
        }
        Ok(Self {
            occupants,
            consumption,
        })
    }

    /// Step the occupant count, never going below the minimum.
    pub fn step_occupants(&mut self, delta: i32) {
        let next = i64::from(self.occupants) + i64::from(delta);
        self.occupants = u32::try_from(next.max(i64::from(MIN_OCCUPANTS))).unwrap_or(u32::MAX);
    }

    /// Step consumption in 0.1 kg increments, never going below the minimum.
    ///
    /// The value is re-rounded to one decimal so repeated steps don't drift.
    pub fn step_consumption(&mut self, delta: i32) {
        let tenths = (self.consumption * 10.0).round() + f64::from(delta);
        self.consumption = (tenths / 10.0).max(MIN_CONSUMPTION);
    }
}

/// Fitted coefficients of `waste = b0 + b1*occupants + b2*consumption`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub occupants_coef: f64,
    pub consumption_coef: f64,
}

/// Fit quality diagnostics over the training rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    pub n: usize,
    pub sse: f64,
    pub rmse: f64,
    /// Coefficient of determination. `None` when the target has zero variance.
    pub r_squared: Option<f64>,
}

/// Fit output for the single model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub model: LinearModel,
    pub quality: FitQuality,
}
