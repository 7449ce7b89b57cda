//! File exports.
//!
//! - the active dataset as CSV (same headers the upload path expects, so a
//!   generated table can be fed straight back in)
//! - the fitted model as JSON, together with the scenario and its chart line

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{Dataset, DatasetSource, FitResult, ScenarioInput};
use crate::error::AppError;
use crate::plot::ChartSeries;

/// A saved model file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFile {
    pub tool: String,
    pub source: DatasetSource,
    pub fit: FitResult,
    pub scenario: ScenarioInput,
    pub prediction: f64,
    pub line: ModelLine,
}

/// Predicted waste along the occupant axis at the scenario's consumption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelLine {
    pub consumption: f64,
    pub occupants: Vec<f64>,
    pub waste: Vec<f64>,
}

impl ModelFile {
    pub fn new(
        source: &DatasetSource,
        fit: &FitResult,
        scenario: ScenarioInput,
        prediction: f64,
        chart: &ChartSeries,
    ) -> Self {
        Self {
            tool: "waste".to_string(),
            source: source.clone(),
            fit: *fit,
            scenario,
            prediction,
            line: ModelLine {
                consumption: chart.consumption,
                occupants: chart.line.iter().map(|&(x, _)| x).collect(),
                waste: chart.line.iter().map(|&(_, y)| y).collect(),
            },
        }
    }
}

/// Write the dataset rows to a CSV file with the canonical headers.
pub fn write_dataset_csv(path: &Path, dataset: &Dataset) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::io(format!("Failed to create dataset CSV '{}': {e}", path.display())))?;

    for row in &dataset.rows {
        writer
            .serialize(row)
            .map_err(|e| AppError::io(format!("Failed to write dataset CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::io(format!("Failed to flush dataset CSV: {e}")))?;

    tracing::info!(path = %path.display(), rows = dataset.len(), "wrote dataset CSV");
    Ok(())
}

/// Write a model JSON file.
pub fn write_model_json(path: &Path, model: &ModelFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create model JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, model)
        .map_err(|e| AppError::io(format!("Failed to write model JSON: {e}")))?;

    tracing::info!(path = %path.display(), "wrote model JSON");
    Ok(())
}

#[cfg(test)]
fn read_model_json(path: &Path) -> Result<ModelFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open model JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(file).map_err(|e| AppError::io(format!("Invalid model JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generate_synthetic;
    use crate::io::ingest::load_dataset_file;
    use crate::models::{fit_dataset, predict};
    use crate::plot::build_chart_series;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("household-waste-{}-{name}", std::process::id()))
    }

    #[test]
    fn generated_csv_reloads_as_upload() {
        let ds = generate_synthetic(42, 12).unwrap();
        let path = temp_path("generated.csv");
        write_dataset_csv(&path, &ds).unwrap();

        let loaded = load_dataset_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.len(), 12);
        for (a, b) in ds.rows.iter().zip(&loaded.rows) {
            assert_eq!(a.occupants, b.occupants);
            assert!((a.consumption - b.consumption).abs() < 1e-9);
            assert!((a.waste - b.waste).abs() < 1e-9);
        }
        assert!(!loaded.source.is_synthetic());
    }

    #[test]
    fn model_json_keeps_coefficients_and_line() {
        let ds = generate_synthetic(3, 30).unwrap();
        let fit = fit_dataset(&ds).unwrap();
        let scenario = ScenarioInput::default();
        let prediction = predict(&fit.model, scenario);
        let chart = build_chart_series(&ds, &fit.model, scenario.consumption);

        let path = temp_path("model.json");
        write_model_json(&path, &ModelFile::new(&ds.source, &fit, scenario, prediction, &chart)).unwrap();
        let back = read_model_json(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(back.fit.model, fit.model);
        assert_eq!(back.line.occupants.len(), 10);
        assert_eq!(back.source, ds.source);
        assert!((back.prediction - prediction).abs() < 1e-12);
    }
}
