//! Shared page computation used by both CLI and TUI front-ends.
//!
//! Every interaction re-runs the whole page:
//! data source -> OLS fit -> (on "predict now") prediction + chart series
//!
//! `compute` is a pure function of the caller-held [`Session`]; the front-ends
//! only decide how to present the resulting [`PageView`].

use std::path::PathBuf;

use crate::data::generate_synthetic;
use crate::domain::{
    DEFAULT_SAMPLE_ROWS, DEFAULT_SEED, Dataset, FitResult, PREVIEW_ROWS, ScenarioInput, WasteRow,
};
use crate::error::AppError;
use crate::io::ingest::{load_dataset_file, parse_upload};
use crate::models::{fit_dataset, predict};
use crate::plot::{ChartSeries, build_chart_series};

/// Where the training table comes from on each run.
#[derive(Debug, Clone, PartialEq)]
pub enum DataInput {
    /// No upload: simulate `rows` rows from `seed`.
    Synthetic { seed: u64, rows: usize },
    /// A delimited file on disk, re-read on every run.
    File(PathBuf),
    /// Upload content already held in memory.
    Upload { name: String, bytes: Vec<u8> },
}

impl Default for DataInput {
    fn default() -> Self {
        DataInput::Synthetic {
            seed: DEFAULT_SEED,
            rows: DEFAULT_SAMPLE_ROWS,
        }
    }
}

/// Caller-held state for one user session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub data: DataInput,
    pub input: ScenarioInput,
    /// Whether the "predict now" action has been triggered.
    pub predict_requested: bool,
}

/// Output of the "predict now" action.
#[derive(Debug, Clone)]
pub struct PredictionView {
    pub input: ScenarioInput,
    /// Predicted waste, kg/day.
    pub waste: f64,
    pub chart: ChartSeries,
}

/// Everything a front-end needs to render one run of the page.
#[derive(Debug, Clone)]
pub struct PageView {
    pub dataset: Dataset,
    pub fit: FitResult,
    pub prediction: Option<PredictionView>,
}

impl PageView {
    /// Rows shown in the data preview table.
    pub fn preview(&self) -> &[WasteRow] {
        self.dataset.head(PREVIEW_ROWS)
    }
}

/// Load the dataset the session points at.
pub fn load_data(data: &DataInput) -> Result<Dataset, AppError> {
    match data {
        DataInput::Synthetic { seed, rows } => generate_synthetic(*seed, *rows),
        DataInput::File(path) => load_dataset_file(path),
        DataInput::Upload { name, bytes } => parse_upload(name, bytes),
    }
}

/// Run the whole page for one interaction.
///
/// A data-source failure halts the run: no fit, no preview, no fallback.
pub fn compute(session: &Session) -> Result<PageView, AppError> {
    let dataset = load_data(&session.data)?;
    let fit = fit_dataset(&dataset)?;

    let prediction = session.predict_requested.then(|| {
        let input = session.input;
        PredictionView {
            input,
            waste: predict(&fit.model, input),
            chart: build_chart_series(&dataset, &fit.model, input.consumption),
        }
    });

    tracing::info!(
        rows = dataset.len(),
        synthetic = dataset.source.is_synthetic(),
        predicted = ?prediction.as_ref().map(|p| p.waste),
        "computed page"
    );

    Ok(PageView {
        dataset,
        fit,
        prediction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DatasetSource;
    use crate::error::ErrorKind;

    const FIVE_ROWS: &str = "\
Jumlah Penghuni,Konsumsi Makanan (kg),Sampah (kg)
1,1.0,0.5
2,1.5,1.4
3,2.0,3.1
4,0.8,1.6
5,1.2,3.0
";

    #[test]
    fn default_session_end_to_end() {
        let session = Session {
            predict_requested: true,
            ..Session::default()
        };
        let view = compute(&session).unwrap();

        assert_eq!(view.dataset.len(), 100);
        assert_eq!(view.dataset.source, DatasetSource::Synthetic { seed: 42, rows: 100 });
        assert_eq!(view.preview().len(), PREVIEW_ROWS);

        let prediction = view.prediction.unwrap();
        assert_eq!(prediction.input, ScenarioInput::new(3, 1.5).unwrap());
        assert!(prediction.waste.is_finite() && prediction.waste > 0.0);

        let chart = prediction.chart;
        assert_eq!(chart.line.len(), 10);
        assert_eq!(chart.line[0].0, 1.0);
        assert_eq!(chart.line[9].0, 10.0);
        assert_eq!(chart.consumption, 1.5);
        assert_eq!(chart.points.len(), 100);
    }

    #[test]
    fn no_prediction_until_requested() {
        let view = compute(&Session::default()).unwrap();
        assert!(view.prediction.is_none());
        assert_eq!(view.dataset.len(), 100);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let session = Session {
            predict_requested: true,
            ..Session::default()
        };
        let a = compute(&session).unwrap();
        let b = compute(&session).unwrap();
        assert_eq!(a.dataset, b.dataset);
        assert_eq!(a.fit, b.fit);
        assert_eq!(a.prediction.unwrap().waste, b.prediction.unwrap().waste);
    }

    #[test]
    fn upload_replaces_synthetic_dataset() {
        let session = Session {
            data: DataInput::Upload {
                name: "five.csv".to_string(),
                bytes: FIVE_ROWS.as_bytes().to_vec(),
            },
            input: ScenarioInput::default(),
            predict_requested: true,
        };
        let view = compute(&session).unwrap();

        assert_eq!(view.dataset.len(), 5);
        assert!(!view.dataset.source.is_synthetic());
        assert_eq!(view.preview().len(), 5);
        assert_eq!(view.preview(), view.dataset.rows.as_slice());
        assert_eq!(view.prediction.unwrap().chart.points.len(), 5);
    }

    #[test]
    fn binary_upload_halts_the_page() {
        let session = Session {
            data: DataInput::Upload {
                name: "blob.bin".to_string(),
                bytes: vec![0xff, 0xfe, 0x00, 0x9c, 0x80, 0x0a, 0xc3, 0x28],
            },
            input: ScenarioInput::default(),
            predict_requested: true,
        };
        let err = compute(&session).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileParse);
    }
}
