//! Two-feature OLS regression of household waste.
//!
//! The fit and the predictor rely on two primitive operations:
//! - build a centred feature row `[occupants - mean, consumption - mean]` (for OLS)
//! - evaluate `b0 + b1*occupants + b2*consumption` (for predictions/plots)
//!
//! The intercept is not a design column: features and target are centred,
//! the slopes are solved on the centred data and `b0 = mean(y) - b . mean(x)`.
//! With a constant feature column the slope for it comes out as zero and the
//! intercept absorbs its level.

use nalgebra::{DMatrix, DVector};

use crate::domain::{Dataset, FitQuality, FitResult, LinearModel, ScenarioInput};
use crate::error::AppError;
use crate::math::solve_least_squares;

/// Number of slope columns: occupants and consumption.
pub const FEATURES: usize = 2;

/// Fill a centred feature row.
pub fn fill_feature_row(occupants: f64, consumption: f64, means: &[f64; FEATURES], out: &mut [f64; FEATURES]) {
    out[0] = occupants - means[0];
    out[1] = consumption - means[1];
}

impl LinearModel {
    /// Evaluate the model at raw feature values.
    pub fn eval(&self, occupants: f64, consumption: f64) -> f64 {
        self.intercept + self.occupants_coef * occupants + self.consumption_coef * consumption
    }
}

/// Predict waste (kg/day) for one scenario.
pub fn predict(model: &LinearModel, input: ScenarioInput) -> f64 {
    model.eval(f64::from(input.occupants), input.consumption)
}

/// Fit `waste ~ occupants + consumption` by ordinary least squares over every row.
pub fn fit_dataset(dataset: &Dataset) -> Result<FitResult, AppError> {
    let n = dataset.len();
    if n == 0 {
        return Err(AppError::fit("Cannot fit a model to an empty dataset."));
    }

    let n_f = n as f64;
    let means = [
        dataset.rows.iter().map(|r| f64::from(r.occupants)).sum::<f64>() / n_f,
        dataset.rows.iter().map(|r| r.consumption).sum::<f64>() / n_f,
    ];
    let y_mean = dataset.rows.iter().map(|r| r.waste).sum::<f64>() / n_f;

    let mut x = DMatrix::<f64>::zeros(n, FEATURES);
    let mut y = DVector::<f64>::zeros(n);
    let mut row = [0.0; FEATURES];
    for (i, r) in dataset.rows.iter().enumerate() {
        fill_feature_row(f64::from(r.occupants), r.consumption, &means, &mut row);
        for (j, v) in row.iter().enumerate() {
            x[(i, j)] = *v;
        }
        y[i] = r.waste - y_mean;
    }

    let beta = solve_least_squares(&x, &y)
        .ok_or_else(|| AppError::fit("Least squares solve produced no finite coefficients."))?;

    let model = LinearModel {
        intercept: y_mean - beta[0] * means[0] - beta[1] * means[1],
        occupants_coef: beta[0],
        consumption_coef: beta[1],
    };
    let quality = fit_quality(dataset, &model);

    tracing::debug!(
        n,
        b0 = model.intercept,
        b1 = model.occupants_coef,
        b2 = model.consumption_coef,
        rmse = quality.rmse,
        "fitted linear model"
    );

    Ok(FitResult { model, quality })
}

fn fit_quality(dataset: &Dataset, model: &LinearModel) -> FitQuality {
    let n = dataset.len();
    let mean = dataset.rows.iter().map(|r| r.waste).sum::<f64>() / n as f64;

    let mut sse = 0.0;
    let mut sst = 0.0;
    for r in &dataset.rows {
        let resid = r.waste - model.eval(f64::from(r.occupants), r.consumption);
        sse += resid * resid;
        sst += (r.waste - mean).powi(2);
    }

    FitQuality {
        n,
        sse,
        rmse: (sse / n as f64).sqrt(),
        r_squared: (sst > 0.0).then(|| 1.0 - sse / sst),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generate_synthetic;
    use crate::domain::{DatasetSource, WasteRow};

    fn table(rows: &[(u32, f64, f64)]) -> Dataset {
        Dataset {
            rows: rows
                .iter()
                .map(|&(occupants, consumption, waste)| WasteRow {
                    occupants,
                    consumption,
                    waste,
                })
                .collect(),
            source: DatasetSource::Uploaded {
                name: "test.csv".to_string(),
            },
        }
    }

    #[test]
    fn recovers_noise_free_relation() {
        // waste = 2 * occupants, consumption varies independently.
        let ds = table(&[(1, 1.0, 2.0), (2, 3.0, 4.0), (3, 2.0, 6.0), (4, 0.5, 8.0)]);
        let fit = fit_dataset(&ds).unwrap();

        assert!(fit.model.intercept.abs() < 1e-9);
        assert!((fit.model.occupants_coef - 2.0).abs() < 1e-9);
        assert!(fit.model.consumption_coef.abs() < 1e-9);
        assert!(fit.quality.sse < 1e-18);
        assert!((fit.quality.r_squared.unwrap() - 1.0).abs() < 1e-12);

        let input = ScenarioInput::new(7, 1.3).unwrap();
        assert!((predict(&fit.model, input) - 14.0).abs() < 1e-9);
    }

    #[test]
    fn matches_hand_computed_coefficients() {
        // waste = 0.5 + 1.0*occupants + 2.0*consumption exactly.
        let ds = table(&[
            (1, 1.0, 3.5),
            (2, 1.0, 4.5),
            (1, 2.0, 5.5),
            (3, 0.5, 4.5),
            (5, 2.5, 10.5),
        ]);
        let fit = fit_dataset(&ds).unwrap();
        assert!((fit.model.intercept - 0.5).abs() < 1e-9);
        assert!((fit.model.occupants_coef - 1.0).abs() < 1e-9);
        assert!((fit.model.consumption_coef - 2.0).abs() < 1e-9);
    }

    #[test]
    fn prediction_is_linear_in_inputs() {
        let model = LinearModel {
            intercept: 0.25,
            occupants_coef: 0.75,
            consumption_coef: -0.5,
        };
        let input = ScenarioInput::new(4, 2.0).unwrap();
        assert!((predict(&model, input) - (0.25 + 3.0 - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn refit_is_deterministic() {
        let ds = generate_synthetic(42, 100).unwrap();
        let a = fit_dataset(&ds).unwrap();
        let b = fit_dataset(&ds).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn synthetic_fit_predicts_positive_waste() {
        let ds = generate_synthetic(42, 100).unwrap();
        let fit = fit_dataset(&ds).unwrap();
        let y = predict(&fit.model, ScenarioInput::default());
        assert!(y.is_finite() && y > 0.0, "prediction {y}");
        // Waste grows with household size in the simulated data.
        assert!(fit.model.occupants_coef > 0.0);
    }

    #[test]
    fn constant_target_has_no_r_squared() {
        let ds = table(&[(1, 1.0, 2.0), (2, 2.0, 2.0), (3, 1.5, 2.0)]);
        let fit = fit_dataset(&ds).unwrap();
        assert_eq!(fit.quality.r_squared, None);
        assert!((fit.model.eval(5.0, 1.0) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn constant_feature_gets_zero_slope_and_intercept_keeps_level() {
        // waste = 1 + 2 * occupants, consumption never varies.
        let ds = table(&[(1, 1.0, 3.0), (2, 1.0, 5.0), (3, 1.0, 7.0), (4, 1.0, 9.0)]);
        let fit = fit_dataset(&ds).unwrap();

        assert!((fit.model.intercept - 1.0).abs() < 1e-9, "{:?}", fit.model);
        assert!((fit.model.occupants_coef - 2.0).abs() < 1e-9);
        assert!(fit.model.consumption_coef.abs() < 1e-9);

        // Off-sample consumption must not move the prediction.
        let input = ScenarioInput::new(3, 2.0).unwrap();
        let y = predict(&fit.model, input);
        assert!((y - 7.0).abs() < 1e-9, "got {y}");
    }

    #[test]
    fn single_row_predicts_its_own_waste() {
        let ds = table(&[(2, 1.5, 1.2)]);
        let fit = fit_dataset(&ds).unwrap();
        assert!((fit.model.eval(9.0, 0.3) - 1.2).abs() < 1e-12);
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let ds = table(&[]);
        assert!(fit_dataset(&ds).is_err());
    }
}
