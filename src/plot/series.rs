//! Chart data preparation shared by every chart renderer.
//!
//! All series and bounds are computed here, outside any draw call, so the
//! ASCII, SVG and terminal charts show exactly the same data.

use crate::domain::{Dataset, LINE_OCCUPANTS_MAX, LINE_OCCUPANTS_MIN, LinearModel};

/// Scatter of training rows plus the regression line at a fixed consumption.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    /// `(occupants, waste)` for every training row.
    pub points: Vec<(f64, f64)>,
    /// `(occupants, predicted waste)` for occupants 1..=10.
    pub line: Vec<(f64, f64)>,
    /// Consumption (kg/person/day) the line is evaluated at.
    pub consumption: f64,
    /// X bounds (occupants), covering both the line and the data.
    pub x_bounds: [f64; 2],
    /// Y bounds (kg/day), padded by 5% on each side.
    pub y_bounds: [f64; 2],
}

pub fn build_chart_series(dataset: &Dataset, model: &LinearModel, consumption: f64) -> ChartSeries {
    let points: Vec<(f64, f64)> = dataset
        .rows
        .iter()
        .map(|r| (f64::from(r.occupants), r.waste))
        .collect();

    let line: Vec<(f64, f64)> = (LINE_OCCUPANTS_MIN..=LINE_OCCUPANTS_MAX)
        .map(|n| {
            let x = f64::from(n);
            (x, model.eval(x, consumption))
        })
        .collect();

    let x_bounds = bounds(points.iter().chain(&line).map(|&(x, _)| x))
        .unwrap_or([f64::from(LINE_OCCUPANTS_MIN), f64::from(LINE_OCCUPANTS_MAX)]);

    let y_bounds = match bounds(points.iter().chain(&line).map(|&(_, y)| y)) {
        Some([lo, hi]) if hi > lo => pad_range(lo, hi, 0.05),
        Some([lo, _]) => [lo - 1.0, lo + 1.0],
        None => [0.0, 1.0],
    };

    ChartSeries {
        points,
        line,
        consumption,
        x_bounds,
        y_bounds,
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<[f64; 2]> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values.filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    (lo.is_finite() && hi.is_finite()).then_some([lo, hi])
}

fn pad_range(min: f64, max: f64, frac: f64) -> [f64; 2] {
    let pad = ((max - min).abs() * frac).max(1e-12);
    [min - pad, max + pad]
}
