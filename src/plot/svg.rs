//! SVG export of the waste chart.

use std::path::Path;

use plotters::prelude::*;

use crate::error::AppError;
use crate::plot::{ChartSeries, ChartStyle, draw_waste_chart};

pub const DEFAULT_SVG_SIZE: (u32, u32) = (640, 480);

/// Write the chart to `path` as an SVG document.
pub fn write_chart_svg(path: &Path, series: &ChartSeries, size: (u32, u32)) -> Result<(), AppError> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| AppError::io(format!("Failed to draw chart background: {e}")))?;

    draw_waste_chart(&root, series, &ChartStyle::document())
        .map_err(|e| AppError::io(format!("Failed to draw chart: {e}")))?;

    root.present()
        .map_err(|e| AppError::io(format!("Failed to write chart SVG '{}': {e}", path.display())))?;

    tracing::info!(path = %path.display(), "wrote chart SVG");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generate_synthetic;
    use crate::models::fit_dataset;
    use crate::plot::build_chart_series;

    #[test]
    fn writes_svg_document() {
        let ds = generate_synthetic(42, 40).unwrap();
        let fit = fit_dataset(&ds).unwrap();
        let series = build_chart_series(&ds, &fit.model, 1.5);

        let path = std::env::temp_dir().join(format!("household-waste-{}-chart.svg", std::process::id()));
        write_chart_svg(&path, &series, DEFAULT_SVG_SIZE).unwrap();
        let body = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(body.contains("<svg"));
        assert!(body.contains("<circle"));
        assert!(body.contains("<polyline"));
    }
}
