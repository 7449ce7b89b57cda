//! Plotters drawing of the waste chart, generic over the backend.
//!
//! The same routine feeds the SVG export and the terminal widget; only the
//! palette and the point marker differ between the two.

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::plot::ChartSeries;

pub const X_DESC: &str = "Jumlah Penghuni";
pub const Y_DESC: &str = "Sampah (kg/hari)";

/// How training rows are marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Single pixel; the only marker that renders cleanly into a terminal buffer.
    Pixel,
    /// Filled circle of the given radius.
    Circle(u32),
}

#[derive(Debug, Clone, Copy)]
pub struct ChartStyle {
    pub foreground: RGBColor,
    pub points: RGBColor,
    pub line: RGBColor,
    pub marker: Marker,
    pub font_size: u32,
    pub margin: u32,
    pub left_label_area: u32,
    pub bottom_label_area: u32,
    pub legend: bool,
}

impl ChartStyle {
    /// Dark-background style for the terminal.
    pub fn terminal() -> Self {
        Self {
            foreground: WHITE,
            points: RGBColor(0, 255, 255),
            line: RGBColor(255, 0, 0),
            marker: Marker::Pixel,
            font_size: 10,
            margin: 1,
            left_label_area: 6,
            bottom_label_area: 3,
            legend: false,
        }
    }

    /// Print style for image exports.
    pub fn document() -> Self {
        Self {
            foreground: BLACK,
            points: RGBColor(31, 119, 180),
            line: RGBColor(214, 39, 40),
            marker: Marker::Circle(3),
            font_size: 14,
            margin: 10,
            left_label_area: 50,
            bottom_label_area: 40,
            legend: true,
        }
    }
}

/// Legend text for the regression line.
pub fn line_label(consumption: f64) -> String {
    format!("Regresi (konsumsi={consumption} kg)")
}

/// Draw axes, the scatter of training rows and the regression line.
pub fn draw_waste_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &ChartSeries,
    style: &ChartStyle,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let [x0, x1] = series.x_bounds;
    let [y0, y1] = series.y_bounds;

    let mut chart = ChartBuilder::on(root)
        .margin(style.margin)
        .set_label_area_size(LabelAreaPosition::Left, style.left_label_area)
        .set_label_area_size(LabelAreaPosition::Bottom, style.bottom_label_area)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc(X_DESC)
        .y_desc(Y_DESC)
        .x_labels(10)
        .y_labels(5)
        .x_label_formatter(&|v| format!("{v:.0}"))
        .y_label_formatter(&|v| format!("{v:.1}"))
        .label_style(("sans-serif", style.font_size).into_font().color(&style.foreground))
        .axis_style(&style.foreground)
        .bold_line_style(&style.foreground)
        .draw()?;

    let points_color = style.points;
    let scatter = match style.marker {
        Marker::Pixel => chart.draw_series(
            series
                .points
                .iter()
                .map(|&(x, y)| Pixel::new((x, y), points_color)),
        )?,
        Marker::Circle(r) => chart.draw_series(
            series
                .points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), r, points_color.mix(0.6).filled())),
        )?,
    };
    scatter
        .label("Data Latih")
        .legend(move |(x, y)| Circle::new((x, y), 3, points_color.filled()));

    let line_color = style.line;
    chart
        .draw_series(LineSeries::new(series.line.iter().copied(), line_color.stroke_width(2)))?
        .label(line_label(series.consumption))
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_color));

    if style.legend {
        chart
            .configure_series_labels()
            .label_font(("sans-serif", style.font_size).into_font().color(&style.foreground))
            .background_style(WHITE.mix(0.8))
            .border_style(&style.foreground)
            .draw()?;
    }

    Ok(())
}
