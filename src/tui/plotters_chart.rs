//! Plotters-powered waste chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`,
//! sharing the drawing routine with the SVG export.

use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::plot::{ChartSeries, ChartStyle, draw_waste_chart};

/// Render-only chart: all series and bounds are computed before `render()`.
pub struct WastePlottersChart<'a> {
    pub series: &'a ChartSeries,
}

impl<'a> Widget for WastePlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to lay out a chart in a tiny area; show a hint instead.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.series.x_bounds;
        let [y0, y1] = self.series.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let series = self.series;
        let style = ChartStyle::terminal();
        let widget = widget_fn(move |root| {
            draw_waste_chart(&root, series, &style)?;
            Ok(())
        });

        widget.render(area, buf);
    }
}
