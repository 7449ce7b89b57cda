//! Ratatui-based interactive page.
//!
//! The page mirrors a single-screen form: data preview, two numeric inputs and
//! a "predict now" action that reveals the prediction, the chart and the model
//! explanation. Every key press re-runs `app::pipeline::compute` on the
//! current session.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table, Wrap},
};

use crate::app::pipeline::{PageView, Session, compute};
use crate::error::AppError;
use crate::plot::{X_DESC, Y_DESC, line_label};
use crate::report::{
    Banner, BannerLevel, MODEL_EXPLANATION, PAGE_SUBTITLE, PAGE_TITLE, error_banner, model_summary,
    prediction_text, source_banner,
};

mod plotters_chart;

use plotters_chart::WastePlottersChart;

const FIELD_OCCUPANTS: usize = 0;
const FIELD_CONSUMPTION: usize = 1;
const FIELD_COUNT: usize = 2;

/// Start the interactive page.
pub fn run(session: Session) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::io(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(session);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::io(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::io(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    session: Session,
    selected_field: usize,
    show_explanation: bool,
    status: String,
    page: Result<PageView, AppError>,
}

impl App {
    fn new(session: Session) -> Self {
        let page = compute(&session);
        Self {
            session,
            selected_field: FIELD_OCCUPANTS,
            show_explanation: false,
            status: "Enter untuk prediksi.".to_string(),
            page,
        }
    }

    /// Re-run the whole page for the current session.
    fn rerun(&mut self) {
        self.page = compute(&self.session);
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::io(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::io(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::io(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.selected_field = self.selected_field.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_field + 1 < FIELD_COUNT {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Enter | KeyCode::Char('p') => {
                self.session.predict_requested = true;
                self.rerun();
                self.status = match &self.page {
                    Ok(_) => "Prediksi diperbarui.".to_string(),
                    Err(_) => "Prediksi dihentikan: data gagal dimuat.".to_string(),
                };
            }
            KeyCode::Char('e') => {
                self.show_explanation = !self.show_explanation;
            }
            _ => {}
        }
        false
    }

    /// Changing an input re-runs the page with the action cleared, as a fresh
    /// form submission would.
    fn adjust_field(&mut self, delta: i32) {
        match self.selected_field {
            FIELD_OCCUPANTS => {
                self.session.input.step_occupants(delta);
                self.status = format!("penghuni: {}", self.session.input.occupants);
            }
            FIELD_CONSUMPTION => {
                self.session.input.step_consumption(delta);
                self.status = format!("konsumsi: {:.1} kg", self.session.input.consumption);
            }
            _ => return,
        }
        self.session.predict_requested = false;
        self.rerun();
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);

        match &self.page {
            Ok(page) => {
                draw_banner(frame, chunks[1], &source_banner(&page.dataset.source));
                self.draw_body(frame, chunks[2], page);
            }
            Err(err) => {
                // A failed data source halts the page: banner only.
                draw_banner(frame, chunks[1], &error_banner(err));
            }
        }

        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                PAGE_TITLE,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(PAGE_SUBTITLE, Style::default().fg(Color::Gray))),
        ];
        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect, page: &PageView) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(60), Constraint::Min(0)])
            .split(area);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(4), Constraint::Length(4)])
            .split(columns[0]);

        draw_preview(frame, left[0], page);
        self.draw_inputs(frame, left[1]);
        draw_prediction(frame, left[2], page);

        if self.show_explanation {
            let right = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(columns[1]);
            draw_chart(frame, right[0], page);
            draw_explanation(frame, right[1], page);
        } else {
            draw_chart(frame, columns[1], page);
        }
    }

    fn draw_inputs(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items = vec![
            ListItem::new(format!("Jumlah Penghuni Rumah: {}", self.session.input.occupants)),
            ListItem::new(format!(
                "Konsumsi Makanan per Orang (kg/hari): {:.2}",
                self.session.input.consumption
            )),
        ];

        let list = List::new(items)
            .block(Block::default().title("Input Prediksi").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ pilih  ←/→ ubah  Enter prediksi  e penjelasan  q keluar";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn banner_color(level: BannerLevel) -> Color {
    match level {
        BannerLevel::Success => Color::Green,
        BannerLevel::Info => Color::Blue,
        BannerLevel::Error => Color::Red,
    }
}

fn draw_banner(frame: &mut ratatui::Frame<'_>, area: Rect, banner: &Banner) {
    let p = Paragraph::new(banner.text.as_str())
        .style(Style::default().fg(banner_color(banner.level)))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(p, area);
}

fn draw_preview(frame: &mut ratatui::Frame<'_>, area: Rect, page: &PageView) {
    let header = Row::new(vec![
        Cell::from(""),
        Cell::from("Penghuni"),
        Cell::from("Konsumsi (kg)"),
        Cell::from("Sampah (kg)"),
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows = page.preview().iter().enumerate().map(|(i, r)| {
        Row::new(vec![
            Cell::from(i.to_string()),
            Cell::from(r.occupants.to_string()),
            Cell::from(format!("{:.4}", r.consumption)),
            Cell::from(format!("{:.4}", r.waste)),
        ])
    });

    let title = format!(
        "Data Latih ({} dari {} baris)",
        page.preview().len(),
        page.dataset.len()
    );
    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Length(10),
            Constraint::Length(14),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(Block::default().title(title).borders(Borders::ALL));

    frame.render_widget(table, area);
}

fn draw_prediction(frame: &mut ratatui::Frame<'_>, area: Rect, page: &PageView) {
    let mut lines = Vec::new();
    match &page.prediction {
        Some(p) => lines.push(Line::from(Span::styled(
            prediction_text(p.waste),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ))),
        None => lines.push(Line::from(Span::styled(
            "Tekan Enter untuk Prediksi Sekarang.",
            Style::default().fg(Color::Gray),
        ))),
    }
    lines.push(Line::from(Span::styled(
        model_summary(&page.fit),
        Style::default().fg(Color::Gray),
    )));

    let p = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Hasil").borders(Borders::ALL));
    frame.render_widget(p, area);
}

fn draw_chart(frame: &mut ratatui::Frame<'_>, area: Rect, page: &PageView) {
    let title = match &page.prediction {
        Some(p) => format!("{X_DESC} vs {Y_DESC} | {}", line_label(p.input.consumption)),
        None => "Visualisasi".to_string(),
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Clear, inner);

    let Some(prediction) = &page.prediction else {
        let msg = Paragraph::new("Grafik muncul setelah prediksi.")
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(msg, inner);
        return;
    };

    frame.render_widget(WastePlottersChart { series: &prediction.chart }, inner);
}

fn draw_explanation(frame: &mut ratatui::Frame<'_>, area: Rect, page: &PageView) {
    let body = if page.prediction.is_some() {
        MODEL_EXPLANATION
    } else {
        "Penjelasan model muncul setelah prediksi."
    };
    let p = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .block(Block::default().title("Penjelasan Model Prediksi").borders(Borders::ALL));
    frame.render_widget(p, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn adjusting_input_clears_prediction() {
        let mut app = App::new(Session::default());
        app.handle_key(KeyCode::Enter);
        assert!(app.page.as_ref().unwrap().prediction.is_some());

        app.handle_key(KeyCode::Right);
        assert_eq!(app.session.input.occupants, 4);
        assert!(app.page.as_ref().unwrap().prediction.is_none());

        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Left);
        assert!((app.session.input.consumption - 1.4).abs() < 1e-12);
    }

    #[test]
    fn quit_keys() {
        let mut app = App::new(Session::default());
        assert!(!app.handle_key(KeyCode::Char('e')));
        assert!(app.show_explanation);
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn draws_preview_and_banner() {
        let app = App::new(Session::default());
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Menggunakan dataset bawaan"));
        assert!(text.contains("Data Latih (20 dari 100 baris)"));
    }

    #[test]
    fn failed_upload_shows_only_error_banner() {
        let session = Session {
            data: crate::app::pipeline::DataInput::Upload {
                name: "blob.bin".to_string(),
                bytes: vec![0xff, 0xfe, 0x00],
            },
            ..Session::default()
        };
        let app = App::new(session);
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Gagal membaca file"));
        assert!(!text.contains("Data Latih"));
    }
}
