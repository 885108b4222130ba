//! Ratatui-based terminal UI.
//!
//! The TUI mirrors the dashboard page: a title, two selectors (report mode and
//! year), and an output region holding a 2x2 grid of charts. All state lives in
//! [`ViewController`]; this module only maps keys to transitions and draws.

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
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tracing::{info, warn};

use crate::domain::{Table, YEAR_MAX, YEAR_MIN};
use crate::error::{AppError, SelectionError};
use crate::view::{ViewController, ViewOutput};

mod plotters_chart;

use plotters_chart::ChartWidget;

const TITLE: &str = "Automobile Sales Statistics Dashboard";
const TITLE_COLOR: Color = Color::Rgb(0x50, 0x3D, 0x36);

/// Start the TUI over an already loaded table.
pub fn run(table: &Table) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    info!(rows = table.len(), "starting dashboard");
    let mut app = App::new(table);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Mode,
    Year,
}

impl Field {
    fn index(self) -> usize {
        match self {
            Field::Mode => 0,
            Field::Year => 1,
        }
    }

    fn toggle(self) -> Self {
        match self {
            Field::Mode => Field::Year,
            Field::Year => Field::Mode,
        }
    }
}

struct App<'t> {
    view: ViewController<'t>,
    focus: Field,
    status: String,
}

impl<'t> App<'t> {
    fn new(table: &'t Table) -> Self {
        Self {
            view: ViewController::new(table),
            focus: Field::Mode,
            status: format!("Loaded {} rows.", table.len()),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100)).map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
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

    /// Apply one key press. Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::Down | KeyCode::Tab | KeyCode::BackTab => {
                self.focus = self.focus.toggle();
            }
            KeyCode::Left => self.adjust(-1),
            KeyCode::Right => self.adjust(1),
            KeyCode::PageUp => self.adjust(10),
            KeyCode::PageDown => self.adjust(-10),
            KeyCode::Backspace | KeyCode::Delete if self.focus == Field::Year => {
                if self.year_locked() {
                    return false;
                }
                let result = self.view.set_year(None).map(|_| ());
                self.apply(result, "Year cleared.");
            }
            _ => {}
        }
        false
    }

    fn adjust(&mut self, delta: i32) {
        match self.focus {
            Field::Mode => {
                let mode = self.view.state().mode.next();
                self.view.set_mode(mode);
                self.status = format!("Report: {}", mode.display_name());
            }
            Field::Year => {
                if self.year_locked() {
                    return;
                }
                let next = match self.view.state().year {
                    Some(year) => year + delta,
                    None if delta > 0 => YEAR_MIN,
                    None => YEAR_MAX,
                };
                let result = self.view.set_year(Some(next)).map(|_| ());
                self.apply(result, &format!("Year: {next}"));
            }
        }
    }

    fn year_locked(&mut self) -> bool {
        if self.view.year_selector_enabled() {
            return false;
        }
        self.status = "The year selector only applies to the yearly report.".to_string();
        true
    }

    /// Invalid selections are logged and ignored; the previous view stays up.
    fn apply(&mut self, result: Result<(), SelectionError>, ok: &str) {
        match result {
            Ok(()) => self.status = ok.to_string(),
            Err(err) => {
                warn!(error = %err, "selection ignored");
                self.status = err.to_string();
            }
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(frame.area());

        self.draw_header(frame, chunks[0]);
        self.draw_selectors(frame, chunks[1]);
        self.draw_output(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let title = Paragraph::new(Line::from(Span::styled(
            TITLE,
            Style::default().fg(TITLE_COLOR).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, area);
    }

    fn draw_selectors(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let state = self.view.state();

        let mode = ListItem::new(format!("Report: {}", state.mode.display_name()));
        let year = if !self.view.year_selector_enabled() {
            let label = state.year.map_or_else(|| "-".to_string(), |y| y.to_string());
            ListItem::new(format!("Year:   {label} (disabled)")).style(Style::default().fg(Color::DarkGray))
        } else if let Some(y) = state.year {
            ListItem::new(format!("Year:   {y}"))
        } else {
            ListItem::new(Line::from(vec![
                Span::raw("Year:   "),
                Span::styled(
                    format!("Select-year ({YEAR_MIN})"),
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
                ),
            ]))
        };

        let list = List::new([mode, year])
            .block(Block::default().title("Selections").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut list_state = ListState::default();
        list_state.select(Some(self.focus.index()));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn draw_output(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = match self.view.output() {
            ViewOutput::Empty => {
                let msg = Paragraph::new("Select a year to see the yearly report.")
                    .style(Style::default().fg(Color::Yellow))
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL));
                frame.render_widget(msg, area);
                return;
            }
            ViewOutput::Charts { rows } => rows,
        };

        let grid = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        for (row, row_area) in rows.iter().zip(grid.iter()) {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(*row_area);
            for (slot, cell) in row.iter().zip(cells.iter()) {
                frame.render_widget(ChartWidget { slot }, *cell);
            }
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ change  PgUp/PgDn ±10y  Backspace clear year  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}
