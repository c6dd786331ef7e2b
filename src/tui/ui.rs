use crate::rasterizer::CellGrid;
use crate::tui::sink::FrameSink;

use crossterm::{
    cursor::{Hide, Show},
    event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::{CrosstermBackend, Modifier, Style, Terminal},
    text::{Line, Span},
    widgets::Paragraph,
};
use std::io::{stdout, Result, Stdout};
use std::time::Duration;

/// Enum holding the possible things that will happen after a key press
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NextAction {
    Quit,
    Nothing,
}

/// Return the next action depending on the latest `KeyEvent`
pub fn next_action_from_key(key: KeyEvent) -> NextAction {
    if key.kind != KeyEventKind::Press {
        return NextAction::Nothing;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => NextAction::Quit,
        // Raw mode swallows the interrupt signal, so handle it as a key
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => NextAction::Quit,
        _ => NextAction::Nothing,
    }
}

/// Turn a grid into a widget, one span per cell
pub fn grid_to_widget(grid: &CellGrid, bold: bool) -> Paragraph<'static> {
    let lines: Vec<Line> = grid
        .rows()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|cell| {
                    let style = if bold && cell.highlighted {
                        Style::default().add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    Span::styled(cell.symbol.to_string(), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();
    Paragraph::new(lines)
}

/// Perform shutdown of terminal
pub fn shutdown() -> Result<()> {
    execute!(stdout(), Show, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

/// Start the terminal
pub fn startup() -> Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, Hide)?;
    Ok(())
}

/// Full-screen display through ratatui, quitting on `q`, `Esc` or `Ctrl-C`
pub struct TuiSink {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    bold: bool,
}

impl TuiSink {
    pub fn new(bold: bool) -> Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        Ok(Self { terminal, bold })
    }
}

impl FrameSink for TuiSink {
    fn begin(&mut self) -> Result<()> {
        startup()?;
        self.terminal.clear()
    }

    fn present(&mut self, grid: &CellGrid) -> Result<()> {
        let widget = grid_to_widget(grid, self.bold);
        self.terminal
            .draw(|frame| frame.render_widget(widget, frame.size()))?;
        Ok(())
    }

    fn poll_quit(&mut self) -> Result<bool> {
        let mut quit = false;
        // Drain everything queued since the last frame
        while event::poll(Duration::ZERO)? {
            if let event::Event::Key(key) = event::read()? {
                quit |= next_action_from_key(key) == NextAction::Quit;
            }
        }
        Ok(quit)
    }

    fn finish(&mut self) -> Result<()> {
        shutdown()
    }
}
