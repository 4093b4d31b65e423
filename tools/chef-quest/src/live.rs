//! Interactive kiosk loop on a real terminal: raw mode, alternate screen and
//! mouse capture for the hero drift. The guard restores the terminal on every
//! exit path, including errors.

use crate::app::{AppSignal, QuestApp};
use crate::errors::QuestError;
use crate::runtime::ProcessRunner;
use crate::tui::draw_quest;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};

fn io_error(error: io::Error) -> QuestError {
    QuestError::Io(error.to_string())
}

struct TerminalGuard {
    mouse: bool,
}

impl TerminalGuard {
    fn enter(mouse: bool) -> Result<Self, QuestError> {
        enable_raw_mode().map_err(io_error)?;
        let guard = Self { mouse };
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(io_error)?;
        if mouse {
            execute!(stdout, EnableMouseCapture).map_err(io_error)?;
        }
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse {
            let _ = execute!(stdout, DisableMouseCapture);
        }
        let _ = execute!(stdout, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

pub fn run_interactive(
    app: &mut QuestApp,
    runner: &dyn ProcessRunner,
    mouse: bool,
) -> Result<(), QuestError> {
    let _guard = TerminalGuard::enter(mouse)?;
    let mut terminal: Terminal<CrosstermBackend<Stdout>> =
        Terminal::new(CrosstermBackend::new(io::stdout())).map_err(io_error)?;
    terminal.hide_cursor().map_err(io_error)?;

    let mut updates = app.controller.subscribe();
    let mut dirty = true;

    loop {
        if dirty || updates.has_changed().unwrap_or(false) {
            updates.mark_unchanged();
            let view = app.view();
            terminal
                .draw(|frame| draw_quest(frame, &view))
                .map_err(io_error)?;
            dirty = false;
        }

        match event::read().map_err(io_error)? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
                {
                    break;
                }
                let signal = match key.code {
                    KeyCode::Esc => AppSignal::Quit,
                    KeyCode::Char(ch) => {
                        let before = app.status().map(str::to_owned);
                        let signal = app.handle_key(ch, runner)?;
                        dirty |= app.status().map(str::to_owned) != before;
                        signal
                    }
                    _ => AppSignal::Continue,
                };
                if signal == AppSignal::Quit {
                    break;
                }
            }
            Event::Mouse(pointer) if pointer.kind == MouseEventKind::Moved => {
                let size = terminal.size().map_err(io_error)?;
                let before = app.offset().columns();
                app.on_pointer(
                    f32::from(pointer.column),
                    f32::from(pointer.row),
                    f32::from(size.width),
                    f32::from(size.height),
                );
                dirty |= app.offset().columns() != before;
            }
            Event::Resize(_, _) => dirty = true,
            _ => {}
        }
    }

    terminal.show_cursor().map_err(io_error)?;
    Ok(())
}
