//! crossterm/ratatui implementation of [`ConsoleTerminal`].
//!
//! Layout: the memory listing fills the left side, the CPU status panel
//! (when visible) takes a fixed percentage on the right, and the bottom row
//! is the input/error line.

use std::io::{self, Stdout};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame, Terminal,
};
use vizzium_core::Key;

use crate::console::ConsoleTerminal;
use crate::screen::Screen;

/// Full-screen terminal session. Raw mode and the alternate screen are
/// entered on construction and left again on drop.
pub struct CrosstermTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    status_width_percent: u16,
}

impl CrosstermTerminal {
    pub fn enter(status_width_percent: u16) -> io::Result<Self> {
        let mut terminal = setup_terminal()?;
        terminal.hide_cursor()?;
        terminal.clear()?;
        Ok(Self {
            terminal,
            status_width_percent,
        })
    }
}

impl Drop for CrosstermTerminal {
    fn drop(&mut self) {
        if let Err(e) = restore_terminal(&mut self.terminal) {
            tracing::error!(error = %e, "Failed to restore terminal");
        }
    }
}

/// Set up the terminal for TUI rendering.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

/// Restore the terminal to its original state.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Make sure a panic leaves the user's terminal usable.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Fail early when stdin or stdout is not a TTY.
pub fn require_tty() -> anyhow::Result<()> {
    use std::io::IsTerminal;
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        return Err(anyhow::anyhow!("The debugger console requires a terminal (TTY)."));
    }
    Ok(())
}

impl ConsoleTerminal for CrosstermTerminal {
    fn read_key(&mut self) -> io::Result<Key> {
        loop {
            match event::read()? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    return Ok(map_key(key_event));
                }
                Event::Resize(..) => return Ok(Key::Resize),
                _ => {}
            }
        }
    }

    fn size(&self) -> io::Result<(u16, u16)> {
        let size = self.terminal.size()?;
        Ok((size.width, size.height))
    }

    fn draw(&mut self, screen: &Screen) -> io::Result<()> {
        let status_width_percent = self.status_width_percent;
        self.terminal
            .draw(|frame| render(frame, screen, status_width_percent))?;
        Ok(())
    }
}

/// Translate a crossterm key event into a console key. Characters chorded
/// with Ctrl or Alt are not text and never reach hotkeys.
pub fn map_key(event: KeyEvent) -> Key {
    let chorded = event
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    match (event.code, event.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Key::Interrupt,
        (KeyCode::Char('h'), KeyModifiers::CONTROL) => Key::Backspace,
        (KeyCode::Char(_), _) if chorded => Key::Other,
        (KeyCode::Char(c), _) => Key::Char(c),
        (KeyCode::Enter, _) => Key::Enter,
        (KeyCode::Esc, _) => Key::Escape,
        (KeyCode::Backspace, _) => Key::Backspace,
        (KeyCode::Up, _) => Key::Up,
        (KeyCode::Down, _) => Key::Down,
        (KeyCode::Tab, _) => Key::Tab,
        _ => Key::Other,
    }
}

/// Draw `screen` into `frame`.
pub fn render(frame: &mut Frame, screen: &Screen, status_width_percent: u16) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());

    if screen.panels.status {
        let percent = status_width_percent.min(100);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(100 - percent),
                Constraint::Percentage(percent),
            ])
            .split(rows[0]);
        render_memory(frame, columns[0], screen);
        render_status(frame, columns[1], screen);
    } else {
        render_memory(frame, rows[0], screen);
    }

    render_input(frame, rows[1], screen);
}

fn render_memory(frame: &mut Frame, area: Rect, screen: &Screen) {
    let lines: Vec<Line> = screen
        .memory
        .iter()
        .map(|row| {
            let style = if row.current {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(Span::styled(row.to_string(), style))
        })
        .collect();

    let block = Block::default().padding(Padding::new(2, 0, 1, 0));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status(frame: &mut Frame, area: Rect, screen: &Screen) {
    let lines: Vec<Line> = screen
        .status_lines()
        .into_iter()
        .map(Line::from)
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" CPU ")
        .padding(Padding::horizontal(1));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_input(frame: &mut Frame, area: Rect, screen: &Screen) {
    let input = &screen.input;
    let style = if input.error().is_some() {
        Style::default().fg(Color::White).bg(Color::Red)
    } else {
        Style::default()
    };
    let line = Line::from(input.displayed());
    let column = u16::try_from(line.width()).unwrap_or(u16::MAX);
    frame.render_widget(Paragraph::new(line).style(style), area);

    if screen.cursor_visible && input.error().is_none() {
        let cursor_x = area.x + column.min(area.width.saturating_sub(1));
        frame.set_cursor_position((cursor_x, area.y));
    }
}
