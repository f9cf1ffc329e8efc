//! Terminal presentation layer
//!
//! Key decoding, the status line, inline prompts for go-to-page and split
//! names, and bitmap display via viuer. Everything stateful lives in
//! [`Session`]; this module only draws.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{Event, KeyCode, KeyEventKind};
use crossterm::{
    cursor, execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType},
};

use crate::event_source::EventSource;
use crate::render::{Command, ZoomMode};
use crate::session::{Session, SessionUpdate};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Run the interaction loop until the user quits.
///
/// One event is processed completely (state transition, optional render,
/// display update) before the next one is read.
pub fn run(session: &mut Session, events: &mut impl EventSource) -> Result<()> {
    let mut screen = Screen::enter()?;

    let updates = session.initial_view();
    screen.show(session, updates)?;

    loop {
        if !events.poll(POLL_INTERVAL)? {
            continue;
        }

        let Event::Key(key) = events.read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let cmd = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => break,

            KeyCode::Char('n') | KeyCode::Char(' ') | KeyCode::PageDown | KeyCode::Right => {
                Command::NextPage
            }
            KeyCode::Char('p') | KeyCode::PageUp | KeyCode::Left => Command::PrevPage,

            KeyCode::Char('1') => Command::Zoom(ZoomMode::TopLeft),
            KeyCode::Char('2') => Command::Zoom(ZoomMode::TopRight),
            KeyCode::Char('3') => Command::Zoom(ZoomMode::BottomLeft),
            KeyCode::Char('4') => Command::Zoom(ZoomMode::BottomRight),
            KeyCode::Char('0') => Command::Zoom(ZoomMode::Full),

            KeyCode::Char('g') => match screen.prompt(events, "go to page: ")? {
                Some(text) => Command::GotoPage(text),
                None => continue,
            },

            KeyCode::Char('s') => match screen.prompt(events, "split page into (name): ")? {
                Some(name) if !name.trim().is_empty() => Command::Split { name },
                _ => continue,
            },

            _ => continue,
        };

        let updates = session.handle(cmd);
        screen.show(session, updates)?;
    }

    Ok(())
}

/// Raw-mode alternate screen, restored on drop.
struct Screen {
    _private: (),
}

impl Screen {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            Clear(ClearType::All)
        )?;
        Ok(Self { _private: () })
    }

    fn show(&mut self, session: &Session, updates: Vec<SessionUpdate>) -> Result<()> {
        for update in updates {
            match update {
                SessionUpdate::Bitmap { png, .. } => self.draw_page(session, &png)?,
                SessionUpdate::PageField { .. } => self.draw_status(session, None)?,
                SessionUpdate::SplitDone { destination } => {
                    self.draw_status(session, Some(&format!("wrote {}", destination.display())))?;
                }
                SessionUpdate::Failed { message } => self.draw_status(session, Some(&message))?,
            }
        }
        io::stdout().flush()?;
        Ok(())
    }

    fn draw_page(&mut self, session: &Session, png: &[u8]) -> Result<()> {
        let mut stdout = io::stdout();
        queue!(stdout, Clear(ClearType::All))?;
        self.draw_status(session, None)?;
        stdout.flush()?;

        let img = image::load_from_memory(png).context("decoding rendered page")?;
        let (cols, rows) = terminal::size()?;
        let config = viuer::Config {
            x: 0,
            y: 2,
            width: Some(u32::from(cols)),
            height: Some(u32::from(rows.saturating_sub(3))),
            absolute_offset: true,
            ..Default::default()
        };
        viuer::print(&img, &config).map_err(|e| anyhow::anyhow!("terminal image display: {e}"))?;

        Ok(())
    }

    fn draw_status(&mut self, session: &Session, notice: Option<&str>) -> Result<()> {
        let mut stdout = io::stdout();

        let zoom = session
            .zoom()
            .label()
            .map(|label| format!("  [zoom: {label}]"))
            .unwrap_or_default();
        let title = session
            .title()
            .map(|t| format!("{t} - "))
            .unwrap_or_default();
        let status = format!(
            "{title}page {} of {}{zoom}  (n/p page, g goto, 1-4 zoom, s split, q quit)",
            session.current_page() + 1,
            session.page_count(),
        );
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            Clear(ClearType::CurrentLine),
            Print(status)
        )?;

        let (_, rows) = terminal::size()?;
        queue!(
            stdout,
            cursor::MoveTo(0, rows.saturating_sub(1)),
            Clear(ClearType::CurrentLine)
        )?;
        if let Some(notice) = notice {
            queue!(stdout, Print(notice))?;
        }

        Ok(())
    }

    /// Inline line editor on the bottom row. Enter confirms, Esc cancels.
    fn prompt(&mut self, events: &mut impl EventSource, label: &str) -> Result<Option<String>> {
        let mut input = String::new();

        loop {
            let (_, rows) = terminal::size()?;
            execute!(
                io::stdout(),
                cursor::MoveTo(0, rows.saturating_sub(1)),
                Clear(ClearType::CurrentLine),
                Print(format!("{label}{input}"))
            )?;

            if !events.poll(POLL_INTERVAL)? {
                continue;
            }
            let Event::Key(key) = events.read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match key.code {
                KeyCode::Enter => {
                    self.clear_bottom_line()?;
                    return Ok(Some(input));
                }
                KeyCode::Esc => {
                    self.clear_bottom_line()?;
                    return Ok(None);
                }
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Char(c) => input.push(c),
                _ => {}
            }
        }
    }

    fn clear_bottom_line(&mut self) -> Result<()> {
        let (_, rows) = terminal::size()?;
        execute!(
            io::stdout(),
            cursor::MoveTo(0, rows.saturating_sub(1)),
            Clear(ClearType::CurrentLine)
        )?;
        Ok(())
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
