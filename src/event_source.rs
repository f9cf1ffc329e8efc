//! Input event sources, real and simulated

use std::time::Duration;

use anyhow::Result;
pub use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

/// Abstraction over where key events come from, so the viewer loop can be
/// driven by a script in tests.
pub trait EventSource {
    /// Poll for events with a timeout.
    fn poll(&mut self, timeout: Duration) -> Result<bool>;

    /// Read the next event.
    fn read(&mut self) -> Result<Event>;
}

/// Live keyboard input via crossterm.
pub struct KeyboardEventSource;

impl EventSource for KeyboardEventSource {
    fn poll(&mut self, timeout: Duration) -> Result<bool> {
        Ok(crossterm::event::poll(timeout)?)
    }

    fn read(&mut self) -> Result<Event> {
        Ok(crossterm::event::read()?)
    }
}

/// Scripted event source for tests. Once the script runs out it reports
/// a quit key, so a driven loop always terminates.
pub struct SimulatedEventSource {
    events: Vec<Event>,
    next: usize,
}

impl SimulatedEventSource {
    #[must_use]
    pub fn new(events: Vec<Event>) -> Self {
        Self { events, next: 0 }
    }

    /// A plain character key press.
    #[must_use]
    pub fn char_key(c: char) -> Event {
        Event::Key(KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::empty(),
            kind: crossterm::event::KeyEventKind::Press,
            state: crossterm::event::KeyEventState::empty(),
        })
    }

    /// A non-character key press (Enter, Esc, PageDown, ...).
    #[must_use]
    pub fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: crossterm::event::KeyEventKind::Press,
            state: crossterm::event::KeyEventState::empty(),
        })
    }
}

impl EventSource for SimulatedEventSource {
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        Ok(true)
    }

    fn read(&mut self) -> Result<Event> {
        match self.events.get(self.next) {
            Some(event) => {
                self.next += 1;
                Ok(event.clone())
            }
            None => Ok(Self::char_key('q')),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_events_replay_in_order_then_quit() {
        let mut source = SimulatedEventSource::new(vec![
            SimulatedEventSource::char_key('n'),
            SimulatedEventSource::key(KeyCode::PageUp),
        ]);

        assert!(source.poll(Duration::from_millis(0)).unwrap());

        let Event::Key(key) = source.read().unwrap() else {
            panic!("expected key event");
        };
        assert_eq!(key.code, KeyCode::Char('n'));

        let Event::Key(key) = source.read().unwrap() else {
            panic!("expected key event");
        };
        assert_eq!(key.code, KeyCode::PageUp);

        // Script exhausted: a quit key keeps a driven loop finite.
        let Event::Key(key) = source.read().unwrap() else {
            panic!("expected key event");
        };
        assert_eq!(key.code, KeyCode::Char('q'));
    }
}
