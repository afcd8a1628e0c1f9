//! Terminal User Interface management
//!
//! Handles terminal setup, teardown, and event polling.
//! Mouse capture is on so backdrop clicks and the wheel reach the app.

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseEventKind},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, Stdout},
    ops::{Deref, DerefMut},
    time::{Duration, Instant},
};

/// Terminal wrapper for managing the TUI lifecycle
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Interval between ticks
    pub tick_rate: Duration,
    last_tick: Instant,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            tick_rate: Duration::from_millis(100),
            last_tick: Instant::now(),
        })
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Enter the alternate screen, enable raw mode and mouse capture
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        crossterm::execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;
        self.terminal.clear()?;
        Ok(())
    }

    /// Restore the terminal. Also called on Drop.
    pub fn exit(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        crossterm::execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            cursor::Show
        )?;
        Ok(())
    }

    /// Poll for the next event
    ///
    /// Returns `None` once per tick interval, even while input keeps
    /// arriving, so toast timers and background requests keep moving.
    pub fn next_event(&mut self) -> Result<Option<Event>> {
        let timeout = time_until_tick(self.last_tick, self.tick_rate, Instant::now());
        if timeout.is_zero() || !event::poll(timeout)? {
            self.last_tick = Instant::now();
            return Ok(None);
        }

        let event = event::read()?;
        if is_ignored(&event) {
            return Ok(None);
        }
        Ok(Some(event))
    }

    /// Draw to the terminal using the provided closure
    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }
}

fn time_until_tick(last_tick: Instant, tick_rate: Duration, now: Instant) -> Duration {
    tick_rate.saturating_sub(now.saturating_duration_since(last_tick))
}

/// Key releases (Windows) and bare mouse motion carry nothing for the app
fn is_ignored(event: &Event) -> bool {
    match event {
        Event::Key(key) => key.kind != KeyEventKind::Press,
        Event::Mouse(mouse) => matches!(mouse.kind, MouseEventKind::Moved),
        _ => false,
    }
}

impl Deref for Tui {
    type Target = Terminal<CrosstermBackend<Stdout>>;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for Tui {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        // Best effort cleanup on drop
        let _ = self.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers, MouseEvent};

    #[test]
    fn test_time_until_tick() {
        let start = Instant::now();
        let rate = Duration::from_millis(100);
        assert_eq!(time_until_tick(start, rate, start), rate);
        assert_eq!(
            time_until_tick(start, rate, start + Duration::from_millis(40)),
            Duration::from_millis(60)
        );
        assert_eq!(
            time_until_tick(start, rate, start + Duration::from_millis(250)),
            Duration::ZERO
        );
    }

    #[test]
    fn test_ignored_events() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert!(is_ignored(&release));
        assert!(!is_ignored(&Event::Key(KeyEvent::new(
            KeyCode::Char('q'),
            KeyModifiers::NONE
        ))));

        let mouse = |kind| {
            Event::Mouse(MouseEvent {
                kind,
                column: 1,
                row: 1,
                modifiers: KeyModifiers::NONE,
            })
        };
        assert!(is_ignored(&mouse(MouseEventKind::Moved)));
        assert!(!is_ignored(&mouse(MouseEventKind::ScrollDown)));
        assert!(!is_ignored(&Event::Resize(80, 24)));
    }
}
