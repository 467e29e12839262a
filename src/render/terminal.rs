use std::io::{self, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};

use crate::error::Result;
use crate::render::frame_loop::CloseSignal;

/// Raw mode on the alternate screen with the cursor hidden, restored on drop.
pub struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, Show, LeaveAlternateScreen);
        let _ = stdout.flush();
        let _ = disable_raw_mode();
    }
}

/// `q`, `Esc`, or `Ctrl+C`. Raw mode swallows the interrupt signal, so
/// `Ctrl+C` arrives as a key event.
pub fn is_close_event(ev: &Event) -> bool {
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => match code {
            KeyCode::Char('q') | KeyCode::Esc => true,
            KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
            _ => false,
        },
        _ => false,
    }
}

/// Drains pending terminal events without blocking.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalClose;

impl CloseSignal for TerminalClose {
    fn should_close(&self) -> Result<bool> {
        while event::poll(Duration::ZERO)? {
            if is_close_event(&event::read()?) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn close_keys() {
        assert!(is_close_event(&press(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_close_event(&press(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_close_event(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn other_input_keeps_running() {
        assert!(!is_close_event(&press(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_close_event(&press(KeyCode::Enter, KeyModifiers::NONE)));
        assert!(!is_close_event(&Event::Resize(80, 24)));

        let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert!(!is_close_event(&Event::Key(release)));
    }
}
