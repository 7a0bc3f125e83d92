//! Terminal - raw-mode control behind a trait
//!
//! Widgets that need unbuffered keystrokes (the text area) go through
//! [`TerminalMode`] so the compositor can run against a real terminal or a
//! headless recorder in tests.

use std::io::{self, Write};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::{execute, terminal};

/// Terminal mode controller.
pub trait TerminalMode {
    fn is_raw(&self) -> io::Result<bool>;

    fn set_raw(&mut self, raw: bool) -> io::Result<()>;

    /// Start delivering keyboard and mouse input to the event loop.
    fn capture_input(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Undo [`capture_input`](Self::capture_input).
    fn release_input(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// =============================================================================
// Crossterm
// =============================================================================

/// The process terminal, driven through crossterm.
#[derive(Debug, Default)]
pub struct CrosstermTerminal {
    captured: bool,
    raw_before_capture: bool,
}

impl CrosstermTerminal {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TerminalMode for CrosstermTerminal {
    fn is_raw(&self) -> io::Result<bool> {
        terminal::is_raw_mode_enabled()
    }

    fn set_raw(&mut self, raw: bool) -> io::Result<()> {
        if raw {
            terminal::enable_raw_mode()
        } else {
            terminal::disable_raw_mode()
        }
    }

    fn capture_input(&mut self) -> io::Result<()> {
        if self.captured {
            return Ok(());
        }
        self.raw_before_capture = self.is_raw()?;
        if !self.raw_before_capture {
            terminal::enable_raw_mode()?;
        }
        execute!(io::stdout(), EnableMouseCapture)?;
        self.captured = true;
        Ok(())
    }

    fn release_input(&mut self) -> io::Result<()> {
        if !self.captured {
            return Ok(());
        }
        self.captured = false;
        let mut stdout = io::stdout();
        execute!(stdout, DisableMouseCapture)?;
        stdout.flush()?;
        if !self.raw_before_capture {
            terminal::disable_raw_mode()?;
        }
        Ok(())
    }
}

// =============================================================================
// Headless
// =============================================================================

/// In-memory terminal that records every raw-mode change.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HeadlessTerminal {
    raw: bool,
    captured: bool,
    transitions: Vec<bool>,
}

impl HeadlessTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start in raw mode, as if the host program had already enabled it.
    pub fn raw() -> Self {
        Self {
            raw: true,
            ..Self::default()
        }
    }

    /// Every `set_raw` argument, in call order.
    pub fn transitions(&self) -> &[bool] {
        &self.transitions
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }
}

impl TerminalMode for HeadlessTerminal {
    fn is_raw(&self) -> io::Result<bool> {
        Ok(self.raw)
    }

    fn set_raw(&mut self, raw: bool) -> io::Result<()> {
        self.raw = raw;
        self.transitions.push(raw);
        Ok(())
    }

    fn capture_input(&mut self) -> io::Result<()> {
        self.captured = true;
        Ok(())
    }

    fn release_input(&mut self) -> io::Result<()> {
        self.captured = false;
        Ok(())
    }
}
