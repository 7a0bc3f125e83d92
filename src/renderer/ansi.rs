//! The escape sequences the surface emits.
//!
//! Only what a widget paint needs: absolute cursor moves, cursor save/restore
//! and visibility, full-screen clear and foreground colour.

use std::io::Write;

use crate::types::Color;

/// Move cursor to absolute position (0-based in, 1-based on the wire).
#[inline]
pub fn cursor_to<W: Write>(w: &mut W, x: u16, y: u16) -> std::io::Result<()> {
    write!(w, "\x1b[{};{}H", y as u32 + 1, x as u32 + 1)
}

/// Save cursor position (DEC).
#[inline]
pub fn cursor_save<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b7")
}

/// Restore cursor position (DEC).
#[inline]
pub fn cursor_restore<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b8")
}

#[inline]
pub fn cursor_hide<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?25l")
}

#[inline]
pub fn cursor_show<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?25h")
}

/// Clear the whole screen. Cursor position is left alone.
#[inline]
pub fn clear_screen<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[2J")
}

/// Set foreground color.
#[inline]
pub fn fg<W: Write>(w: &mut W, color: Color) -> std::io::Result<()> {
    match color {
        Color::TerminalDefault => write!(w, "\x1b[39m"),
        // Standard colors: 30-37
        Color::Ansi(index) if index < 8 => write!(w, "\x1b[{}m", 30 + index),
        // Bright colors: 90-97
        Color::Ansi(index) if index < 16 => write!(w, "\x1b[{}m", 90 + index - 8),
        Color::Ansi(index) => write!(w, "\x1b[38;5;{}m", index),
        Color::Rgb(r, g, b) => write!(w, "\x1b[38;2;{};{};{}m", r, g, b),
    }
}
