//! Render surface: buffered output with a shared colour cache.
//!
//! Every widget paints through one `Surface`. It accumulates bytes in call
//! order and remembers the last foreground colour it emitted, so a run of
//! same-coloured writes costs exactly one colour sequence no matter how many
//! widgets contribute to it.

use std::borrow::Cow;
use std::io::{self, Write};

use super::ansi;
use crate::types::{Color, Position};

/// Buffered terminal output that elides redundant colour changes.
#[derive(Debug)]
pub struct Surface {
    data: Vec<u8>,
    last_color: Option<Color>,
    cursor_visible: Option<bool>,
    color_writes: usize,
}

impl Surface {
    /// Create a surface with default capacity.
    pub fn new() -> Self {
        Self::with_capacity(16384) // 16KB default
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            last_color: None,
            cursor_visible: None,
            color_writes: 0,
        }
    }

    // =========================================================================
    // Colour
    // =========================================================================

    /// Switch the foreground colour. No-op when `color` is already current.
    ///
    /// Returns true if a colour sequence was emitted.
    pub fn set_color(&mut self, color: Color) -> bool {
        if self.last_color == Some(color) {
            tracing::trace!(?color, "colour write elided");
            return false;
        }
        ansi::fg(&mut self.data, color).ok();
        self.last_color = Some(color);
        self.color_writes += 1;
        true
    }

    /// The colour the sink last received, if any.
    pub fn last_color(&self) -> Option<Color> {
        self.last_color
    }

    /// Number of colour sequences emitted so far.
    pub fn color_writes(&self) -> usize {
        self.color_writes
    }

    // =========================================================================
    // Cursor
    // =========================================================================

    pub fn move_cursor(&mut self, position: Position) {
        ansi::cursor_to(&mut self.data, position.x, position.y).ok();
    }

    pub fn save_cursor_position(&mut self) {
        ansi::cursor_save(&mut self.data).ok();
    }

    pub fn restore_cursor_position(&mut self) {
        ansi::cursor_restore(&mut self.data).ok();
    }

    pub fn show_cursor(&mut self) {
        ansi::cursor_show(&mut self.data).ok();
        self.cursor_visible = Some(true);
    }

    pub fn hide_cursor(&mut self) {
        ansi::cursor_hide(&mut self.data).ok();
        self.cursor_visible = Some(false);
    }

    /// Last visibility set through this surface (`None` before the first call).
    pub fn cursor_visible(&self) -> Option<bool> {
        self.cursor_visible
    }

    // =========================================================================
    // Content
    // =========================================================================

    /// Clear the whole screen.
    pub fn clear(&mut self) {
        ansi::clear_screen(&mut self.data).ok();
    }

    /// Write literal text at the cursor.
    #[inline]
    pub fn write(&mut self, text: &str) {
        self.data.extend_from_slice(text.as_bytes());
    }

    #[inline]
    pub fn write_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.data.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    }

    // =========================================================================
    // Buffer access
    // =========================================================================

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Pending output as a string (lossy).
    pub fn output(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }

    /// Drop pending output without sending it.
    ///
    /// The dropped bytes may hold the only copy of the current colour and
    /// cursor visibility, so both caches are forgotten.
    pub fn discard(&mut self) {
        self.data.clear();
        self.last_color = None;
        self.cursor_visible = None;
    }

    /// Flush pending output to stdout (blocking).
    pub fn flush_stdout(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        self.flush_to(&mut stdout)?;
        stdout.flush()
    }

    /// Flush pending output to a writer.
    pub fn flush_to<W: Write>(&mut self, writer: &mut W) -> io::Result<()> {
        if self.data.is_empty() {
            return Ok(());
        }
        writer.write_all(&self.data)?;
        self.data.clear();
        Ok(())
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
