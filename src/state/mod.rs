//! State Module - Input model and scroll arithmetic
//!
//! - **Keyboard** - decoded key events, key names, modifiers
//! - **Mouse** - decoded mouse gestures
//! - **Scroll** - offsets, clamping, scrollbar thumb geometry

mod keyboard;
mod mouse;
pub mod scroll;

pub use keyboard::*;
pub use mouse::*;
pub use scroll::{ScrollOffset, Thumb};

/// One decoded input event, as handed to [`Compositor::dispatch`](crate::Compositor::dispatch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
}

impl From<KeyEvent> for InputEvent {
    fn from(event: KeyEvent) -> Self {
        Self::Key(event)
    }
}

impl From<MouseEvent> for InputEvent {
    fn from(event: MouseEvent) -> Self {
        Self::Mouse(event)
    }
}
