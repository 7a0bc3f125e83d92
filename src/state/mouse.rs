//! Mouse Module - Decoded mouse events
//!
//! Only the gestures the compositor routes: left press/release, motion and
//! the wheel. Coordinates are 0-based terminal cells.

use super::keyboard::Modifiers;
use crate::types::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseKind {
    LeftDown,
    LeftUp,
    Motion,
    WheelUp,
    WheelDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseKind,
    pub x: u16,
    pub y: u16,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    pub fn new(kind: MouseKind, x: u16, y: u16) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::empty(),
        }
    }

    pub fn left_down(x: u16, y: u16) -> Self {
        Self::new(MouseKind::LeftDown, x, y)
    }

    pub fn left_up(x: u16, y: u16) -> Self {
        Self::new(MouseKind::LeftUp, x, y)
    }

    pub fn motion(x: u16, y: u16) -> Self {
        Self::new(MouseKind::Motion, x, y)
    }

    pub fn wheel_up(x: u16, y: u16) -> Self {
        Self::new(MouseKind::WheelUp, x, y)
    }

    pub fn wheel_down(x: u16, y: u16) -> Self {
        Self::new(MouseKind::WheelDown, x, y)
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}
