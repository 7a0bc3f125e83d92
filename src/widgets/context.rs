//! Event Context
//!
//! What a widget may touch while the compositor is calling into it: the
//! render surface, its own notification stream, the timer queue and the
//! terminal-mode controller.

use std::time::{Duration, Instant};

use super::{Notification, WidgetEvent, WidgetId};
use crate::compositor::{TimerAction, TimerId, Timers};
use crate::renderer::Surface;
use crate::terminal::TerminalMode;

/// Context handed to every widget hook.
pub struct EventContext<'a> {
    /// The shared render surface.
    pub surface: &'a mut Surface,
    id: WidgetId,
    notifications: &'a mut Vec<Notification>,
    timers: &'a mut Timers,
    terminal: &'a mut dyn TerminalMode,
}

impl<'a> EventContext<'a> {
    pub(crate) fn new(
        id: WidgetId,
        surface: &'a mut Surface,
        notifications: &'a mut Vec<Notification>,
        timers: &'a mut Timers,
        terminal: &'a mut dyn TerminalMode,
    ) -> Self {
        Self {
            surface,
            id,
            notifications,
            timers,
            terminal,
        }
    }

    /// The widget this context was created for.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Queue a notification from this widget.
    pub fn emit(&mut self, event: WidgetEvent) {
        self.notifications.push(Notification::Widget { id: self.id, event });
    }

    /// Start a repeating timer owned by this widget.
    pub fn start_timer(&mut self, interval: Duration, action: TimerAction) -> TimerId {
        self.timers.start(self.id, interval, action, Instant::now())
    }

    /// Cancel a timer. Returns false if it was not active.
    pub fn cancel_timer(&mut self, timer: TimerId) -> bool {
        self.timers.cancel(timer)
    }

    pub fn terminal(&mut self) -> &mut dyn TerminalMode {
        &mut *self.terminal
    }
}
