//! Compositor - widget registry and input routing
//!
//! The compositor owns every widget, the render surface and the interaction
//! bookkeeping (focused widget, pressed widgets, timers). Input is routed one
//! event at a time:
//!
//! - **Key**: the focused widget only
//! - **Left press**: the topmost widget under the pointer (last added wins);
//!   it receives click-start and focus, the previous focus is blurred. A press
//!   on empty space clears focus.
//! - **Left release**: every widget pressed since the last release
//! - **Motion**: every widget, as hover-start / hover / hover-end
//! - **Wheel**: the topmost widget under the pointer
//! - **CTRL_C**: clears the screen, homes the cursor, yields [`Flow::Exit`]
//!
//! Flag bookkeeping and notifications happen before a widget's hook runs.

mod event_loop;
mod timers;

pub use timers::{DueTimer, TimerAction, TimerId, Timers};

use std::time::Instant;

use crate::error::{Error, Result};
use crate::renderer::Surface;
use crate::state::{keys, InputEvent, KeyEvent, MouseEvent, MouseKind};
use crate::terminal::{CrosstermTerminal, HeadlessTerminal, TerminalMode};
use crate::types::Position;
use crate::widgets::{EventContext, Notification, Widget, WidgetEvent, WidgetId, WidgetState};

// =============================================================================
// Config
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositorConfig {
    /// Terminate the process after CTRL_C has cleaned up.
    pub exit_process_on_ctrl_c: bool,
    /// Show the terminal cursor while a widget has focus.
    pub show_cursor_on_focus: bool,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            exit_process_on_ctrl_c: true,
            show_cursor_on_focus: true,
        }
    }
}

/// Whether the input loop should keep going after a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

struct Entry {
    id: WidgetId,
    widget: Box<dyn Widget>,
}

// =============================================================================
// Compositor
// =============================================================================

pub struct Compositor {
    widgets: Vec<Entry>,
    focused: Option<WidgetId>,
    clicked: Vec<WidgetId>,
    surface: Surface,
    timers: Timers,
    notifications: Vec<Notification>,
    terminal: Box<dyn TerminalMode>,
    config: CompositorConfig,
    next_id: u64,
}

impl Compositor {
    /// Compositor driving the process terminal.
    pub fn new(config: CompositorConfig) -> Self {
        Self::with_terminal(config, Box::new(CrosstermTerminal::new()))
    }

    /// Compositor with an in-memory terminal that never exits the process.
    pub fn headless() -> Self {
        Self::with_terminal(
            CompositorConfig {
                exit_process_on_ctrl_c: false,
                ..Default::default()
            },
            Box::new(HeadlessTerminal::new()),
        )
    }

    pub fn with_terminal(config: CompositorConfig, terminal: Box<dyn TerminalMode>) -> Self {
        Self {
            widgets: Vec::new(),
            focused: None,
            clicked: Vec::new(),
            surface: Surface::new(),
            timers: Timers::new(),
            notifications: Vec::new(),
            terminal,
            config,
            next_id: 0,
        }
    }

    pub fn config(&self) -> &CompositorConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Registry
    // -------------------------------------------------------------------------

    /// Register a widget on top of every widget added before it.
    pub fn add_widget<W: Widget>(&mut self, widget: W) -> WidgetId {
        let id = WidgetId(self.next_id);
        self.next_id += 1;
        tracing::debug!(%id, kind = widget.kind().name(), "widget added");
        self.widgets.push(Entry {
            id,
            widget: Box::new(widget),
        });
        id
    }

    /// Unregister a widget, blurring it and cancelling its timers first.
    pub fn remove_widget(&mut self, id: WidgetId) -> Result<Box<dyn Widget>> {
        self.index_of(id)?;
        if self.focused == Some(id) {
            self.blur(id)?;
        }
        self.clicked.retain(|c| *c != id);
        self.timers.cancel_owner(id);

        let index = self.index_of(id)?;
        tracing::debug!(%id, "widget removed");
        Ok(self.widgets.remove(index).widget)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Ids in registration (bottom to top) order.
    pub fn ids(&self) -> impl Iterator<Item = WidgetId> + '_ {
        self.widgets.iter().map(|e| e.id)
    }

    fn index_of(&self, id: WidgetId) -> Result<usize> {
        self.widgets
            .iter()
            .position(|e| e.id == id)
            .ok_or(Error::UnknownWidget(id))
    }

    pub fn get(&self, id: WidgetId) -> Result<&dyn Widget> {
        let index = self.index_of(id)?;
        Ok(&*self.widgets[index].widget)
    }

    pub fn widget<T: Widget>(&self, id: WidgetId) -> Result<&T> {
        self.get(id)?
            .as_any()
            .downcast_ref::<T>()
            .ok_or(Error::WidgetKindMismatch {
                id,
                expected: std::any::type_name::<T>(),
            })
    }

    /// Mutable access without an event context. Nothing is repainted.
    pub fn widget_mut<T: Widget>(&mut self, id: WidgetId) -> Result<&mut T> {
        let index = self.index_of(id)?;
        self.widgets[index]
            .widget
            .as_any_mut()
            .downcast_mut::<T>()
            .ok_or(Error::WidgetKindMismatch {
                id,
                expected: std::any::type_name::<T>(),
            })
    }

    /// Run `f` against a typed widget with a full event context.
    ///
    /// Focus changes made inside `f` are reconciled afterwards.
    pub fn with_widget<T, R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut T, &mut EventContext<'_>) -> Result<R>,
    ) -> Result<R>
    where
        T: Widget,
    {
        self.call(id, |widget, ctx| {
            let widget = widget
                .as_any_mut()
                .downcast_mut::<T>()
                .ok_or(Error::WidgetKindMismatch {
                    id,
                    expected: std::any::type_name::<T>(),
                })?;
            f(widget, ctx)
        })
    }

    /// Topmost widget containing `point`.
    pub fn hit_test(&self, point: Position) -> Option<WidgetId> {
        self.widgets
            .iter()
            .rev()
            .find(|e| e.widget.contains_point(point))
            .map(|e| e.id)
    }

    // -------------------------------------------------------------------------
    // Calling into widgets
    // -------------------------------------------------------------------------

    fn call_raw<R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut dyn Widget, &mut EventContext<'_>) -> Result<R>,
    ) -> Result<R> {
        let Self {
            widgets,
            surface,
            timers,
            notifications,
            terminal,
            ..
        } = self;
        let entry = widgets
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(Error::UnknownWidget(id))?;
        let mut ctx = EventContext::new(id, surface, notifications, timers, &mut **terminal);
        f(&mut *entry.widget, &mut ctx)
    }

    fn call<R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut dyn Widget, &mut EventContext<'_>) -> Result<R>,
    ) -> Result<R> {
        let result = self.call_raw(id, f);
        self.reconcile_focus(id)?;
        result
    }

    /// Bring `focused` in line with the widget's own flag after a call.
    fn reconcile_focus(&mut self, id: WidgetId) -> Result<()> {
        let Ok(index) = self.index_of(id) else {
            return Ok(());
        };
        let has_flag = self.widgets[index].widget.core().is_focused();

        match self.focused {
            Some(current) if current == id && !has_flag => {
                self.focused = None;
                tracing::debug!(%id, "focus cleared");
                self.surface.hide_cursor();
            }
            Some(current) if current != id && has_flag => {
                self.focused = Some(id);
                self.call_raw(current, |w, ctx| w.blur(ctx))?;
                tracing::debug!(from = %current, to = %id, "focus moved");
                self.show_focus_cursor();
            }
            None if has_flag => {
                self.focused = Some(id);
                tracing::debug!(%id, "focus gained");
                self.show_focus_cursor();
            }
            _ => {}
        }
        Ok(())
    }

    fn show_focus_cursor(&mut self) {
        if self.config.show_cursor_on_focus {
            self.surface.show_cursor();
        }
    }

    // -------------------------------------------------------------------------
    // Focus
    // -------------------------------------------------------------------------

    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    /// Focus a widget, blurring whichever widget had focus.
    pub fn focus(&mut self, id: WidgetId) -> Result<()> {
        self.call(id, |w, ctx| w.focus(ctx))
    }

    pub fn blur(&mut self, id: WidgetId) -> Result<()> {
        self.call(id, |w, ctx| w.blur(ctx))
    }

    // -------------------------------------------------------------------------
    // Dispatch
    // -------------------------------------------------------------------------

    /// Route one input event.
    pub fn dispatch(&mut self, event: impl Into<InputEvent>) -> Result<Flow> {
        let event = event.into();
        tracing::trace!(?event, "dispatch");

        let flow = match &event {
            InputEvent::Key(key) if key.is(keys::CTRL_C) => {
                self.surface.clear();
                self.surface.move_cursor(Position::new(0, 0));
                tracing::debug!("CTRL_C, exiting");
                Flow::Exit
            }
            InputEvent::Key(key) => {
                self.key(key)?;
                Flow::Continue
            }
            InputEvent::Mouse(mouse) => {
                match mouse.kind {
                    MouseKind::LeftDown => self.press(mouse)?,
                    MouseKind::LeftUp => self.release(mouse)?,
                    MouseKind::Motion => self.motion(mouse)?,
                    MouseKind::WheelUp | MouseKind::WheelDown => self.wheel(mouse)?,
                }
                Flow::Continue
            }
        };

        self.notifications.push(Notification::Input(event));
        Ok(flow)
    }

    fn key(&mut self, key: &KeyEvent) -> Result<()> {
        let Some(id) = self.focused else {
            return Ok(());
        };
        self.call(id, |w, ctx| {
            ctx.emit(WidgetEvent::Key(key.clone()));
            w.on_key(key, ctx)
        })
    }

    fn press(&mut self, mouse: &MouseEvent) -> Result<()> {
        let Some(id) = self.hit_test(mouse.position()) else {
            if let Some(previous) = self.focused {
                self.blur(previous)?;
            }
            self.surface.hide_cursor();
            return Ok(());
        };

        if let Some(previous) = self.focused.filter(|p| *p != id) {
            self.focused = None;
            self.call_raw(previous, |w, ctx| w.blur(ctx))?;
        }

        if !self.clicked.contains(&id) {
            self.clicked.push(id);
            self.call(id, |w, ctx| {
                w.core_mut().state.insert(WidgetState::CLICKED);
                ctx.emit(WidgetEvent::ClickStart);
                w.on_click_start(mouse, ctx)
            })?;
        }

        self.focus(id)
    }

    /// Every pressed widget gets its click-end even if an earlier one fails;
    /// the first error is returned afterwards.
    fn release(&mut self, mouse: &MouseEvent) -> Result<()> {
        let mut first_err = None;
        for id in std::mem::take(&mut self.clicked) {
            if self.index_of(id).is_err() {
                continue;
            }
            let result = self.call(id, |w, ctx| {
                w.core_mut().state.remove(WidgetState::CLICKED);
                ctx.emit(WidgetEvent::ClickEnd);
                w.on_click_end(mouse, ctx)
            });
            if let Err(err) = result {
                tracing::warn!(%id, error = %err, "click-end failed");
                first_err = first_err.or(Some(err));
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    fn motion(&mut self, mouse: &MouseEvent) -> Result<()> {
        let point = mouse.position();
        let ids: Vec<WidgetId> = self.ids().collect();

        for id in ids {
            let Ok(widget) = self.get(id) else {
                continue;
            };
            let inside = widget.contains_point(point);
            let hovered = widget.core().is_hovered();

            match (inside, hovered) {
                (true, false) => self.call(id, |w, ctx| {
                    w.core_mut().state.insert(WidgetState::HOVERED);
                    ctx.emit(WidgetEvent::HoverStart);
                    w.on_hover_start(mouse, ctx)
                })?,
                (false, true) => self.call(id, |w, ctx| {
                    w.core_mut().state.remove(WidgetState::HOVERED);
                    ctx.emit(WidgetEvent::HoverEnd);
                    w.on_hover_end(mouse, ctx)
                })?,
                (true, true) => self.call(id, |w, ctx| {
                    ctx.emit(WidgetEvent::Hover);
                    w.on_hover(mouse, ctx)
                })?,
                (false, false) => {}
            }
        }
        Ok(())
    }

    fn wheel(&mut self, mouse: &MouseEvent) -> Result<()> {
        let Some(id) = self.hit_test(mouse.position()) else {
            return Ok(());
        };
        let up = mouse.kind == MouseKind::WheelUp;
        self.call(id, |w, ctx| {
            if up {
                ctx.emit(WidgetEvent::WheelUp);
                w.on_wheel_up(mouse, ctx)
            } else {
                ctx.emit(WidgetEvent::WheelDown);
                w.on_wheel_down(mouse, ctx)
            }
        })
    }

    // -------------------------------------------------------------------------
    // Timers
    // -------------------------------------------------------------------------

    /// Fire every timer due at `now`. Returns how many fired.
    pub fn tick(&mut self, now: Instant) -> Result<usize> {
        let due = self.timers.take_due(now);
        let fired = due.len();
        for DueTimer { id, owner, action } in due {
            if !self.timers.is_active(id) || self.index_of(owner).is_err() {
                continue;
            }
            self.call(owner, |w, ctx| w.on_timer(id, action, ctx))?;
        }
        Ok(fired)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    // -------------------------------------------------------------------------
    // Output
    // -------------------------------------------------------------------------

    /// Paint every widget in registration order.
    pub fn paint(&mut self, clear_first: bool) -> Result<()> {
        if clear_first {
            self.surface.clear();
        }
        for entry in &self.widgets {
            entry.widget.paint(&mut self.surface)?;
        }
        Ok(())
    }

    pub fn paint_widget(&mut self, id: WidgetId) -> Result<()> {
        let index = self.index_of(id)?;
        self.widgets[index].widget.paint(&mut self.surface)
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    /// Write everything painted so far to stdout.
    pub fn flush(&mut self) -> Result<()> {
        self.surface.flush_stdout()?;
        Ok(())
    }

    pub fn terminal(&self) -> &dyn TerminalMode {
        &*self.terminal
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}
