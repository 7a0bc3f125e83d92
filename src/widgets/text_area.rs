//! Text Area - panel with a keystroke editing session
//!
//! A read session is a two-state machine: `Idle` or `Reading`. While reading,
//! every key delivered to the focused text area edits both the session buffer
//! and the visible content. The session ends on a termination key, on blur, or
//! when a new read replaces it; each end resolves the session's
//! [`ReadHandle`] with the text typed so far.

use std::any::Any;
use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use super::panel::{Palette, Panel, PanelOptions, DEFAULT_BACKGROUND_COLOR};
use super::{EventContext, Widget, WidgetCore, WidgetEvent, WidgetKind};
use crate::error::Result;
use crate::renderer::RenderRows;
use crate::state::{keys, KeyEvent};
use crate::types::{Color, Position};

pub const FOCUSED_BORDER_COLOR: Color = Color::GREEN;
pub const FOCUSED_COLOR: Color = Color::WHITE;
pub const UNFOCUSED_COLOR: Color = Color::GRAY;

pub fn default_termination_keys() -> Vec<String> {
    vec![keys::CTRL_C.to_string(), keys::ESCAPE.to_string()]
}

// =============================================================================
// Read handle
// =============================================================================

/// How a read session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadEnd {
    /// A termination key with this name was struck.
    Terminated(String),
    /// Blur or a replacing read ended the session.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOutcome {
    pub text: String,
    pub end: ReadEnd,
}

#[derive(Debug, Default)]
struct ReadSlot {
    outcome: Option<ReadOutcome>,
    waker: Option<Waker>,
}

/// Completion handle for one read session.
///
/// Resolved synchronously inside key dispatch. It can be polled directly or
/// awaited on a local executor.
#[derive(Debug, Clone, Default)]
pub struct ReadHandle {
    slot: Rc<RefCell<ReadSlot>>,
}

impl ReadHandle {
    fn new() -> Self {
        Self::default()
    }

    fn resolve(&self, outcome: ReadOutcome) {
        let waker = {
            let mut slot = self.slot.borrow_mut();
            slot.outcome = Some(outcome);
            slot.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.slot.borrow().outcome.is_some()
    }

    pub fn outcome(&self) -> Option<ReadOutcome> {
        self.slot.borrow().outcome.clone()
    }

    /// Accumulated text, once finished.
    pub fn text(&self) -> Option<String> {
        self.slot.borrow().outcome.as_ref().map(|o| o.text.clone())
    }
}

impl Future for ReadHandle {
    type Output = ReadOutcome;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut slot = self.slot.borrow_mut();
        match &slot.outcome {
            Some(outcome) => Poll::Ready(outcome.clone()),
            None => {
                slot.waker = Some(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}

// =============================================================================
// Text area
// =============================================================================

/// Called after every key handled during a read, with the buffer so far.
pub type KeystrokeCallback = Box<dyn FnMut(&KeyEvent, &str)>;

struct ActiveRead {
    handle: ReadHandle,
    buffer: String,
    restore_raw: bool,
    on_key: Option<KeystrokeCallback>,
}

enum ReadState {
    Idle,
    Reading(ActiveRead),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextAreaOptions {
    pub panel: PanelOptions,
    pub termination_keys: Vec<String>,
}

impl Default for TextAreaOptions {
    fn default() -> Self {
        Self {
            panel: PanelOptions::default(),
            termination_keys: default_termination_keys(),
        }
    }
}

pub struct TextArea {
    panel: Panel,
    termination_keys: Vec<String>,
    read: ReadState,
}

impl TextArea {
    pub fn new(options: TextAreaOptions) -> Self {
        Self {
            panel: Panel::new(options.panel),
            termination_keys: options.termination_keys,
            read: ReadState::Idle,
        }
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut Panel {
        &mut self.panel
    }

    pub fn content(&self) -> &str {
        self.panel.content()
    }

    pub fn termination_keys(&self) -> &[String] {
        &self.termination_keys
    }

    pub fn is_reading(&self) -> bool {
        matches!(self.read, ReadState::Reading(_))
    }

    /// Handle of the active read, if any.
    pub fn read_handle(&self) -> Option<ReadHandle> {
        match &self.read {
            ReadState::Reading(active) => Some(active.handle.clone()),
            ReadState::Idle => None,
        }
    }

    /// Text typed during the active read.
    pub fn buffer(&self) -> Option<&str> {
        match &self.read {
            ReadState::Reading(active) => Some(&active.buffer),
            ReadState::Idle => None,
        }
    }

    pub fn start_read(&mut self, ctx: &mut EventContext<'_>) -> Result<ReadHandle> {
        self.begin_read(None, ctx)
    }

    pub fn start_read_with(
        &mut self,
        on_key: impl FnMut(&KeyEvent, &str) + 'static,
        ctx: &mut EventContext<'_>,
    ) -> Result<ReadHandle> {
        self.begin_read(Some(Box::new(on_key)), ctx)
    }

    /// End the active read, resolving it with the text so far.
    pub fn cancel_read(&mut self, ctx: &mut EventContext<'_>) -> Result<Option<ReadOutcome>> {
        self.finish_read(ReadEnd::Cancelled, ctx)
    }

    fn begin_read(
        &mut self,
        on_key: Option<KeystrokeCallback>,
        ctx: &mut EventContext<'_>,
    ) -> Result<ReadHandle> {
        // Only one read is ever active: the old one resolves first.
        self.finish_read(ReadEnd::Cancelled, ctx)?;

        let was_raw = ctx.terminal().is_raw()?;
        if !was_raw {
            ctx.terminal().set_raw(true)?;
        }

        let handle = ReadHandle::new();
        self.read = ReadState::Reading(ActiveRead {
            handle: handle.clone(),
            buffer: String::new(),
            restore_raw: !was_raw,
            on_key,
        });
        tracing::debug!(id = %ctx.id(), "text read started");

        if !self.core().is_focused() {
            self.focus(ctx)?;
        }
        self.move_cursor(ctx);

        Ok(handle)
    }

    fn finish_read(&mut self, end: ReadEnd, ctx: &mut EventContext<'_>) -> Result<Option<ReadOutcome>> {
        let ReadState::Reading(active) = std::mem::replace(&mut self.read, ReadState::Idle) else {
            return Ok(None);
        };

        let outcome = ReadOutcome {
            text: active.buffer,
            end,
        };
        active.handle.resolve(outcome.clone());
        ctx.emit(WidgetEvent::ReadFinished(outcome.clone()));
        tracing::debug!(id = %ctx.id(), end = ?outcome.end, len = outcome.text.len(), "text read finished");

        if active.restore_raw {
            ctx.terminal().set_raw(false)?;
        }
        Ok(Some(outcome))
    }

    fn bump_scroll(&mut self, delta: isize) {
        let mut scroll = self.panel.scroll();
        scroll.y = scroll.y.saturating_add_signed(delta);
        self.panel.set_scroll(scroll);
    }

    /// Apply one editing key to content and buffer.
    fn edit(&mut self, event: &KeyEvent) {
        let ReadState::Reading(active) = &mut self.read else {
            return;
        };
        let content_height = self.panel.content_height();

        if event.is(keys::BACKSPACE) {
            let Some(removed) = self.panel.content_mut().pop() else {
                return;
            };
            if active.buffer.ends_with(removed) {
                active.buffer.pop();
            }
            if removed == '\n' && self.panel.scroll().y > 0 {
                self.bump_scroll(-1);
            }
        } else if event.is_any(&[keys::ENTER, keys::RETURN]) {
            active.buffer.push('\n');
            self.panel.content_mut().push('\n');
            if self.panel.total_lines() > content_height {
                self.bump_scroll(1);
            }
        } else if let Some(ch) = event.printable() {
            active.buffer.push(ch);
            if self.panel.last_line().chars().count() + 1 > self.panel.content_width() {
                self.panel.content_mut().push('\n');
                if self.panel.total_lines() > content_height {
                    self.bump_scroll(1);
                }
            }
            self.panel.content_mut().push(ch);
        }
    }

    /// One cell past the end of the last line, row-clamped to the viewport.
    pub fn cursor_position(&self) -> Position {
        let core = self.panel.core();
        let last_len = self.panel.last_line().chars().count();
        let row = (self.panel.total_lines() - 1)
            .saturating_sub(self.panel.scroll().y)
            .min(self.panel.content_height().saturating_sub(1));
        Position::new(
            core.position.x.saturating_add(1).saturating_add(last_len as u16),
            core.position.y.saturating_add(1).saturating_add(row as u16),
        )
    }

    fn move_cursor(&self, ctx: &mut EventContext<'_>) {
        ctx.surface.move_cursor(self.cursor_position());
    }

    pub fn palette(&self) -> Palette {
        let style = &self.panel.core().style;
        let focused = self.panel.core().is_focused();
        let color = style
            .color
            .unwrap_or(if focused { FOCUSED_COLOR } else { UNFOCUSED_COLOR });
        Palette {
            color,
            background: style.background_color.unwrap_or(DEFAULT_BACKGROUND_COLOR),
            border: style
                .border_color
                .unwrap_or(if focused { FOCUSED_BORDER_COLOR } else { UNFOCUSED_COLOR }),
            label: style.label_color.unwrap_or(color),
        }
    }
}

impl Widget for TextArea {
    fn core(&self) -> &WidgetCore {
        self.panel.core()
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        self.panel.core_mut()
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::TextArea
    }

    fn produce_rows(&self) -> RenderRows {
        Panel::rows_from_cells(self.panel.cell_rows(&self.palette()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn on_focus(&mut self, ctx: &mut EventContext<'_>) -> Result<()> {
        if !self.is_reading() {
            self.start_read(ctx)?;
        }
        Ok(())
    }

    fn on_blur(&mut self, ctx: &mut EventContext<'_>) -> Result<()> {
        self.cancel_read(ctx)?;
        Ok(())
    }

    fn on_key(&mut self, event: &KeyEvent, ctx: &mut EventContext<'_>) -> Result<()> {
        if !self.is_reading() {
            return Ok(());
        }

        if event.is_any(self.termination_keys.as_slice()) {
            let name = event.name.clone();
            self.finish_read(ReadEnd::Terminated(name), ctx)?;
            return self.blur(ctx);
        }

        let before = self.panel.content().len();
        let before_scroll = self.panel.scroll();
        self.edit(event);
        self.move_cursor(ctx);
        if self.panel.content().len() != before || self.panel.scroll() != before_scroll {
            self.paint(ctx.surface)?;
        }

        if let ReadState::Reading(active) = &mut self.read {
            if let Some(on_key) = active.on_key.as_mut() {
                on_key(event, &active.buffer);
            }
        }
        Ok(())
    }
}
