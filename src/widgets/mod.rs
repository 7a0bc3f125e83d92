//! Widgets - the widget contract and the built-in widget kinds
//!
//! Every widget owns a [`WidgetCore`] (geometry, style, state flags) and
//! describes its appearance through [`Widget::produce_rows`]. The compositor
//! owns all widgets and calls into them with an [`EventContext`], which is the
//! only way a widget reaches the surface, the timer queue or the terminal.
//!
//! Kinds:
//! - [`Panel`] - bordered, labelled, scrollable text content
//! - [`ScrollablePanel`] - panel plus scrollbars and track auto-repeat
//! - [`Button`] - panel with interaction-state styling and auto-sized bounds
//! - [`TextArea`] - panel with a cancellable keystroke editing session
//! - [`Log`] - append-only scrollable panel pinned to the bottom

mod button;
mod context;
mod log;
mod panel;
mod scrollable;
mod text_area;

pub use button::{Button, ButtonOptions, ButtonPalette, ButtonState, ButtonStyles};
pub use context::EventContext;
pub use log::Log;
pub use panel::{Palette, Panel, PanelOptions};
pub use scrollable::{ScrollOptions, ScrollablePanel};
pub use text_area::{KeystrokeCallback, ReadEnd, ReadHandle, ReadOutcome, TextArea, TextAreaOptions};

use std::any::Any;
use std::fmt;

use crate::compositor::{TimerAction, TimerId};
use crate::error::Result;
use crate::renderer::{paint_rows, RenderRows, Surface};
use crate::state::{InputEvent, KeyEvent, MouseEvent};
use crate::types::{Position, Size, Style};

// =============================================================================
// Identity and state
// =============================================================================

/// Registry handle for a widget owned by a [`Compositor`](crate::Compositor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub(crate) u64);

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "widget#{}", self.0)
    }
}

bitflags::bitflags! {
    /// Interaction flags carried by every widget.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WidgetState: u8 {
        const FOCUSED = 1 << 0;
        const HOVERED = 1 << 1;
        const CLICKED = 1 << 2;
        const DISABLED = 1 << 3;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Panel,
    ScrollablePanel,
    Button,
    TextArea,
    Log,
}

impl WidgetKind {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Panel => "Panel",
            Self::ScrollablePanel => "ScrollablePanel",
            Self::Button => "Button",
            Self::TextArea => "TextArea",
            Self::Log => "Log",
        }
    }
}

/// Geometry, style and interaction flags shared by every widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetCore {
    pub position: Position,
    pub size: Size,
    pub style: Style,
    pub state: WidgetState,
}

impl WidgetCore {
    pub fn new(position: Position, size: Size, style: Style) -> Self {
        Self {
            position,
            size,
            style,
            state: WidgetState::empty(),
        }
    }

    /// `x ∈ [px, px + width)` and `y ∈ [py, py + height)`.
    pub fn contains_point(&self, point: Position) -> bool {
        let (x, y) = (point.x as u32, point.y as u32);
        let (px, py) = (self.position.x as u32, self.position.y as u32);
        x >= px && x < px + self.size.width as u32 && y >= py && y < py + self.size.height as u32
    }

    /// Translate a screen point into widget-local coordinates.
    pub fn local(&self, point: Position) -> Option<(usize, usize)> {
        self.contains_point(point).then(|| {
            (
                (point.x - self.position.x) as usize,
                (point.y - self.position.y) as usize,
            )
        })
    }

    pub fn is_focused(&self) -> bool {
        self.state.contains(WidgetState::FOCUSED)
    }

    pub fn is_hovered(&self) -> bool {
        self.state.contains(WidgetState::HOVERED)
    }

    pub fn is_clicked(&self) -> bool {
        self.state.contains(WidgetState::CLICKED)
    }

    pub fn is_disabled(&self) -> bool {
        self.state.contains(WidgetState::DISABLED)
    }
}

// =============================================================================
// Notifications
// =============================================================================

/// Something that happened to a widget.
///
/// Focus/Blur/Hover*/Click*/Key/Wheel* come from every kind. `Scrolled` from
/// scrollable panels and logs, `ReadFinished` from text areas, `Appended`
/// from logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    Focus,
    Blur,
    HoverStart,
    Hover,
    HoverEnd,
    ClickStart,
    ClickEnd,
    Key(KeyEvent),
    WheelUp,
    WheelDown,
    Scrolled { x: usize, y: usize },
    ReadFinished(ReadOutcome),
    Appended,
}

/// Entry in the compositor's notification queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Every dispatched input, after widget routing.
    Input(InputEvent),
    Widget { id: WidgetId, event: WidgetEvent },
}

// =============================================================================
// Widget trait
// =============================================================================

/// The widget contract.
///
/// Implementors supply `core`, `kind` and `produce_rows`; the compositor does
/// flag bookkeeping and notifications before calling the `on_*` hooks, so
/// hooks only add visual feedback or behaviour.
pub trait Widget: Any {
    fn core(&self) -> &WidgetCore;
    fn core_mut(&mut self) -> &mut WidgetCore;
    fn kind(&self) -> WidgetKind;

    /// Rows to paint, top to bottom, with one colour annotation per row.
    fn produce_rows(&self) -> RenderRows;

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Paint this widget's rows at its position.
    fn paint(&self, surface: &mut Surface) -> Result<()> {
        paint_rows(self.core().position, &self.produce_rows(), surface)
    }

    fn contains_point(&self, point: Position) -> bool {
        self.core().contains_point(point)
    }

    /// Gain focus. Repaints and notifies only on an actual transition.
    fn focus(&mut self, ctx: &mut EventContext<'_>) -> Result<()> {
        if self.core().is_focused() {
            return Ok(());
        }
        self.core_mut().state.insert(WidgetState::FOCUSED);
        self.paint(ctx.surface)?;
        ctx.emit(WidgetEvent::Focus);
        self.on_focus(ctx)
    }

    /// Lose focus. Repaints and notifies only on an actual transition.
    fn blur(&mut self, ctx: &mut EventContext<'_>) -> Result<()> {
        if !self.core().is_focused() {
            return Ok(());
        }
        self.core_mut().state.remove(WidgetState::FOCUSED);
        self.paint(ctx.surface)?;
        ctx.emit(WidgetEvent::Blur);
        self.on_blur(ctx)
    }

    fn on_focus(&mut self, _ctx: &mut EventContext<'_>) -> Result<()> {
        Ok(())
    }

    fn on_blur(&mut self, _ctx: &mut EventContext<'_>) -> Result<()> {
        Ok(())
    }

    fn on_hover_start(&mut self, _event: &MouseEvent, _ctx: &mut EventContext<'_>) -> Result<()> {
        Ok(())
    }

    fn on_hover(&mut self, _event: &MouseEvent, _ctx: &mut EventContext<'_>) -> Result<()> {
        Ok(())
    }

    fn on_hover_end(&mut self, _event: &MouseEvent, _ctx: &mut EventContext<'_>) -> Result<()> {
        Ok(())
    }

    fn on_click_start(&mut self, _event: &MouseEvent, _ctx: &mut EventContext<'_>) -> Result<()> {
        Ok(())
    }

    fn on_click_end(&mut self, _event: &MouseEvent, _ctx: &mut EventContext<'_>) -> Result<()> {
        Ok(())
    }

    fn on_key(&mut self, _event: &KeyEvent, _ctx: &mut EventContext<'_>) -> Result<()> {
        Ok(())
    }

    fn on_wheel_up(&mut self, _event: &MouseEvent, _ctx: &mut EventContext<'_>) -> Result<()> {
        Ok(())
    }

    fn on_wheel_down(&mut self, _event: &MouseEvent, _ctx: &mut EventContext<'_>) -> Result<()> {
        Ok(())
    }

    /// A timer this widget started through [`EventContext::start_timer`] fired.
    fn on_timer(
        &mut self,
        _timer: TimerId,
        _action: TimerAction,
        _ctx: &mut EventContext<'_>,
    ) -> Result<()> {
        Ok(())
    }
}

/// Owned pieces of an [`EventContext`] for driving widgets without a compositor.
#[cfg(test)]
pub(crate) struct Harness {
    pub surface: Surface,
    pub notifications: Vec<Notification>,
    pub timers: crate::compositor::Timers,
    pub terminal: crate::terminal::HeadlessTerminal,
}

#[cfg(test)]
impl Harness {
    pub fn new() -> Self {
        Self {
            surface: Surface::new(),
            notifications: Vec::new(),
            timers: crate::compositor::Timers::new(),
            terminal: crate::terminal::HeadlessTerminal::new(),
        }
    }

    pub fn ctx(&mut self) -> EventContext<'_> {
        EventContext::new(
            WidgetId(0),
            &mut self.surface,
            &mut self.notifications,
            &mut self.timers,
            &mut self.terminal,
        )
    }

    pub fn events(&self) -> Vec<WidgetEvent> {
        self.notifications
            .iter()
            .filter_map(|n| match n {
                Notification::Widget { event, .. } => Some(event.clone()),
                Notification::Input(_) => None,
            })
            .collect()
    }
}
