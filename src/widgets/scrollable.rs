//! Scrollable Panel - panel with scrollbars
//!
//! The vertical bar lives in the left or right border column, the horizontal
//! bar in the bottom border row. Thumb cells are drawn with the scroll glyph,
//! the rest of the track keeps the border glyph. Pressing the track above or
//! below a thumb scrolls by one step every `repeat_interval` until release.

use std::any::Any;
use std::time::Duration;

use super::panel::{Palette, Panel, PanelOptions};
use super::{EventContext, Widget, WidgetCore, WidgetEvent, WidgetKind};
use crate::compositor::{TimerAction, TimerId};
use crate::error::Result;
use crate::renderer::{CellRow, RenderRows};
use crate::state::scroll::scroll_by;
use crate::state::{MouseEvent, ScrollOffset, Thumb};
use crate::types::{Color, Edge};

pub const DEFAULT_SCROLLBAR_COLOR: Color = Color::rgb(200, 200, 200);
pub const DEFAULT_SCROLLBAR_HOVERED_COLOR: Color = Color::rgb(254, 254, 254);
pub const DEFAULT_SCROLLBAR_DISABLED_COLOR: Color = Color::rgb(120, 120, 120);
pub const DEFAULT_SCROLL_GLYPH: char = '█';
pub const DEFAULT_REPEAT_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollOptions {
    pub scroll_x_disabled: bool,
    pub scroll_y_disabled: bool,
    pub vertical_edge: Edge,
    pub repeat_interval: Duration,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            scroll_x_disabled: false,
            scroll_y_disabled: false,
            vertical_edge: Edge::Right,
            repeat_interval: DEFAULT_REPEAT_INTERVAL,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScrollablePanel {
    panel: Panel,
    options: ScrollOptions,
    vertical_hovered: bool,
    horizontal_hovered: bool,
    repeat: Option<TimerId>,
}

impl ScrollablePanel {
    pub fn new(panel: PanelOptions, options: ScrollOptions) -> Self {
        Self {
            panel: Panel::new(panel),
            options,
            vertical_hovered: false,
            horizontal_hovered: false,
            repeat: None,
        }
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut Panel {
        &mut self.panel
    }

    pub fn options(&self) -> &ScrollOptions {
        &self.options
    }

    pub fn scroll(&self) -> ScrollOffset {
        self.panel.scroll()
    }

    // -------------------------------------------------------------------------
    // Bars
    // -------------------------------------------------------------------------

    pub fn has_scroll_y(&self) -> bool {
        !self.options.scroll_y_disabled && self.panel.total_lines() > self.panel.content_height()
    }

    pub fn has_scroll_x(&self) -> bool {
        !self.options.scroll_x_disabled && self.panel.max_line_len() > self.panel.content_width()
    }

    pub fn vertical_thumb(&self) -> Thumb {
        Thumb::compute(
            self.panel.content_height(),
            self.panel.drawn_size().height as usize,
            self.panel.total_lines(),
            self.panel.scroll().y,
        )
    }

    pub fn horizontal_thumb(&self) -> Thumb {
        let width = self.panel.content_width();
        Thumb::compute(width, width, self.panel.max_line_len(), self.panel.scroll().x)
    }

    /// Widget-local column of the vertical bar.
    fn bar_column(&self) -> usize {
        match self.options.vertical_edge {
            Edge::Left => 0,
            Edge::Right => (self.panel.drawn_size().width - 1) as usize,
        }
    }

    fn bottom_row(&self) -> usize {
        (self.panel.drawn_size().height - 1) as usize
    }

    /// Track cell under a widget-local point on the vertical bar.
    fn vertical_track_cell(&self, col: usize, row: usize) -> Option<usize> {
        let on_track = self.has_scroll_y()
            && col == self.bar_column()
            && row >= 1
            && row <= self.panel.content_height();
        on_track.then(|| row - 1)
    }

    fn horizontal_track_cell(&self, col: usize, row: usize) -> Option<usize> {
        let on_track = self.has_scroll_x()
            && row == self.bottom_row()
            && col >= 1
            && col <= self.panel.content_width();
        on_track.then(|| col - 1)
    }

    fn thumb_color(&self, hovered: bool) -> Color {
        let style = &self.panel.core().style;
        if self.panel.core().is_disabled() {
            style.scrollbar_disabled_color.unwrap_or(DEFAULT_SCROLLBAR_DISABLED_COLOR)
        } else if hovered {
            style.scrollbar_hovered_color.unwrap_or(DEFAULT_SCROLLBAR_HOVERED_COLOR)
        } else {
            style.scrollbar_color.unwrap_or(DEFAULT_SCROLLBAR_COLOR)
        }
    }

    /// Panel rows with both bars drawn over the border.
    pub fn cell_rows(&self, palette: &Palette) -> Vec<CellRow> {
        let mut rows = self.panel.cell_rows(palette);
        let style = &self.panel.core().style;

        if self.has_scroll_y() {
            let thumb = self.vertical_thumb();
            let glyph = style.scroll_y_glyph.unwrap_or(DEFAULT_SCROLL_GLYPH);
            let color = self.thumb_color(self.vertical_hovered);
            let col = self.bar_column();
            for cell in thumb.start..thumb.end() {
                if let Some(row) = rows.get_mut(cell + 1) {
                    row.set(col, glyph, color);
                }
            }
        }

        if self.has_scroll_x() {
            let thumb = self.horizontal_thumb();
            let glyph = style.scroll_x_glyph.unwrap_or(DEFAULT_SCROLL_GLYPH);
            let color = self.thumb_color(self.horizontal_hovered);
            if let Some(row) = rows.last_mut() {
                for cell in thumb.start..thumb.end() {
                    row.set(cell + 1, glyph, color);
                }
            }
        }

        rows
    }

    // -------------------------------------------------------------------------
    // Scrolling
    // -------------------------------------------------------------------------

    /// Move the offset by a delta on each axis, clamped, then repaint.
    pub fn scroll_by(&mut self, dx: isize, dy: isize, ctx: &mut EventContext<'_>) -> Result<()> {
        let before = self.panel.scroll();
        let after = ScrollOffset::new(
            scroll_by(before.x, dx, self.panel.max_scroll_x()),
            scroll_by(before.y, dy, self.panel.max_scroll_y()),
        );
        self.scroll_to(after, ctx)
    }

    /// Set the offset (clamped), repaint, and notify if it moved.
    pub fn scroll_to(&mut self, offset: ScrollOffset, ctx: &mut EventContext<'_>) -> Result<()> {
        let before = self.panel.scroll();
        self.panel.set_scroll(offset);
        let after = self.panel.scroll();
        self.paint(ctx.surface)?;
        if after != before {
            ctx.emit(WidgetEvent::Scrolled { x: after.x, y: after.y });
        }
        Ok(())
    }

    pub fn scroll_up(&mut self, ctx: &mut EventContext<'_>) -> Result<()> {
        self.scroll_by(0, -1, ctx)
    }

    pub fn scroll_down(&mut self, ctx: &mut EventContext<'_>) -> Result<()> {
        self.scroll_by(0, 1, ctx)
    }

    pub fn scroll_left(&mut self, ctx: &mut EventContext<'_>) -> Result<()> {
        self.scroll_by(-1, 0, ctx)
    }

    pub fn scroll_right(&mut self, ctx: &mut EventContext<'_>) -> Result<()> {
        self.scroll_by(1, 0, ctx)
    }

    pub fn set_scroll_y_disabled(&mut self, disabled: bool, ctx: &mut EventContext<'_>) -> Result<()> {
        if self.options.scroll_y_disabled == disabled {
            return Ok(());
        }
        self.options.scroll_y_disabled = disabled;
        self.paint(ctx.surface)
    }

    pub fn set_scroll_x_disabled(&mut self, disabled: bool, ctx: &mut EventContext<'_>) -> Result<()> {
        if self.options.scroll_x_disabled == disabled {
            return Ok(());
        }
        self.options.scroll_x_disabled = disabled;
        self.paint(ctx.surface)
    }

    // -------------------------------------------------------------------------
    // Track auto-repeat
    // -------------------------------------------------------------------------

    pub fn is_repeating(&self) -> bool {
        self.repeat.is_some()
    }

    fn start_repeat(&mut self, action: TimerAction, ctx: &mut EventContext<'_>) {
        self.stop_repeat(ctx);
        tracing::debug!(id = %ctx.id(), ?action, "scroll repeat started");
        self.repeat = Some(ctx.start_timer(self.options.repeat_interval, action));
    }

    fn stop_repeat(&mut self, ctx: &mut EventContext<'_>) {
        if let Some(timer) = self.repeat.take() {
            ctx.cancel_timer(timer);
            tracing::debug!(id = %ctx.id(), "scroll repeat stopped");
        }
    }

    fn update_thumb_hover(&mut self, event: &MouseEvent, ctx: &mut EventContext<'_>) -> Result<()> {
        let (vertical, horizontal) = match self.panel.core().local(event.position()) {
            Some((col, row)) => (
                self.vertical_track_cell(col, row)
                    .is_some_and(|cell| self.vertical_thumb().contains(cell)),
                self.horizontal_track_cell(col, row)
                    .is_some_and(|cell| self.horizontal_thumb().contains(cell)),
            ),
            None => (false, false),
        };
        self.set_thumb_hover(vertical, horizontal, ctx)
    }

    fn set_thumb_hover(&mut self, vertical: bool, horizontal: bool, ctx: &mut EventContext<'_>) -> Result<()> {
        if (vertical, horizontal) == (self.vertical_hovered, self.horizontal_hovered) {
            return Ok(());
        }
        self.vertical_hovered = vertical;
        self.horizontal_hovered = horizontal;
        self.paint(ctx.surface)
    }
}

impl Widget for ScrollablePanel {
    fn core(&self) -> &WidgetCore {
        self.panel.core()
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        self.panel.core_mut()
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::ScrollablePanel
    }

    fn produce_rows(&self) -> RenderRows {
        Panel::rows_from_cells(self.cell_rows(&self.panel.palette()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn on_wheel_up(&mut self, _event: &MouseEvent, ctx: &mut EventContext<'_>) -> Result<()> {
        self.scroll_up(ctx)
    }

    fn on_wheel_down(&mut self, _event: &MouseEvent, ctx: &mut EventContext<'_>) -> Result<()> {
        self.scroll_down(ctx)
    }

    fn on_click_start(&mut self, event: &MouseEvent, ctx: &mut EventContext<'_>) -> Result<()> {
        let Some((col, row)) = self.panel.core().local(event.position()) else {
            return Ok(());
        };

        // Presses on a thumb itself are not handled.
        let action = if let Some(cell) = self.vertical_track_cell(col, row) {
            let thumb = self.vertical_thumb();
            if thumb.is_before(cell) {
                Some(TimerAction::ScrollUp)
            } else if thumb.is_after(cell) {
                Some(TimerAction::ScrollDown)
            } else {
                None
            }
        } else if let Some(cell) = self.horizontal_track_cell(col, row) {
            let thumb = self.horizontal_thumb();
            if thumb.is_before(cell) {
                Some(TimerAction::ScrollLeft)
            } else if thumb.is_after(cell) {
                Some(TimerAction::ScrollRight)
            } else {
                None
            }
        } else {
            None
        };

        if let Some(action) = action {
            self.start_repeat(action, ctx);
        }
        Ok(())
    }

    fn on_click_end(&mut self, _event: &MouseEvent, ctx: &mut EventContext<'_>) -> Result<()> {
        self.stop_repeat(ctx);
        Ok(())
    }

    fn on_hover_start(&mut self, event: &MouseEvent, ctx: &mut EventContext<'_>) -> Result<()> {
        self.update_thumb_hover(event, ctx)
    }

    fn on_hover(&mut self, event: &MouseEvent, ctx: &mut EventContext<'_>) -> Result<()> {
        self.update_thumb_hover(event, ctx)
    }

    fn on_hover_end(&mut self, _event: &MouseEvent, ctx: &mut EventContext<'_>) -> Result<()> {
        self.set_thumb_hover(false, false, ctx)
    }

    fn on_timer(&mut self, timer: TimerId, action: TimerAction, ctx: &mut EventContext<'_>) -> Result<()> {
        if self.repeat != Some(timer) {
            return Ok(());
        }
        match action {
            TimerAction::ScrollUp => self.scroll_up(ctx),
            TimerAction::ScrollDown => self.scroll_down(ctx),
            TimerAction::ScrollLeft => self.scroll_left(ctx),
            TimerAction::ScrollRight => self.scroll_right(ctx),
        }
    }
}
