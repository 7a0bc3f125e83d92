//! Log - append-only scrollable panel pinned to its newest line

use std::any::Any;

use super::scrollable::{ScrollOptions, ScrollablePanel};
use super::{EventContext, PanelOptions, Widget, WidgetCore, WidgetEvent, WidgetKind};
use crate::compositor::{TimerAction, TimerId};
use crate::error::Result;
use crate::renderer::RenderRows;
use crate::state::{MouseEvent, ScrollOffset};

#[derive(Debug, Clone)]
pub struct Log {
    inner: ScrollablePanel,
}

impl Log {
    pub fn new(panel: PanelOptions, options: ScrollOptions) -> Self {
        Self {
            inner: ScrollablePanel::new(panel, options),
        }
    }

    pub fn scrollable(&self) -> &ScrollablePanel {
        &self.inner
    }

    pub fn scrollable_mut(&mut self) -> &mut ScrollablePanel {
        &mut self.inner
    }

    pub fn content(&self) -> &str {
        self.inner.panel().content()
    }

    /// Append a line and scroll so the newest line is visible.
    pub fn append(&mut self, line: &str, ctx: &mut EventContext<'_>) -> Result<()> {
        let panel = self.inner.panel_mut();
        let content = panel.content_mut();
        if !content.is_empty() {
            content.push('\n');
        }
        content.push_str(line);

        let total = panel.total_lines();
        let height = panel.content_height();
        if total > height {
            let x = panel.scroll().x;
            panel.set_scroll(ScrollOffset::new(x, total - height));
        }

        self.paint(ctx.surface)?;
        ctx.emit(WidgetEvent::Appended);
        Ok(())
    }
}

impl Widget for Log {
    fn core(&self) -> &WidgetCore {
        self.inner.core()
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        self.inner.core_mut()
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Log
    }

    fn produce_rows(&self) -> RenderRows {
        self.inner.produce_rows()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn on_wheel_up(&mut self, event: &MouseEvent, ctx: &mut EventContext<'_>) -> Result<()> {
        self.inner.on_wheel_up(event, ctx)
    }

    fn on_wheel_down(&mut self, event: &MouseEvent, ctx: &mut EventContext<'_>) -> Result<()> {
        self.inner.on_wheel_down(event, ctx)
    }

    fn on_click_start(&mut self, event: &MouseEvent, ctx: &mut EventContext<'_>) -> Result<()> {
        self.inner.on_click_start(event, ctx)
    }

    fn on_click_end(&mut self, event: &MouseEvent, ctx: &mut EventContext<'_>) -> Result<()> {
        self.inner.on_click_end(event, ctx)
    }

    fn on_hover_start(&mut self, event: &MouseEvent, ctx: &mut EventContext<'_>) -> Result<()> {
        self.inner.on_hover_start(event, ctx)
    }

    fn on_hover(&mut self, event: &MouseEvent, ctx: &mut EventContext<'_>) -> Result<()> {
        self.inner.on_hover(event, ctx)
    }

    fn on_hover_end(&mut self, event: &MouseEvent, ctx: &mut EventContext<'_>) -> Result<()> {
        self.inner.on_hover_end(event, ctx)
    }

    fn on_timer(&mut self, timer: TimerId, action: TimerAction, ctx: &mut EventContext<'_>) -> Result<()> {
        self.inner.on_timer(timer, action, ctx)
    }
}
