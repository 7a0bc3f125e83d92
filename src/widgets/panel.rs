//! Panel - bordered text container
//!
//! A panel draws a one-cell border with an optional label in the top rule,
//! and shows the visible window of its content (scroll offset applied on
//! both axes) aligned inside the interior.

use std::any::Any;

use super::{Widget, WidgetCore, WidgetKind};
use crate::renderer::{CellRow, RenderRows};
use crate::state::scroll::max_scroll;
use crate::state::ScrollOffset;
use crate::types::{BorderGlyphs, Color, Position, Size, Style};

/// Smallest width and height a bordered panel can be drawn at.
pub const MIN_PANEL_SIZE: u16 = 2;

pub const DEFAULT_COLOR: Color = Color::WHITE;
pub const DEFAULT_BACKGROUND_COLOR: Color = Color::BLACK;
pub const DEFAULT_BORDER_COLOR: Color = Color::RED;

// =============================================================================
// Options
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelOptions {
    pub position: Position,
    pub size: Size,
    pub content: String,
    pub label: String,
    pub style: Style,
    pub border: BorderGlyphs,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            position: Position::default(),
            size: Size::new(MIN_PANEL_SIZE, MIN_PANEL_SIZE),
            content: String::new(),
            label: String::new(),
            style: Style::default(),
            border: BorderGlyphs::default(),
        }
    }
}

/// Resolved colours for one paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub color: Color,
    pub background: Color,
    pub border: Color,
    pub label: Color,
}

// =============================================================================
// Panel
// =============================================================================

#[derive(Debug, Clone)]
pub struct Panel {
    core: WidgetCore,
    content: String,
    label: String,
    border: BorderGlyphs,
    scroll: ScrollOffset,
}

impl Panel {
    pub fn new(options: PanelOptions) -> Self {
        let size = options.size.at_least(MIN_PANEL_SIZE);
        if size != options.size {
            tracing::warn!(
                requested = ?options.size,
                clamped = ?size,
                "panel smaller than its border, clamping"
            );
        }

        Self {
            core: WidgetCore::new(options.position, size, options.style),
            content: options.content,
            label: options.label,
            border: options.border,
            scroll: ScrollOffset::default(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub(crate) fn content_mut(&mut self) -> &mut String {
        &mut self.content
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn border(&self) -> &BorderGlyphs {
        &self.border
    }

    pub fn set_position(&mut self, position: Position) {
        self.core.position = position;
    }

    pub fn set_size(&mut self, size: Size) {
        self.core.size = size.at_least(MIN_PANEL_SIZE);
    }

    pub fn set_style(&mut self, style: Style) {
        self.core.style = style;
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    /// Size the panel is drawn at. The core's size can be set below the
    /// border minimum through `core_mut`; drawing never goes below it.
    pub fn drawn_size(&self) -> Size {
        self.core.size.at_least(MIN_PANEL_SIZE)
    }

    pub fn content_width(&self) -> usize {
        (self.drawn_size().width - 2) as usize
    }

    pub fn content_height(&self) -> usize {
        (self.drawn_size().height - 2) as usize
    }

    /// Number of `\n`-separated lines; empty content is one empty line.
    pub fn total_lines(&self) -> usize {
        self.content.split('\n').count()
    }

    pub fn max_line_len(&self) -> usize {
        self.content
            .split('\n')
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
    }

    pub fn last_line(&self) -> &str {
        self.content.rsplit('\n').next().unwrap_or("")
    }

    pub fn max_scroll_x(&self) -> usize {
        max_scroll(self.max_line_len(), self.content_width())
    }

    pub fn max_scroll_y(&self) -> usize {
        max_scroll(self.total_lines(), self.content_height())
    }

    /// Scroll offset clamped to the current content.
    pub fn scroll(&self) -> ScrollOffset {
        self.scroll.clamped(self.max_scroll_x(), self.max_scroll_y())
    }

    /// Store an offset as given. It is clamped whenever it is read.
    pub fn set_scroll(&mut self, scroll: ScrollOffset) {
        self.scroll = scroll;
    }

    /// Lines currently inside the viewport, sliced to the content width.
    pub fn visible_lines(&self) -> Vec<String> {
        let offset = self.scroll();
        let width = self.content_width();
        self.content
            .split('\n')
            .skip(offset.y)
            .take(self.content_height())
            .map(|line| line.chars().skip(offset.x).take(width).collect())
            .collect()
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Colours from the style, falling back to the panel defaults.
    pub fn palette(&self) -> Palette {
        let style = &self.core.style;
        let color = style.color.unwrap_or(DEFAULT_COLOR);
        Palette {
            color,
            background: style.background_color.unwrap_or(DEFAULT_BACKGROUND_COLOR),
            border: style.border_color.unwrap_or(DEFAULT_BORDER_COLOR),
            label: style.label_color.unwrap_or(color),
        }
    }

    /// Build every row cell by cell so wrapping widgets can patch cells.
    pub fn cell_rows(&self, palette: &Palette) -> Vec<CellRow> {
        let width = self.drawn_size().width as usize;
        let inner_w = self.content_width();
        let inner_h = self.content_height();
        let glyphs = &self.border;
        let align = self.core.style.text_align.unwrap_or_default();
        let valign = self.core.style.vertical_align.unwrap_or_default();

        let mut rows = Vec::with_capacity(inner_h + 2);

        // Top rule with the label
        let mut top = CellRow::with_capacity(width);
        top.push(glyphs.top_left, palette.border);
        let label: String = self.label.chars().take(inner_w).collect();
        let label_len = label.chars().count();
        top.push_str(&label, palette.label);
        top.push_repeat(glyphs.top, inner_w - label_len, palette.border);
        top.push(glyphs.top_right, palette.border);
        rows.push(top);

        // Interior
        let visible = self.visible_lines();
        let lead = valign.leading(inner_h - visible.len());
        for r in 0..inner_h {
            let line = r
                .checked_sub(lead)
                .and_then(|i| visible.get(i))
                .map(String::as_str)
                .unwrap_or("");
            let (left, right) = align.split(inner_w - line.chars().count());

            let mut row = CellRow::with_capacity(width);
            row.push(glyphs.left, palette.border);
            row.push_repeat(' ', left, palette.background);
            row.push_str(line, palette.color);
            row.push_repeat(' ', right, palette.background);
            row.push(glyphs.right, palette.border);
            rows.push(row);
        }

        // Bottom rule
        let mut bottom = CellRow::with_capacity(width);
        bottom.push(glyphs.bottom_left, palette.border);
        bottom.push_repeat(glyphs.bottom, inner_w, palette.border);
        bottom.push(glyphs.bottom_right, palette.border);
        rows.push(bottom);

        rows
    }

    pub(crate) fn rows_from_cells(cells: Vec<CellRow>) -> RenderRows {
        let mut rows = RenderRows::with_capacity(cells.len());
        for row in cells {
            rows.push_cells(row);
        }
        rows
    }
}

impl Widget for Panel {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Panel
    }

    fn produce_rows(&self) -> RenderRows {
        Self::rows_from_cells(self.cell_rows(&self.palette()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
